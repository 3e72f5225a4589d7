// 通知層 - 運用担当者へのメール相当の通知
// 配送失敗はログに残すだけで呼び出し側には伝播させない

use async_trait::async_trait;
use mockall::automock;
use std::path::PathBuf;

pub mod implementations;
pub mod messages;

// 公開API
pub use implementations::{LogNotifier, OutboxNotifier};

/// 1通分の通知内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

impl Notification {
    pub fn new(
        recipients: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipients,
            subject: subject.into(),
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }
}

/// 通知送信を抽象化するトレイト
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 通知を送信する（成功したら true）
    async fn notify(&self, notification: &Notification) -> bool;
}

// Notifier for Box<dyn Notifier>
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(&self, notification: &Notification) -> bool {
        self.as_ref().notify(notification).await
    }
}
