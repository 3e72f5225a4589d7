// 通知の具象実装

use super::{Notification, Notifier};
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};

/// 通知内容をログイベントとして出力する実装（デフォルト）
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> bool {
        tracing::info!(
            recipients = %notification.recipients.join(", "),
            subject = %notification.subject,
            attachments = notification.attachments.len(),
            "Notification\n{}",
            notification.body
        );
        true
    }
}

/// 通知を `.eml` 形式のテキストとして送信待ちディレクトリに書き出す実装
///
/// 実際の配送は外部のメールリレーが行う。
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    dir: PathBuf,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// RFC 822 風のメッセージ本文を組み立てる
    fn render(notification: &Notification) -> String {
        let mut message = format!(
            "To: {}\r\nSubject: {}\r\nDate: {}\r\n",
            notification.recipients.join(", "),
            notification.subject,
            Local::now().to_rfc2822()
        );
        for attachment in &notification.attachments {
            message.push_str(&format!("X-Attachment: {}\r\n", attachment.display()));
        }
        message.push_str("\r\n");
        message.push_str(&notification.body);
        message
    }

    /// 件名から衝突しにくいファイル名を作る
    fn file_name(notification: &Notification) -> String {
        let slug: String = notification
            .subject
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!(
            "{}-{}.eml",
            Local::now().format("%Y%m%d-%H%M%S%.6f"),
            slug.trim_matches('-')
        )
    }

    async fn write(&self, notification: &Notification) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(Self::file_name(notification));
        let partial = path.with_extension("eml.part");
        tokio::fs::write(&partial, Self::render(notification)).await?;
        tokio::fs::rename(&partial, &path).await?;
        Ok(path)
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn notify(&self, notification: &Notification) -> bool {
        for attachment in &notification.attachments {
            if !attachment.is_file() {
                tracing::error!(path = %attachment.display(), "Unable to open one of the attachments");
            }
        }

        match self.write(notification).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), subject = %notification.subject, "Notification queued");
                true
            }
            Err(e) => {
                tracing::error!(dir = %self.dir.display(), error = %e, "Unable to queue notification");
                false
            }
        }
    }
}
