// フォルダ監視 - 1サイクル（移動 → 照合 → 通知）と定期実行ループ

use crate::codec::{CodecBackend, LeptonCodec};
use crate::config::Config;
use crate::core::{CycleReport, MonitorResult, ReconcileReport};
use crate::engine::{MoveEngine, StatusReconciler};
use crate::notify::{messages, LogNotifier, Notifier, OutboxNotifier};
use crate::storage::StorageBackend;
use chrono::Local;
use std::future::Future;
use std::sync::Arc;

/// 設定に応じた通知実装を選ぶ（Outbox 指定があればファイル出力、無ければログ）
pub fn notifier_for(config: &Config) -> Box<dyn Notifier> {
    match &config.outbox {
        Some(dir) => Box::new(OutboxNotifier::new(dir)),
        None => Box::new(LogNotifier::new()),
    }
}

/// コーデックバイナリを探し、見つからなければ運用担当者に通知してからエラーを返す
pub async fn locate_codec<N: Notifier>(config: &Config, notifier: &N) -> MonitorResult<LeptonCodec> {
    let binary = config.codec_binary();
    match LeptonCodec::locate(&binary) {
        Ok(codec) => Ok(codec),
        Err(e) => {
            let alert = messages::codec_missing_alert(&config.alert_recipients, &binary);
            if !notifier.notify(&alert).await {
                tracing::warn!("Failed to deliver codec missing alert");
            }
            Err(e)
        }
    }
}

/// 監視処理全体をまとめる構造体
///
/// 依存関係はコンストラクタで受け取り、テストではモックに差し替える。
pub struct FolderMonitor<S, C, N>
where
    S: StorageBackend + 'static,
    C: CodecBackend + 'static,
    N: Notifier,
{
    config: Config,
    storage: Arc<S>,
    codec: Arc<C>,
    notifier: N,
}

impl<S, C, N> FolderMonitor<S, C, N>
where
    S: StorageBackend + 'static,
    C: CodecBackend + 'static,
    N: Notifier,
{
    pub fn new(config: Config, storage: S, codec: C, notifier: N) -> Self {
        Self {
            config,
            storage: Arc::new(storage),
            codec: Arc::new(codec),
            notifier,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 1サイクル分の処理を行う
    ///
    /// いずれかのツリーが存在しない場合はサイクルをスキップして `Ok(None)` を返す。
    pub async fn run_cycle(&self) -> MonitorResult<Option<CycleReport>> {
        if let Err(e) = self.config.check_trees() {
            tracing::error!(error = %e, "Invalid input directories, skipping cycle");
            return Ok(None);
        }

        let engine = MoveEngine::new(
            self.config.trees.clone(),
            self.config.ignore.clone(),
            Arc::clone(&self.storage),
            Arc::clone(&self.codec),
        );
        let reconciler =
            StatusReconciler::new(self.config.trees.local.clone(), Arc::clone(&self.storage));

        // ファイル操作は同期的に1件ずつ行うため、ブロッキング用スレッドで実行する
        let report = tokio::task::spawn_blocking(move || {
            let moves = engine.run();
            let reconcile = reconciler.run();
            CycleReport { moves, reconcile }
        })
        .await?;

        self.send_reports(&report.reconcile).await;
        Ok(Some(report))
    }

    /// 照合結果をまとめて通知する（空のリストは送らない）
    async fn send_reports(&self, report: &ReconcileReport) {
        if !report.completed_clusters.is_empty() {
            let message = messages::cluster_download_report(
                &self.config.report_recipients,
                &report.completed_clusters,
                Local::now(),
            );
            if !self.notifier.notify(&message).await {
                tracing::warn!("Failed to deliver cluster download report");
            }
        }

        if !report.malformed_status_files.is_empty() {
            let message = messages::malformed_status_alert(
                &self.config.alert_recipients,
                &report.malformed_status_files,
                Local::now(),
            );
            if !self.notifier.notify(&message).await {
                tracing::warn!("Failed to deliver malformed status alert");
            }
        }
    }

    /// `shutdown` が完了するまでサイクルを繰り返す
    ///
    /// 停止要求は待機中にのみ受け付け、実行中のサイクルは最後まで処理する。
    pub async fn run_until<F>(&self, shutdown: F) -> MonitorResult<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            match self.run_cycle().await {
                Ok(_) => {}
                Err(e) if e.is_recoverable() => {
                    tracing::error!(error = %e, "Cycle failed");
                }
                Err(e) => return Err(e),
            }

            tracing::debug!(seconds = self.config.sleep_time.as_secs(), "Sleeping until next cycle");
            tokio::select! {
                _ = tokio::time::sleep(self.config.sleep_time) => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping folder monitor");
                    return Ok(());
                }
            }
        }
    }
}
