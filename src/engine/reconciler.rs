// ステータス照合 - クラスタのステータスファイルを読み、ダウンロード完了を判定する

use crate::core::{MonitorError, MonitorResult, ReconcileReport};
use crate::file_scanner::FileScanner;
use crate::storage::StorageBackend;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Span;

/// クラスタディレクトリ名の接頭辞
pub const CLUSTER_PREFIX: &str = "Cluster";
/// 伸張済み画像を置くサブディレクトリ
pub const IMAGE_SUBDIR: &str = "Comp-Ortho-Data-Set";
/// 完了判定で数える画像の接尾辞（大文字小文字を区別）
pub const IMAGE_SUFFIX: &str = ".JPG";
pub const IMAGE_COUNT_KEY: &str = "ImageCount";
pub const COMPLETE_KEY: &str = "DownloadComplete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusOutcome {
    /// 今回完了と判定して書き換えた
    Completed,
    /// まだ画像が揃っていない
    Pending,
    /// 既に完了済み
    AlreadyComplete,
}

/// 完了条件: 画像数が `ceil(ImageCount / 2)` に一致し、かつ ImageCount が 0 でない
///
/// 撮影時の2枚が処理過程で1枚にまとめられるため、半数（切り上げ）の
/// JPG が揃った時点で転送と伸張が終わったとみなす。
pub fn is_download_complete(image_count: f64, jpg_count: usize) -> bool {
    image_count != 0.0 && jpg_count as f64 == (image_count / 2.0).ceil()
}

/// ローカルツリーのクラスタステータスを照合する
pub struct StatusReconciler<S>
where
    S: StorageBackend,
{
    local: PathBuf,
    storage: Arc<S>,
    span: Span,
}

impl<S> StatusReconciler<S>
where
    S: StorageBackend,
{
    pub fn new(local: impl Into<PathBuf>, storage: Arc<S>) -> Self {
        let local = local.into();
        let span = tracing::info_span!("status_reconciler", local = %local.display());
        Self {
            local,
            storage,
            span,
        }
    }

    /// ローカルツリーを走査し、新たに完了したクラスタと壊れたステータスファイルを集める
    pub fn run(&self) -> ReconcileReport {
        let _entered = self.span.enter();
        let mut report = ReconcileReport::default();

        for file in FileScanner::walk(&self.local) {
            if !file.file_name.to_string_lossy().to_lowercase().ends_with(".json") {
                continue;
            }
            let Some(cluster) = file.dir_name().filter(|n| n.starts_with(CLUSTER_PREFIX)) else {
                continue;
            };

            let status_path = file.path();
            match self.reconcile_status_file(&file.dir, &status_path) {
                Ok(StatusOutcome::Completed) => {
                    tracing::info!(cluster = %cluster, "Cluster download complete");
                    report.completed_clusters.push(cluster);
                }
                Ok(StatusOutcome::Pending | StatusOutcome::AlreadyComplete) => {}
                Err(MonitorError::StatusFile { reason, .. }) => {
                    tracing::warn!(path = %status_path.display(), %reason, "Malformed status file");
                    report.malformed_status_files.push(file.dir.clone());
                }
                Err(e) => {
                    tracing::error!(path = %status_path.display(), error = %e, "Failed to check status file");
                }
            }
        }

        report
    }

    fn reconcile_status_file(
        &self,
        cluster_dir: &Path,
        status_path: &Path,
    ) -> MonitorResult<StatusOutcome> {
        let bytes = self.storage.read_file(status_path)?;
        let mut status = parse_status(status_path, &bytes)?;

        if status.contains_key(COMPLETE_KEY) {
            return Ok(StatusOutcome::AlreadyComplete);
        }

        let image_count = image_count(status_path, &status)?;
        let jpg_count = self
            .storage
            .count_files_with_suffix(&cluster_dir.join(IMAGE_SUBDIR), IMAGE_SUFFIX)?;

        if !is_download_complete(image_count, jpg_count) {
            tracing::debug!(
                path = %status_path.display(),
                image_count,
                jpg_count,
                "Cluster still downloading"
            );
            return Ok(StatusOutcome::Pending);
        }

        status.insert(COMPLETE_KEY.to_string(), Value::Bool(true));
        let contents = serde_json::to_vec(&Value::Object(status))
            .map_err(|e| MonitorError::status_file(status_path, e.to_string()))?;
        self.storage.write_atomic(status_path, &contents)?;

        Ok(StatusOutcome::Completed)
    }
}

/// ステータスファイルを JSON オブジェクトとして読み込む（キー順は保持される）
///
/// UTF-8 として不正なバイト列も JSON の構文エラーとして扱う。
fn parse_status(path: &Path, bytes: &[u8]) -> MonitorResult<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MonitorError::status_file(path, "not a JSON object")),
        Err(e) => Err(MonitorError::status_file(path, e.to_string())),
    }
}

/// `ImageCount` を数値として取り出す（数値文字列も受け付ける）
fn image_count(path: &Path, status: &Map<String, Value>) -> MonitorResult<f64> {
    let value = status
        .get(IMAGE_COUNT_KEY)
        .ok_or_else(|| MonitorError::status_file(path, format!("{IMAGE_COUNT_KEY} is missing")))?;

    let count = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    count
        .filter(|c| c.is_finite())
        .ok_or_else(|| MonitorError::status_file(path, format!("{IMAGE_COUNT_KEY} is not numeric")))
}
