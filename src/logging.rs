// ログ初期化 - コンソール（stderr）と任意のログファイルへの出力

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログファイル名
pub const LOG_FILE_NAME: &str = "folder-monitor.log";

const DEFAULT_LOG_FILTER: &str = "folder_monitor=info";
const VERBOSE_LOG_FILTER: &str = "folder_monitor=debug";

/// ログ設定
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// ログファイルを書き出すディレクトリ（None ならコンソールのみ）
    pub log_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// グローバルなサブスクライバを登録する（バイナリから1回だけ呼ぶ）
///
/// 戻り値のガードはプロセス終了まで保持すること。破棄するとファイルへの
/// 書き込みスレッドが止まる。
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let default_filter = if config.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let mut guard = None;
    let file_layer = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
