use crate::config::Config;
use crate::monitor::{locate_codec, notifier_for, FolderMonitor};
use crate::storage::local::LocalStorageBackend;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the folder monitor loop (or a single cycle with `once`)
pub async fn execute_run(config_path: &Path, once: bool) -> Result<()> {
    tracing::info!("------------------  Folder-Monitor Start  ------------------");

    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load parameters from {}", config_path.display()))?;

    tracing::debug!(path = %config.trees.source.display(), "Dropbox dir");
    tracing::debug!(path = %config.trees.local.display(), "Local storage dir");
    tracing::debug!(path = %config.trees.archive.display(), "NAS storage dir");

    let notifier = notifier_for(&config);
    let codec = locate_codec(&config, &notifier)
        .await
        .context("Image decompression is unavailable")?;

    let monitor = FolderMonitor::new(config, LocalStorageBackend::new(), codec, notifier);

    if once {
        match monitor.run_cycle().await? {
            Some(report) => tracing::info!(
                moved = report.moves.count,
                completed = report.reconcile.completed_clusters.len(),
                malformed = report.reconcile.malformed_status_files.len(),
                "Cycle finished"
            ),
            None => anyhow::bail!("Cycle skipped: one or more configured directories do not exist"),
        }
        return Ok(());
    }

    monitor
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}
