use crate::config::write_template;
use anyhow::{Context, Result};
use std::path::Path;

/// Write a parameters file template
pub fn execute_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Parameters file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    write_template(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("📄 設定ファイルのテンプレートを作成しました: {}", config_path.display());
    println!("   DropboxDir / LocalImageDir / NASDir を設定してください");
    Ok(())
}
