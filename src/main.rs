use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use folder_monitor::cli::{
    execute_compress, execute_decompress, execute_init, execute_run, Cli, Commands,
};
use folder_monitor::logging::{init_logging, LogConfig};

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run { config, once } => execute_run(&config, once).await,
        Commands::Init { config, force } => execute_init(&config, force),
        Commands::Decompress {
            input,
            output,
            codec,
        } => execute_decompress(&input, &output, codec),
        Commands::Compress {
            input,
            output,
            codec,
        } => {
            let outcome = execute_compress(&input, &output, codec)?;
            if !outcome.success {
                anyhow::bail!("Compression failed for {}", outcome.input.display());
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ログのガードは main の終了まで保持する
    let _log_guard = match init_logging(&LogConfig {
        log_dir: cli.log_dir.clone(),
        verbose: cli.verbose,
    }) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("❌ ログの初期化に失敗しました: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
