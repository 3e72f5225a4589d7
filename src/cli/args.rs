use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "folder_monitor")]
#[command(about = "Moves newly arrived drone data into local and archive storage")]
#[command(version)]
pub struct Cli {
    /// Directory for folder-monitor.log (console only when omitted)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch the source folder and move files every SleepTime seconds
    Run {
        /// Parameters file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Run a single cycle and exit
        #[arg(long)]
        once: bool,
    },

    /// Write a parameters file template
    Init {
        /// Parameters file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a single .lep file to .jpg
    Decompress {
        /// Input .lep file
        input: PathBuf,

        /// Output .jpg file
        output: PathBuf,

        /// Codec binary (defaults to execs/lepton next to the executable)
        #[arg(long)]
        codec: Option<PathBuf>,
    },

    /// Compress a single .jpg file to .lep
    Compress {
        /// Input .jpg file
        input: PathBuf,

        /// Output .lep file
        output: PathBuf,

        /// Codec binary (defaults to execs/lepton next to the executable)
        #[arg(long)]
        codec: Option<PathBuf>,
    },
}
