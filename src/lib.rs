//! ドロップボックス配下に届いたファイルを分類し、ローカル保存先とアーカイブ
//! (NAS) へ移動するフォルダ監視デーモン。
//!
//! 1サイクルの流れ:
//! 1. [`engine::MoveEngine`] がソースツリーを走査し、ファイルを分類して移動・伸張する
//! 2. [`engine::StatusReconciler`] がローカルツリーのクラスタステータスを照合する
//! 3. 結果を [`notify::Notifier`] で運用担当者に通知する

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod engine;
pub mod file_classifier;
pub mod file_scanner;
pub mod logging;
pub mod monitor;
pub mod notify;
pub mod path_mapper;
pub mod storage;

pub use crate::core::{CycleReport, FileCategory, MonitorError, MonitorResult, MoveReport, ReconcileReport};
pub use monitor::FolderMonitor;
