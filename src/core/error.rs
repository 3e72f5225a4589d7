// Error types for the folder monitor
// 移動・伸張・ステータス照合で発生するエラー型定義

use std::path::{Path, PathBuf};
use thiserror::Error;

/// フォルダ監視処理固有のエラー型
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("引数エラー: {message}")]
    InvalidArgument { message: String },

    #[error("ファイルが存在しません: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("コーデック実行エラー: {} (終了コード: {})", input.display(), format_status(*status))]
    CodecFailure { input: PathBuf, status: Option<i32> },

    #[error("コーデックの起動に失敗しました: {} - {source}", binary.display())]
    CodecSpawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("コーデックバイナリが見つかりません: {}", path.display())]
    CodecBinaryMissing { path: PathBuf },

    #[error("I/Oエラー: {} - {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ステータスファイルエラー: {} - {reason}", path.display())]
    StatusFile { path: PathBuf, reason: String },

    #[error("ディレクトリが存在しません: {name} = {}", path.display())]
    MissingTree { name: String, path: PathBuf },

    #[error("タスクエラー: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

fn format_status(status: Option<i32>) -> String {
    status.map_or_else(|| "signal".to_string(), |code| code.to_string())
}

impl MonitorError {
    /// 引数エラーの作成
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// ファイル不在エラーの作成
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// コーデック失敗エラーの作成
    pub fn codec_failure(input: impl AsRef<Path>, status: Option<i32>) -> Self {
        Self::CodecFailure {
            input: input.as_ref().to_path_buf(),
            status,
        }
    }

    /// I/Oエラーの作成
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// ステータスファイルエラーの作成
    pub fn status_file(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::StatusFile {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// ディレクトリ不在エラーの作成
    pub fn missing_tree(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::MissingTree {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 回復可能なエラーはファイル単位・クラスタ単位で記録され、
    /// 次のサイクルで再試行される。回復不能なエラーはプロセスを停止させる。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::CodecBinaryMissing { .. } | Self::Task { .. } => false,
            Self::InvalidArgument { .. }
            | Self::NotFound { .. }
            | Self::CodecFailure { .. }
            | Self::CodecSpawn { .. }
            | Self::Io { .. }
            | Self::StatusFile { .. }
            | Self::MissingTree { .. } => true,
        }
    }
}

impl From<tokio::task::JoinError> for MonitorError {
    fn from(error: tokio::task::JoinError) -> Self {
        MonitorError::Task { source: error }
    }
}

/// フォルダ監視の結果型
pub type MonitorResult<T> = std::result::Result<T, MonitorError>;

/// フィールド単位の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    /// 新しいバリデーションエラーを作成
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// 設定ファイル読み込みのエラー型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ファイルが存在しません: {} (テンプレートを作成しました)", path.display())]
    Missing { path: PathBuf },

    #[error("設定ファイルの読み書きに失敗しました: {} - {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("設定ファイルのJSON形式が不正です: {} - {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("設定値が不正です: {} - {}", path.display(), join_errors(errors))]
    Invalid {
        path: PathBuf,
        errors: Vec<ValidationError>,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigError {
    /// 問題のあったフィールド名一覧
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::Invalid { errors, .. } => errors.iter().map(|e| e.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
