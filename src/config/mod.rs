// 設定管理 - parameters.json の読み込みと検証

use crate::core::{ConfigError, MonitorError, MonitorTrees, ValidationError};
use crate::file_classifier::{IgnoreList, DEFAULT_IGNORE_PATTERNS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ファイルの既定ファイル名
pub const DEFAULT_CONFIG_FILE: &str = "parameters.json";
/// サイクル間の待ち時間の既定値（秒）
pub const DEFAULT_SLEEP_SECS: u64 = 1200;

/// 設定ファイルの生の内容
///
/// 必須キーも `Option` で受け、検証時にフィールド単位でエラーを報告する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "DropboxDir", default)]
    pub dropbox_dir: Option<PathBuf>,

    #[serde(rename = "LocalImageDir", default)]
    pub local_image_dir: Option<PathBuf>,

    #[serde(rename = "NASDir", default)]
    pub nas_dir: Option<PathBuf>,

    #[serde(rename = "SleepTime", default)]
    pub sleep_time: Option<u64>,

    #[serde(rename = "IgnorePatterns", default, skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,

    #[serde(rename = "CodecPath", default, skip_serializing_if = "Option::is_none")]
    pub codec_path: Option<PathBuf>,

    #[serde(rename = "Outbox", default, skip_serializing_if = "Option::is_none")]
    pub outbox: Option<PathBuf>,

    #[serde(rename = "ReportRecipients", default)]
    pub report_recipients: Vec<String>,

    #[serde(rename = "AlertRecipients", default)]
    pub alert_recipients: Vec<String>,
}

impl Parameters {
    /// 新規作成時に書き出すテンプレート
    pub fn template() -> Self {
        Self {
            sleep_time: Some(DEFAULT_SLEEP_SECS),
            ignore_patterns: Some(DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()),
            ..Self::default()
        }
    }

    /// 全フィールドを検証し、問題をまとめて返す
    pub fn validate(self) -> Result<Config, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut required = |field: &str, value: Option<PathBuf>| -> PathBuf {
            match value {
                Some(path) if !path.as_os_str().is_empty() => path,
                _ => {
                    errors.push(ValidationError::new(field, "値が設定されていません"));
                    PathBuf::new()
                }
            }
        };
        let source = required("DropboxDir", self.dropbox_dir);
        let local = required("LocalImageDir", self.local_image_dir);
        let archive = required("NASDir", self.nas_dir);

        let sleep_time = match self.sleep_time {
            Some(0) => {
                errors.push(ValidationError::new("SleepTime", "1以上である必要があります"));
                Duration::ZERO
            }
            Some(secs) => Duration::from_secs(secs),
            None => {
                errors.push(ValidationError::new("SleepTime", "値が設定されていません"));
                Duration::ZERO
            }
        };

        let ignore = match self.ignore_patterns {
            Some(patterns) if patterns.iter().any(String::is_empty) => {
                errors.push(ValidationError::new(
                    "IgnorePatterns",
                    "空文字列はすべてのパスに一致するため指定できません",
                ));
                IgnoreList::default()
            }
            Some(patterns) => IgnoreList::new(patterns),
            None => IgnoreList::default(),
        };

        let trees = MonitorTrees::new(source, local, archive);
        if errors.is_empty() {
            for (field, path) in [("LocalImageDir", &trees.local), ("NASDir", &trees.archive)] {
                if path.starts_with(&trees.source) {
                    errors.push(ValidationError::new(
                        field,
                        "DropboxDir の配下には置けません",
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Config {
            trees,
            sleep_time,
            ignore,
            codec_path: self.codec_path,
            outbox: self.outbox,
            report_recipients: self.report_recipients,
            alert_recipients: self.alert_recipients,
        })
    }
}

/// 検証済みの設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub trees: MonitorTrees,
    pub sleep_time: Duration,
    pub ignore: IgnoreList,
    pub codec_path: Option<PathBuf>,
    pub outbox: Option<PathBuf>,
    pub report_recipients: Vec<String>,
    pub alert_recipients: Vec<String>,
}

impl Config {
    /// 設定ファイルを読み込んで検証する
    ///
    /// ファイルが無い場合はテンプレートを書き出したうえで `ConfigError::Missing` を返す。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_template(path)?;
                return Err(ConfigError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let parameters: Parameters =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        parameters.validate().map_err(|errors| ConfigError::Invalid {
            path: path.to_path_buf(),
            errors,
        })
    }

    /// 各ツリーが実在するディレクトリかを確認する（サイクル開始時に呼ぶ）
    pub fn check_trees(&self) -> Result<(), MonitorError> {
        for (name, path) in self.trees.named() {
            if !path.is_dir() {
                return Err(MonitorError::missing_tree(name, path));
            }
        }
        Ok(())
    }

    /// 使用するコーデックバイナリのパス
    pub fn codec_binary(&self) -> PathBuf {
        self.codec_path
            .clone()
            .unwrap_or_else(crate::codec::lepton::LeptonCodec::default_location)
    }
}

/// テンプレート設定ファイルを書き出す
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(&Parameters::template())
        .map_err(|e| io_error(std::io::Error::other(e)))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, json).map_err(io_error)
}
