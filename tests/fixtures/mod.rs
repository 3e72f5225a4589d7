// テストユーティリティ
// 3つのツリーを持つ一時ディレクトリと、代替コーデックバイナリの準備

#![allow(dead_code)]

use folder_monitor::config::{Config, Parameters};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// ソース・ローカル・アーカイブの3ツリーを持つ一時環境
pub struct TreeFixture {
    pub temp: TempDir,
    pub config: Config,
}

impl TreeFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config = Parameters {
            dropbox_dir: Some(temp.path().join("Dropbox").join("Project")),
            local_image_dir: Some(temp.path().join("local").join("Project")),
            nas_dir: Some(temp.path().join("nas").join("Project")),
            sleep_time: Some(1),
            report_recipients: vec!["ops@example.com".to_string()],
            alert_recipients: vec!["admin@example.com".to_string()],
            ..Parameters::default()
        }
        .validate()
        .unwrap();

        for (_, dir) in config.trees.named() {
            fs::create_dir_all(dir).unwrap();
        }
        Self { temp, config }
    }

    pub fn source(&self, relative: &str) -> PathBuf {
        self.config.trees.source.join(relative)
    }

    pub fn local(&self, relative: &str) -> PathBuf {
        self.config.trees.local.join(relative)
    }

    pub fn archive(&self, relative: &str) -> PathBuf {
        self.config.trees.archive.join(relative)
    }

    /// ソースツリーにファイルを置く
    pub fn drop_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        write_file(&self.source(relative), content)
    }

    /// ツリー内の全ファイル数
    pub fn file_count(root: &Path) -> usize {
        walk_files(root).len()
    }
}

pub fn write_file(path: &Path, content: &[u8]) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files
}

/// システムのコマンドを代替コーデックとして使う（`cp` は成功、`false` は失敗）
#[cfg(unix)]
pub fn system_binary(name: &str) -> PathBuf {
    ["/bin", "/usr/bin"]
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| panic!("{name} not found"))
}
