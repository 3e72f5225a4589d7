use crate::core::FileCategory;
use std::path::Path;

/// ソースツリーで無視するパス断片のデフォルト（Dropboxの内部ファイル等）
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = [".dropbox", ".ini"];

/// 除外パターンのリスト（大文字小文字を区別する部分一致）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    patterns: Vec<String>,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERNS)
    }
}

impl IgnoreList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// パスのいずれかの部分にパターンが含まれるか
    pub fn matches(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}

/// ファイルを分類する
///
/// 除外パターンに一致した場合は `None` を返し、エンジンはそのファイルを
/// 一切扱わない。それ以外は拡張子（大文字小文字を区別しない）で判定する。
pub fn classify(path: &Path, ignore: &IgnoreList) -> Option<FileCategory> {
    if ignore.matches(path) {
        return None;
    }
    Some(category_of(path))
}

/// 拡張子のみによるカテゴリ判定
pub fn category_of(path: &Path) -> FileCategory {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => FileCategory::StatusMarker,
        "lep" => FileCategory::CompressedImage,
        "mp4" | "mov" | "srt" => FileCategory::VideoOrSubtitle,
        _ => FileCategory::SupportFile,
    }
}
