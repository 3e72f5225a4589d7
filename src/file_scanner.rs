use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 走査で見つかったファイル（所属ディレクトリとファイル名）
///
/// ファイル名は UTF-8 でない場合もそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub dir: PathBuf,
    pub file_name: OsString,
}

impl ScannedFile {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// 所属ディレクトリ名（ルート直下のファイルではルート自身の名前）
    pub fn dir_name(&self) -> Option<String> {
        self.dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

pub struct FileScanner;

impl FileScanner {
    /// ルート以下の全ファイルを再帰的に遅延列挙する
    ///
    /// 呼び出しごとに独立した走査になる。途中で消えたディレクトリや
    /// 読めないエントリはログに残してスキップする。
    pub fn walk(root: &Path) -> impl Iterator<Item = ScannedFile> {
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry during scan");
                    None
                }
            })
            .filter(is_file_like)
            .filter_map(|entry| {
                let dir = entry.path().parent()?.to_path_buf();
                let file_name = entry.file_name().to_os_string();
                Some(ScannedFile { dir, file_name })
            })
    }
}

/// 通常ファイル、またはファイルを指すシンボリックリンクか
///
/// リンクは辿らずリンク自体を列挙する。ディレクトリを指すリンクの中は走査しない。
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        if entry.path().is_file() {
            return true;
        }
        tracing::debug!(
            path = %entry.path().display(),
            "Skipping symlink that does not point to a file"
        );
    }
    false
}
