use super::StorageBackend;
use crate::core::{MonitorError, MonitorResult};
use std::fs;
use std::io::Write;
use std::path::Path;

/// ローカル（またはマウント済み）ファイルシステム用のストレージバックエンド
#[derive(Debug, Clone)]
pub struct LocalStorageBackend;

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    /// rename が使えない場合（別ボリューム等）のコピー＋削除
    fn copy_then_remove(from: &Path, to: &Path) -> MonitorResult<()> {
        fs::copy(from, to).map_err(|e| MonitorError::io(to, e))?;
        if let Err(e) = fs::remove_file(from) {
            // 元ファイルが消せない場合はコピーを戻して重複を残さない
            let _ = fs::remove_file(to);
            return Err(MonitorError::io(from, e));
        }
        Ok(())
    }
}

impl StorageBackend for LocalStorageBackend {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent_dir(&self, path: &Path) -> MonitorResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                fs::create_dir_all(parent).map_err(|e| MonitorError::io(parent, e))
            }
            _ => Ok(()),
        }
    }

    fn move_file(&self, from: &Path, to: &Path) -> MonitorResult<()> {
        if !from.is_file() {
            return Err(MonitorError::not_found(from));
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(
                    src = %from.display(),
                    dest = %to.display(),
                    error = %e,
                    "Rename failed, falling back to copy+remove"
                );
                Self::copy_then_remove(from, to)
            }
        }
    }

    fn remove_file(&self, path: &Path) -> MonitorResult<()> {
        fs::remove_file(path).map_err(|e| MonitorError::io(path, e))
    }

    fn read_file(&self, path: &Path) -> MonitorResult<Vec<u8>> {
        fs::read(path).map_err(|e| MonitorError::io(path, e))
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> MonitorResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| MonitorError::io(dir, e))?;
        // NamedTempFile は 0600 で作られるため、置き換え前のモードに揃える
        if let Ok(metadata) = fs::metadata(path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| MonitorError::io(temp.path(), e))?;
        }
        temp.write_all(contents)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| MonitorError::io(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| MonitorError::io(path, e.error))?;
        Ok(())
    }

    fn count_files_with_suffix(&self, dir: &Path, suffix: &str) -> MonitorResult<usize> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(MonitorError::io(dir, e)),
        };

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|e| MonitorError::io(dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file && entry.file_name().to_string_lossy().ends_with(suffix) {
                count += 1;
            }
        }
        Ok(count)
    }
}
