use crate::core::MonitorResult;
use mockall::automock;
use std::path::Path;

pub mod local;

/// ファイル操作バックエンドのトレイト
///
/// MoveEngine と StatusReconciler が行う副作用はすべてこのトレイトを経由する。
#[automock]
pub trait StorageBackend: Send + Sync {
    /// パスが存在するかチェック
    fn exists(&self, path: &Path) -> bool;

    /// 親ディレクトリを（必要なら再帰的に）作成する
    fn ensure_parent_dir(&self, path: &Path) -> MonitorResult<()>;

    /// ファイルを移動する（コピーを残さない）
    fn move_file(&self, from: &Path, to: &Path) -> MonitorResult<()>;

    /// ファイルを削除する
    fn remove_file(&self, path: &Path) -> MonitorResult<()>;

    /// ファイル全体をバイト列として読み込む
    fn read_file(&self, path: &Path) -> MonitorResult<Vec<u8>>;

    /// 一時ファイル経由でファイル全体を置き換える（既存ファイルのパーミッションは引き継ぐ）
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> MonitorResult<()>;

    /// ディレクトリ直下で名前が `suffix` で終わるファイルを数える（大文字小文字を区別）
    fn count_files_with_suffix(&self, dir: &Path, suffix: &str) -> MonitorResult<usize>;
}
