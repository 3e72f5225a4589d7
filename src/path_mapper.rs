use std::path::{Path, PathBuf};

/// ソースツリー内のパスを、相対構造を保ったまま別ツリーのパスへ写像する
///
/// `child` は `source` の配下にあることを呼び出し側が保証する。
/// 配下にない場合は `debug_assert!` で検出し、リリースビルドでは
/// `child` のファイル名だけを `root` 直下に置いたパスを返す。
pub fn map_to_tree(root: &Path, child: &Path, source: &Path) -> PathBuf {
    match relative_path(child, source) {
        Some(relative) => root.join(relative),
        None => {
            debug_assert!(
                false,
                "{} is not inside {}",
                child.display(),
                source.display()
            );
            root.join(child.file_name().unwrap_or_default())
        }
    }
}

/// `base` から見た `path` の相対パス（配下にない場合は `None`）
pub fn relative_path<'a>(path: &'a Path, base: &Path) -> Option<&'a Path> {
    path.strip_prefix(base).ok()
}

/// 圧縮画像の移動先パス（拡張子を `.JPG` に置き換える）
pub fn decompressed_target(root: &Path, child: &Path, source: &Path) -> PathBuf {
    map_to_tree(root, child, source).with_extension("JPG")
}
