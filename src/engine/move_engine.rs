// 移動エンジン - ソースツリーを走査し、分類・移動・伸張を行う

use crate::codec::CodecBackend;
use crate::core::{FileCategory, MonitorError, MonitorResult, MonitorTrees, MoveReport, TreeKind};
use crate::file_classifier::{classify, IgnoreList};
use crate::file_scanner::FileScanner;
use crate::path_mapper::{decompressed_target, map_to_tree, relative_path};
use crate::storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;
use tracing::Span;

/// 1ファイル分の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveOutcome {
    Moved,
    Skipped,
}

/// ソースツリーのファイルを移動先ツリーへ振り分けるエンジン
///
/// ファイルは1つずつ同期的に処理する。移動先が既に存在するファイルは
/// スキップされるため、同じツリーに対して何度実行しても重複は生じない。
pub struct MoveEngine<S, C>
where
    S: StorageBackend,
    C: CodecBackend,
{
    trees: MonitorTrees,
    ignore: IgnoreList,
    storage: Arc<S>,
    codec: Arc<C>,
    span: Span,
}

impl<S, C> MoveEngine<S, C>
where
    S: StorageBackend,
    C: CodecBackend,
{
    pub fn new(trees: MonitorTrees, ignore: IgnoreList, storage: Arc<S>, codec: Arc<C>) -> Self {
        let span = tracing::info_span!("move_engine", source = %trees.source.display());
        Self {
            trees,
            ignore,
            storage,
            codec,
            span,
        }
    }

    pub fn trees(&self) -> &MonitorTrees {
        &self.trees
    }

    /// ソースツリーを1回走査して移動・伸張を行う
    ///
    /// 個々のファイルの失敗は `MoveReport::failures` に記録され、走査は継続する。
    pub fn run(&self) -> MoveReport {
        let _entered = self.span.enter();
        tracing::info!("Performing files check");

        let mut report = MoveReport::default();

        for file in FileScanner::walk(&self.trees.source) {
            let path = file.path();
            let relative = relative_path(&path, &self.trees.source).unwrap_or(&path);

            let Some(category) = classify(relative, &self.ignore) else {
                tracing::debug!(path = %path.display(), "Ignoring file");
                report.ignored += 1;
                continue;
            };

            match self.dispatch(&path, category) {
                Ok(MoveOutcome::Moved) => {
                    tracing::debug!(path = %path.display(), ?category, "File has been moved");
                    report.count += 1;
                }
                Ok(MoveOutcome::Skipped) => {
                    tracing::debug!(path = %path.display(), "Destination already exists, skipping");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to move file");
                    report.record_failure(&path, &e);
                }
            }
        }

        tracing::info!(
            count = report.count,
            skipped = report.skipped,
            failed = report.failures.len(),
            "{} files were detected and moved",
            report.count
        );
        report
    }

    fn dispatch(&self, path: &Path, category: FileCategory) -> MonitorResult<MoveOutcome> {
        match category {
            FileCategory::CompressedImage => self.decompress_to_local(path),
            FileCategory::StatusMarker
            | FileCategory::VideoOrSubtitle
            | FileCategory::SupportFile => self.relocate(path, category.destination()),
        }
    }

    /// 移動先が無い場合のみファイルを移動する
    fn relocate(&self, path: &Path, kind: TreeKind) -> MonitorResult<MoveOutcome> {
        let dest = map_to_tree(self.trees.root_of(kind), path, &self.trees.source);
        self.storage.ensure_parent_dir(&dest)?;

        if self.storage.exists(&dest) {
            return Ok(MoveOutcome::Skipped);
        }

        self.storage.move_file(path, &dest)?;
        Ok(MoveOutcome::Moved)
    }

    /// `.lep` をローカルツリーの `.JPG` に伸張し、成功したらソースを削除する
    fn decompress_to_local(&self, path: &Path) -> MonitorResult<MoveOutcome> {
        let dest = decompressed_target(&self.trees.local, path, &self.trees.source);
        self.storage.ensure_parent_dir(&dest)?;
        let existed = self.storage.exists(&dest);

        if let Err(e) = self.codec.decompress(path, &dest) {
            // 今回の試行で作られた出力だけを消す（以前のサイクルの JPG は残す）
            if matches!(e, MonitorError::CodecFailure { .. })
                && !existed
                && self.storage.exists(&dest)
            {
                if let Err(cleanup) = self.storage.remove_file(&dest) {
                    tracing::warn!(path = %dest.display(), error = %cleanup, "Failed to remove partial output");
                }
            }
            return Err(e);
        }

        self.storage.remove_file(path)?;
        Ok(MoveOutcome::Moved)
    }
}
