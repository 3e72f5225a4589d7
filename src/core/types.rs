// 監視処理に関連するデータ型定義

use serde::Serialize;
use std::path::{Path, PathBuf};

/// ファイルの取り扱いカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileCategory {
    /// クラスタのステータスファイル（.json）
    StatusMarker,
    /// 圧縮画像（.lep）
    CompressedImage,
    /// 動画・字幕（.mp4 / .mov / .srt）
    VideoOrSubtitle,
    /// その他の補助ファイル
    SupportFile,
}

impl FileCategory {
    /// カテゴリごとの移動先ツリー
    pub const fn destination(&self) -> TreeKind {
        match self {
            Self::StatusMarker | Self::CompressedImage => TreeKind::Local,
            Self::VideoOrSubtitle | Self::SupportFile => TreeKind::Archive,
        }
    }
}

/// 移動先ツリーの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TreeKind {
    Local,
    Archive,
}

/// 監視対象の3つのディレクトリルート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorTrees {
    /// 新着ファイルが届くディレクトリ
    pub source: PathBuf,
    /// ステータスファイルと伸張済み画像の保存先
    pub local: PathBuf,
    /// 動画・補助ファイルの保存先
    pub archive: PathBuf,
}

impl MonitorTrees {
    pub fn new(
        source: impl Into<PathBuf>,
        local: impl Into<PathBuf>,
        archive: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            local: local.into(),
            archive: archive.into(),
        }
    }

    /// 種別に対応する移動先ルート
    pub fn root_of(&self, kind: TreeKind) -> &Path {
        match kind {
            TreeKind::Local => &self.local,
            TreeKind::Archive => &self.archive,
        }
    }

    /// (設定キー名, パス) の組で全ツリーを列挙
    pub fn named(&self) -> [(&'static str, &Path); 3] {
        [
            ("DropboxDir", self.source.as_path()),
            ("LocalImageDir", self.local.as_path()),
            ("NASDir", self.archive.as_path()),
        ]
    }
}

/// 移動に失敗したファイルの記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// MoveEngine 1回分の実行結果
///
/// 呼び出しごとに新しく生成されるため、サイクル間で状態は引き継がれない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// 移動・伸張に成功したファイル数
    pub count: usize,
    /// 移動先が既に存在したためスキップしたファイル数
    pub skipped: usize,
    /// 除外パターンに一致したファイル数
    pub ignored: usize,
    /// 失敗したファイル（次のサイクルで再試行される）
    pub failures: Vec<MoveFailure>,
}

impl MoveReport {
    pub fn record_failure(&mut self, path: &Path, reason: impl ToString) {
        self.failures.push(MoveFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        });
    }
}

/// StatusReconciler 1回分の実行結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// 今回完了と判定されたクラスタ名
    pub completed_clusters: Vec<String>,
    /// JSONとして読めなかったステータスファイルのディレクトリ
    pub malformed_status_files: Vec<PathBuf>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.completed_clusters.is_empty() && self.malformed_status_files.is_empty()
    }
}

/// 1サイクル全体のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub moves: MoveReport,
    pub reconcile: ReconcileReport,
}
