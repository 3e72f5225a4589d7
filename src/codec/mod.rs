use crate::core::MonitorResult;
use mockall::automock;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod lepton;

pub use lepton::LeptonCodec;

/// 圧縮処理の結果情報
///
/// 圧縮は失敗してもエラーにせず、成否をこの構造体で返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressOutcome {
    pub input: PathBuf,
    pub success: bool,
}

/// 画像コーデックバックエンドのトレイト
#[automock]
pub trait CodecBackend: Send + Sync {
    /// `.lep` を `.jpg` に伸張する
    ///
    /// 拡張子が不正なら `InvalidArgument`、入力が無ければ `NotFound`、
    /// 外部プロセスが非ゼロで終了すれば `CodecFailure` を返す。
    fn decompress(&self, input: &Path, output: &Path) -> MonitorResult<()>;

    /// `.jpg` を `.lep` に圧縮する
    fn compress(&self, input: &Path, output: &Path) -> CompressOutcome;
}
