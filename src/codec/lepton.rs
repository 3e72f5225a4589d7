use super::{CodecBackend, CompressOutcome};
use crate::core::{MonitorError, MonitorResult};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// コーデックバイナリを置くディレクトリ名
pub const CODEC_DIR: &str = "execs";

/// プラットフォームごとのバイナリ名
pub const fn binary_name() -> &'static str {
    if cfg!(windows) {
        "lepton.exe"
    } else {
        "lepton"
    }
}

/// 外部の lepton バイナリを呼び出すコーデック
#[derive(Debug, Clone)]
pub struct LeptonCodec {
    binary: PathBuf,
}

impl LeptonCodec {
    /// 指定パスのバイナリを使う（存在しなければ起動時エラー）
    pub fn locate(binary: impl Into<PathBuf>) -> MonitorResult<Self> {
        let binary = binary.into();
        if !binary.is_file() {
            tracing::error!(path = %binary.display(), "Lepton binary cannot be found");
            return Err(MonitorError::CodecBinaryMissing { path: binary });
        }
        Ok(Self { binary })
    }

    /// 既定の場所 `<実行ファイルのディレクトリ>/execs/lepton` を探す
    ///
    /// 実行ファイルの隣に無ければカレントディレクトリの `execs/` を探す。
    pub fn default_location() -> PathBuf {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .map(|dir| dir.join(CODEC_DIR).join(binary_name()));

        match beside_exe {
            Some(path) if path.is_file() => path,
            _ => PathBuf::from(CODEC_DIR).join(binary_name()),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// 標準出力・標準エラーを破棄してバイナリを同期実行する
    fn run(&self, input: &Path, output: &Path) -> MonitorResult<ExitStatus> {
        Command::new(&self.binary)
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| MonitorError::CodecSpawn {
                binary: self.binary.clone(),
                source,
            })
    }
}

fn ends_with(path: &Path, suffix: &str) -> bool {
    path.to_string_lossy().ends_with(suffix)
}

fn ends_with_ignore_case(path: &Path, suffix: &str) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(suffix)
}

impl CodecBackend for LeptonCodec {
    fn decompress(&self, input: &Path, output: &Path) -> MonitorResult<()> {
        if !ends_with(input, ".lep") || !ends_with_ignore_case(output, ".jpg") {
            return Err(MonitorError::invalid_argument(
                "Only .lep input files and .jpg output files are accepted",
            ));
        }
        if !input.exists() {
            return Err(MonitorError::not_found(input));
        }

        let status = self.run(input, output)?;
        if status.success() {
            Ok(())
        } else {
            Err(MonitorError::codec_failure(input, status.code()))
        }
    }

    fn compress(&self, input: &Path, output: &Path) -> CompressOutcome {
        let valid = ends_with_ignore_case(input, ".jpg") && ends_with(output, ".lep");
        let success = valid
            && match self.run(input, output) {
                Ok(status) => status.success(),
                Err(e) => {
                    tracing::warn!(input = %input.display(), error = %e, "Compression failed");
                    false
                }
            };

        CompressOutcome {
            input: input.to_path_buf(),
            success,
        }
    }
}
