use crate::codec::{CodecBackend, CompressOutcome, LeptonCodec};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

fn codec_at(codec: Option<PathBuf>) -> Result<LeptonCodec> {
    let binary = codec.unwrap_or_else(LeptonCodec::default_location);
    LeptonCodec::locate(&binary).context("Lepton binary is required for this command")
}

/// Decompress a single .lep file
pub fn execute_decompress(input: &Path, output: &Path, codec: Option<PathBuf>) -> Result<()> {
    let codec = codec_at(codec)?;
    codec
        .decompress(input, output)
        .with_context(|| format!("Failed to decompress {}", input.display()))?;

    println!("✅ {} -> {}", input.display(), output.display());
    Ok(())
}

/// Compress a single .jpg file and print the outcome as JSON
pub fn execute_compress(
    input: &Path,
    output: &Path,
    codec: Option<PathBuf>,
) -> Result<CompressOutcome> {
    let codec = codec_at(codec)?;
    let outcome = codec.compress(input, output);

    println!("{}", serde_json::to_string(&outcome)?);
    Ok(outcome)
}
