// Model download helper for the NLLB ONNX files.
//
// Downloads the quantized encoder/decoder export of nllb-200-distilled-600M
// plus its tokenizer from HuggingFace. Files are stored in a
// platform-appropriate directory (~/.local/share/tonal/models/ on Linux)
// so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// HuggingFace repo for the quantized NLLB ONNX export.
const NLLB_HF_URL: &str = "https://huggingface.co/Xenova/nllb-200-distilled-600M/resolve/main";

/// Model files, with their path inside the HuggingFace repo.
pub const ENCODER_FILE: &str = "encoder_model_quantized.onnx";
pub const DECODER_FILE: &str = "decoder_model_quantized.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

const ENCODER_REMOTE: &str = "onnx/encoder_model_quantized.onnx";
const DECODER_REMOTE: &str = "onnx/decoder_model_quantized.onnx";
const TOKENIZER_REMOTE: &str = "tokenizer.json";

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/tonal/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tonal")
        .join("models")
}

/// Check whether all three required model files exist.
pub fn model_files_present(dir: &Path) -> bool {
    dir.join(ENCODER_FILE).exists()
        && dir.join(DECODER_FILE).exists()
        && dir.join(TOKENIZER_FILE).exists()
}

/// Download the NLLB model files.
///
/// Shows progress bars for the large files. Skips files that already exist.
/// Creates the directory as needed.
pub async fn download_model(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    println!("\nNLLB translation model (nllb-200-distilled-600M):");

    let files = [
        (TOKENIZER_REMOTE, TOKENIZER_FILE, false, ""),
        (ENCODER_REMOTE, ENCODER_FILE, true, " (~250 MB)"),
        (DECODER_REMOTE, DECODER_FILE, true, " (~350 MB)"),
    ];

    for (remote, local, show_progress, size_hint) in files {
        let dest = dir.join(local);
        if dest.exists() {
            info!("{local} already exists, skipping");
            println!("  {local} (already exists)");
            continue;
        }
        println!("  Downloading {local}{size_hint}...");
        download_file(&format!("{NLLB_HF_URL}/{remote}"), &dest, show_progress).await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = if let Some(size) = total_size {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        };
        Some(pb)
    } else {
        None
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_dir_is_under_tonal() {
        let dir = default_model_dir();
        let path_str = dir.to_string_lossy();
        assert!(
            path_str.contains("tonal") && path_str.contains("models"),
            "Expected path containing tonal/models, got: {path_str}"
        );
    }

    #[test]
    fn test_model_files_present_false_when_empty() {
        let dir = std::env::temp_dir().join("tonal-test-nonexistent");
        assert!(!model_files_present(&dir));
    }

    #[test]
    fn test_model_files_present_true_when_files_exist() {
        let dir = std::env::temp_dir().join("tonal-download-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ENCODER_FILE), b"fake").unwrap();
        std::fs::write(dir.join(DECODER_FILE), b"fake").unwrap();
        std::fs::write(dir.join(TOKENIZER_FILE), b"fake").unwrap();

        assert!(model_files_present(&dir));

        // Cleanup
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
