use std::io;
use std::path::{Path, PathBuf};

use tokenizers::{Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory, truncating inputs to `max_len` tokens.
pub fn load_tokenizer_with_truncation(model_dir: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_dir.is_dir() {
        model_dir.join("tokenizer.json")
    } else {
        model_dir.to_path_buf()
    };

    let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    Ok(tokenizer)
}

/// Safetensors weight files in `model_dir`, sorted (sharded checkpoints have several).
pub fn safetensors_files(model_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let pattern = model_dir.join("*.safetensors");
    let pattern = pattern.to_string_lossy();

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(io::Error::other)?
        .filter_map(Result::ok)
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no *.safetensors in {}", model_dir.display()),
        ));
    }

    Ok(files)
}
