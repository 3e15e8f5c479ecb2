use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub mod commands;
pub mod logging;

/// Resolve `path` to an absolute path, canonicalizing when it exists and
/// otherwise joining it onto the current working directory.
pub fn absolute_path(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}

/// Hex SHA-256 digest of the snapshot at `path`, recorded in JSON output so
/// a report can be matched to the exact file it was built from.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut snapshot = fs::File::open(path)
        .with_context(|| format!("Failed to open snapshot for hashing: {}", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut snapshot, &mut hasher)
        .with_context(|| format!("Failed to read snapshot for hashing: {}", path.display()))?;
    Ok(hex_digest(&hasher.finalize()))
}

fn hex_digest(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
