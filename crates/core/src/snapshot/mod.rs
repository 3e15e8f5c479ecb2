//! Loading memory breakdown snapshots from disk.
//!
//! A snapshot is a [`MemoryBreakdown`] exported by whatever talks to the
//! capture service, stored as JSON or YAML.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::model::MemoryBreakdown;

/// On-disk encodings understood by [`load_breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick a format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Some(SnapshotFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a breakdown from an in-memory document.
pub fn parse_breakdown(body: &str, format: SnapshotFormat) -> Result<MemoryBreakdown> {
    let breakdown = match format {
        SnapshotFormat::Json => {
            serde_json::from_str(body).context("Failed to parse memory breakdown JSON")?
        }
        SnapshotFormat::Yaml => {
            serde_yaml::from_str(body).context("Failed to parse memory breakdown YAML")?
        }
    };
    Ok(breakdown)
}

/// Read and parse a breakdown snapshot, choosing the format by extension.
pub fn load_breakdown(path: impl AsRef<Path>) -> Result<MemoryBreakdown> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path).ok_or_else(|| {
        anyhow!("Unsupported snapshot format for {} (expected .json, .yaml or .yml)", path.display())
    })?;
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot at {}", path.display()))?;
    let breakdown = parse_breakdown(&body, format)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    debug!(path = %path.display(), allocations = breakdown.allocations.len(), "loaded snapshot");
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yml")), Some(SnapshotFormat::Yaml));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yaml")), Some(SnapshotFormat::Yaml));
        assert_eq!(SnapshotFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(SnapshotFormat::from_path(Path::new("noext")), None);
    }
}
