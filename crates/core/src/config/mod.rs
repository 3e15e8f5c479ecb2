use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{AliasOptions, DuplicatePolicy};

/// Serializable analysis and reporting configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
/// Frontends apply their own flags on top of a loaded config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Policy for bindings that share an identifier within one allocation.
    pub duplicate_ids: DuplicatePolicy,
    /// Include the per-allocation binding listing in reports.
    pub show_bindings: bool,
    /// Render offsets and sizes in hexadecimal.
    pub hex_offsets: bool,
    /// Only report these allocation handles. Empty means all.
    pub allocations: Vec<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicatePolicy::default(),
            show_bindings: true,
            hex_offsets: false,
            allocations: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn alias_options(&self) -> AliasOptions {
        AliasOptions { duplicate_ids: self.duplicate_ids }
    }

    /// Whether an allocation passes the handle filter.
    pub fn includes_allocation(&self, handle: u64) -> bool {
        self.allocations.is_empty() || self.allocations.contains(&handle)
    }
}

/// Load an [`AnalysisConfig`] from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config: AnalysisConfig = serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse config JSON at {}", path.display()))?;
    Ok(config)
}
