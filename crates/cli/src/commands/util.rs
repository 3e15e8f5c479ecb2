use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use memalias_core::analysis::DuplicatePolicy;
use memalias_core::config::{load_config, AnalysisConfig};
use memalias_core::report::{build_report, MemoryReport};
use memalias_core::snapshot::load_breakdown;
use serde::Serialize;
use tracing::debug;

use crate::{absolute_path, sha256_file};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub allocations: Vec<u64>,
    pub hide_bindings: bool,
    pub hex_offsets: bool,
    pub merge_duplicates: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if !self.allocations.is_empty() {
            config.allocations = self.allocations.clone();
        }
        if self.hide_bindings {
            config.show_bindings = false;
        }
        if self.hex_offsets {
            config.hex_offsets = true;
        }
        if self.merge_duplicates {
            config.duplicate_ids = DuplicatePolicy::Merge;
        }
        config
    }
}

/// Load the config file (or defaults) and apply command-line overrides.
pub fn resolve_config(config_path: Option<&str>, overrides: &ConfigOverrides) -> Result<AnalysisConfig> {
    let base = match config_path {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    let config = overrides.apply(base);
    debug!(?config, "resolved analysis config");
    Ok(config)
}

/// Everything a command needs after loading and analyzing a snapshot.
#[derive(Debug)]
pub struct LoadedReport {
    pub source: std::path::PathBuf,
    pub config: AnalysisConfig,
    pub report: MemoryReport,
}

/// Load the snapshot at `input` and build its report.
pub fn load_report(input: &str, config: AnalysisConfig) -> Result<LoadedReport> {
    let source = absolute_path(input)?;
    let breakdown = load_breakdown(&source)?;
    let report = build_report(&breakdown, &config)
        .with_context(|| format!("Failed to analyze snapshot {}", source.display()))?;
    Ok(LoadedReport { source, config, report })
}

/// JSON wrapper recording where a payload came from.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub source: String,
    pub source_sha256: String,
    pub generated_at: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn for_source(source: &Path, payload: T) -> Result<Self> {
        Ok(Self {
            source: source.display().to_string(),
            source_sha256: sha256_file(source)?,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            payload,
        })
    }
}
