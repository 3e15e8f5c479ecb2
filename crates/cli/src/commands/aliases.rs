use anyhow::{Context, Result};
use memalias_core::analysis::AliasRegion;
use memalias_core::report::MemoryReport;
use serde::Serialize;

use crate::commands::{load_report, render_aliases, resolve_config, ConfigOverrides, Envelope, RenderOptions};

/// Aliased regions of one allocation, as emitted by `aliases --json`.
#[derive(Debug, Serialize)]
pub struct AllocationAliases {
    pub handle: u64,
    pub name: String,
    pub aliases: Vec<AliasRegion>,
}

#[derive(Debug, Serialize)]
pub struct AliasesPayload {
    pub total_aliases: usize,
    pub allocations: Vec<AllocationAliases>,
}

impl AliasesPayload {
    pub fn from_report(report: &MemoryReport) -> Self {
        let allocations = report
            .allocations
            .iter()
            .map(|a| AllocationAliases {
                handle: a.handle,
                name: a.name.clone(),
                aliases: a.aliases.clone(),
            })
            .collect();
        Self { total_aliases: report.total_aliases(), allocations }
    }
}

/// Print only the aliased regions of each allocation in a snapshot.
pub fn aliases_command(
    input: &str,
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    json: bool,
) -> Result<()> {
    let config = resolve_config(config_path, overrides)?;
    let loaded = load_report(input, config)?;

    if json {
        let envelope = Envelope::for_source(&loaded.source, AliasesPayload::from_report(&loaded.report))?;
        let serialized =
            serde_json::to_string_pretty(&envelope).context("Failed to serialize aliases to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    if loaded.report.allocations.is_empty() {
        println!("Allocations: (none)");
        return Ok(());
    }

    let options = RenderOptions { show_bindings: false, hex_offsets: loaded.config.hex_offsets };
    print!("{}", render_aliases(&loaded.report, &options));
    Ok(())
}
