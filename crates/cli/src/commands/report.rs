use anyhow::{Context, Result};
use tracing::info;

use crate::commands::{load_report, render_report, resolve_config, ConfigOverrides, Envelope, RenderOptions};

/// Print the full memory report for a snapshot.
pub fn report_command(
    input: &str,
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    json: bool,
) -> Result<()> {
    let config = resolve_config(config_path, overrides)?;
    let loaded = load_report(input, config)?;
    info!(
        source = %loaded.source.display(),
        allocations = loaded.report.allocations.len(),
        "report ready"
    );

    if json {
        let envelope = Envelope::for_source(&loaded.source, &loaded.report)?;
        let serialized =
            serde_json::to_string_pretty(&envelope).context("Failed to serialize report to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    let options = RenderOptions {
        show_bindings: loaded.config.show_bindings,
        hex_offsets: loaded.config.hex_offsets,
    };
    print!("{}", render_report(&loaded.report, &options));
    Ok(())
}
