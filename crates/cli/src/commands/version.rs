use anyhow::Result;

/// Print the CLI and core library versions.
pub fn version_command() -> Result<()> {
    println!("memalias v{}", env!("CARGO_PKG_VERSION"));
    println!("memalias-core v{}", memalias_core::version());
    Ok(())
}
