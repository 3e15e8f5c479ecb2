use anyhow::Result;
use clap::{Parser, Subcommand};
use memalias::commands::{aliases_command, report_command, version_command, ConfigOverrides};
use memalias::logging::init_tracing;

/// Memory-binding aliasing detector.
///
/// This CLI is a thin wrapper around `memalias-core` (exposed in code as
/// `memalias_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "memalias",
    version,
    about = "Report memory allocations and the ranges where their bindings alias",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every allocation in a snapshot with its bindings and aliased regions.
    ///
    /// The snapshot is a memory breakdown exported as `.json`, `.yaml` or `.yml`.
    Report {
        /// Path to the memory breakdown snapshot.
        #[arg(long, short)]
        input: String,

        /// Optional analysis config (JSON). Flags below override it.
        #[arg(long)]
        config: Option<String>,

        /// Only report these allocation handles (repeatable).
        #[arg(long = "allocation")]
        allocations: Vec<u64>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Omit the per-allocation binding listing.
        #[arg(long, default_value_t = false)]
        no_bindings: bool,

        /// Render offsets and sizes in hexadecimal.
        #[arg(long, default_value_t = false)]
        hex: bool,

        /// Treat bindings sharing an id as one binding instead of failing.
        #[arg(long, default_value_t = false)]
        merge_duplicates: bool,
    },

    /// Print only the aliased regions of each allocation in a snapshot.
    Aliases {
        /// Path to the memory breakdown snapshot.
        #[arg(long, short)]
        input: String,

        /// Optional analysis config (JSON). Flags below override it.
        #[arg(long)]
        config: Option<String>,

        /// Only report these allocation handles (repeatable).
        #[arg(long = "allocation")]
        allocations: Vec<u64>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Render offsets and sizes in hexadecimal.
        #[arg(long, default_value_t = false)]
        hex: bool,

        /// Treat bindings sharing an id as one binding instead of failing.
        #[arg(long, default_value_t = false)]
        merge_duplicates: bool,
    },

    /// Print the CLI and core library versions.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Report {
            input,
            config,
            allocations,
            json,
            no_bindings,
            hex,
            merge_duplicates,
        } => {
            let overrides = ConfigOverrides {
                allocations,
                hide_bindings: no_bindings,
                hex_offsets: hex,
                merge_duplicates,
            };
            report_command(&input, config.as_deref(), &overrides, json)?
        }
        Command::Aliases { input, config, allocations, json, hex, merge_duplicates } => {
            let overrides = ConfigOverrides {
                allocations,
                hide_bindings: true,
                hex_offsets: hex,
                merge_duplicates,
            };
            aliases_command(&input, config.as_deref(), &overrides, json)?
        }
        Command::Version => version_command()?,
    }

    Ok(())
}
