// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use lattice_validator::output::{write_human, write_json};
use lattice_validator::{RegistryConfig, ResourceType, ValidationReport, validate_all_plugins};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

/// Validate Lattice resource READMEs.
#[derive(Debug, Parser)]
#[command(name = "lattice-validator", version, about)]
struct Cli {
    /// Repository root containing the `registry/` directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Exclude READMEs matching this glob (repeatable).
    #[arg(long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Follow symbolic links while discovering READMEs.
    #[arg(long)]
    follow_links: bool,

    /// Maximum README size in bytes.
    #[arg(long, default_value_t = 10_485_760)]
    max_file_size: u64,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Verbosity (-v for debug, -vv for trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let mut config = RegistryConfig::new(&cli.root);
    config.exclude.clone_from(&cli.exclude);
    config.follow_links = cli.follow_links;
    config.max_file_size = cli.max_file_size;

    let outcome = validate_all_plugins(&config);
    let report = ValidationReport::from_outcome(ResourceType::Plugins, &outcome);

    let mut stdout = io::stdout().lock();
    match cli.format {
        OutputFormat::Human => write_human(&report, &mut stdout)?,
        OutputFormat::Json => write_json(&report, &mut stdout)?,
    }

    if let Err(err) = &outcome {
        tracing::debug!(error = %err, "validation failed");
    }
    Ok(report.ok)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("{}", "README validation failed".red().bold());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            std::process::exit(2);
        }
    }
}
