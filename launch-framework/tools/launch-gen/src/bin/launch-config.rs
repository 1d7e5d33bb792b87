use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use launch_framework_env as lf_env;
use launch_gen::{GenerateOptions, OutputFormat, generate, render, write_output};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(about = "Generate a launch configuration for a local relay chain and its parachains")]
struct Args {
    /// YAML fleet definition (defaults to `LAUNCH_CONFIG_FILE`, then the imbue
    /// development fleet).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON document here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Root directory for node base paths (defaults to
    /// `POLKADOT_LAUNCH_BASE_PATH_BASE`).
    #[arg(long)]
    base_path_root: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

fn init_tracing() {
    let filter = lf_env::rust_log().map_or_else(|| EnvFilter::new("info"), EnvFilter::new);
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Args::parse();

    let options = GenerateOptions {
        config: cli.config,
        base_path_root: cli.base_path_root,
    }
    .or(GenerateOptions::from_env());

    let config = generate(&options).context("failed to generate launch configuration")?;

    let format = if cli.compact {
        OutputFormat::Compact
    } else {
        OutputFormat::Pretty
    };
    let rendered = render(&config, format).context("failed to serialize launch configuration")?;

    write_output(&rendered, cli.output.as_deref()).with_context(|| match &cli.output {
        Some(path) => format!("failed to write launch configuration to {}", path.display()),
        None => "failed to write launch configuration to stdout".to_owned(),
    })?;

    Ok(())
}
