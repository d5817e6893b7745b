use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error};

use bgproc_console::{ConsoleConfig, ConsoleContext};
use bgproc_process_management::OsFamily;

mod commands;

/// bgproc - spawn, inspect and kill detached background processes by uid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Application root directory (overrides config)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Command and its arguments, e.g. `spawn worker1 /usr/bin/myd --flag`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConsoleConfig::load_from_file(path)?,
        None => ConsoleConfig::default(),
    };

    // Override root if specified
    if let Some(root) = &args.root {
        config.root_directory = Some(root.display().to_string());
    }

    initialize_logging(args.debug, &config.log_level)?;

    let os_family = OsFamily::detect();
    debug!("Detected platform family: {}", os_family);

    let program = std::env::args().next().unwrap_or_else(|| "bgproc".to_string());
    let mut argv = vec![program];
    argv.extend(args.command);

    let mut context = ConsoleContext::from_config(&config, argv)?;
    commands::register_all(&mut context, os_family);

    let status = match context.run() {
        Ok(status) => status,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            e.exit_code()
        }
    };

    std::process::exit(os_exit_code(status));
}

/// Statuses without an explicit code must not look like success to the
/// shell once truncated to a byte.
fn os_exit_code(status: i32) -> i32 {
    if status == bgproc_console::MISSING_EXIT_CODE {
        1
    } else {
        status
    }
}

fn initialize_logging(debug: bool, configured_level: &str) -> Result<()> {
    let level = if debug { "debug" } else { configured_level };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
