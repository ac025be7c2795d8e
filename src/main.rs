//! sitemorse-panel: terminal panel surfacing Sitemorse page audits.

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sitemorse_panel::cli;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sitemorse-panel")]
#[command(version)]
#[command(about = "Live Sitemorse page audits beside your editor", long_about = None)]
#[command(after_help = "EXIT CODES (check):
    0  No findings in any category
    1  Findings were reported
    2  Service or configuration error

EXAMPLES:
    # Follow the editor through a host context file
    sitemorse-panel panel /run/cms/panel-context.json

    # One-shot audit for CI
    sitemorse-panel check https://www.example.com/about \\
        --service-url https://audit.sitemorse.example --token $SITEMORSE_TOKEN")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `panel` subcommand
#[derive(Parser)]
struct PanelArgs {
    /// Path to the context file written by the host editor
    context: PathBuf,

    /// Color theme (dark, light, high-contrast)
    #[arg(long)]
    theme: Option<String>,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Published page URL to audit
    url: String,

    /// Analysis service base URL
    #[arg(long, env = "SITEMORSE_URL")]
    service_url: String,

    /// Sitemorse licence token
    #[arg(long, env = "SITEMORSE_TOKEN", hide_env_values = true)]
    token: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive audit panel, following editor navigation
    Panel(PanelArgs),

    /// Fetch one report and print a summary (CI mode)
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps the alternate screen clean
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Panel(args) => cli::run_panel(cli::PanelCommandConfig {
            context_path: args.context,
            theme: args.theme,
        }),

        Commands::Check(args) => {
            let exit_code = cli::run_check(cli::CheckCommandConfig {
                url: args.url,
                token: args.token,
                service_url: args.service_url,
                timeout: Duration::from_secs(args.timeout),
            })?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "sitemorse-panel",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
