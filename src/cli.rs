//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs: `panel` runs the interactive
//! TUI against a host context file, `check` fetches one report and
//! prints a summary for scripting.

use crate::bridge::{FileBridge, HostBridge};
use crate::client::{SitemorseClient, SitemorseClientConfig};
use crate::config::PanelConfig;
use crate::report::Category;
use crate::resolve::ensure_https;
use crate::session::PanelSession;
use crate::tui::{run_panel_tui, set_theme, Theme};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;

/// Exit codes for the `check` subcommand
pub mod exit_codes {
    /// No findings in any category
    pub const CLEAN: i32 = 0;
    /// At least one finding was reported
    pub const FINDINGS: i32 = 1;
    /// The service could not be queried
    pub const ERROR: i32 = 2;
}

/// Configuration for the `panel` subcommand
pub struct PanelCommandConfig {
    /// Path to the context file the host editor writes
    pub context_path: PathBuf,
    /// Theme name override (dark, light, high-contrast)
    pub theme: Option<String>,
}

/// Run the interactive panel against a host context file.
pub fn run_panel(config: PanelCommandConfig) -> Result<()> {
    if let Some(name) = &config.theme {
        set_theme(Theme::from_name(name));
    }

    let mut bridge = FileBridge::new(config.context_path);
    let host = bridge.register().map_err(|err| {
        error!(error = %err, "panel startup aborted");
        err
    })?;

    let mut session = PanelSession::new(host.config)?;
    session.start_cycle(host.page);

    run_panel_tui(&mut bridge, &mut session).context("terminal failure")?;
    Ok(())
}

/// Configuration for the `check` subcommand
pub struct CheckCommandConfig {
    /// Published page URL to audit
    pub url: String,
    /// Sitemorse licence token
    pub token: String,
    /// Analysis service base URL
    pub service_url: String,
    /// Request timeout
    pub timeout: Duration,
}

/// Fetch one report and print a category summary to stdout.
///
/// Returns the process exit code instead of printing and exiting so the
/// handler stays testable.
pub fn run_check(config: CheckCommandConfig) -> Result<i32> {
    let panel_config = PanelConfig {
        sitemorse_url: config.service_url.clone(),
        sitemorse_token: config.token.clone(),
        ..PanelConfig::default()
    };
    if let Err(err) = panel_config.require_token() {
        eprintln!("error: {err}");
        return Ok(exit_codes::ERROR);
    }

    let mut client_config = SitemorseClientConfig::new(config.service_url);
    client_config.timeout = config.timeout;
    let client = SitemorseClient::new(client_config)?;

    let target = ensure_https(config.url);
    let report = match client.fetch_report(&target, &config.token) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_codes::ERROR);
        }
    };

    println!("{target}");
    for category in Category::ALL {
        let group = report.group(category);
        if group.is_empty() {
            println!("  {}: clean", category.label());
        } else {
            println!("  {}: {} finding(s)", category.label(), group.len());
            for diag in group {
                println!("    - {} ({}x)", diag.title, diag.total);
            }
        }
    }
    if !report.report_url.is_empty() {
        println!("full report: {}", report.report_url);
    }

    Ok(if report.is_clean() {
        exit_codes::CLEAN
    } else {
        exit_codes::FINDINGS
    })
}
