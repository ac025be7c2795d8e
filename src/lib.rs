//! **Live Sitemorse page audits beside your editor.**
//!
//! `sitemorse-panel` follows a CMS editing session and keeps a terminal
//! panel in sync with the page being edited: every navigation resolves the
//! page's published URL, fetches a fresh audit from the Sitemorse analysis
//! service, and renders the findings as three collapsible category
//! sections (SEO, GRC, UX).
//!
//! The editor side stays host-agnostic. A host bridge delivers the
//! extension configuration and page navigations; the bundled
//! [`bridge::FileBridge`] watches a JSON context file that the host
//! rewrites on each navigation, so any editor that can write a file can
//! drive the panel.
//!
//! ## Core modules
//!
//! - **[`bridge`]**: the [`bridge::HostBridge`] trait plus the file-based
//!   implementation, including registration error codes.
//! - **[`resolve`]**: maps a preview URL to the published URL that gets
//!   audited.
//! - **[`client`]**: blocking HTTP client for the analysis service.
//! - **[`report`]**: lenient wire parsing into [`report::AnalysisReport`].
//! - **[`session`]**: the fetch lifecycle; one cycle per navigation, with
//!   stale responses discarded.
//! - **[`tui`]**: the ratatui panel itself.
//!
//! ## Fetching a report programmatically
//!
//! ```no_run
//! use sitemorse_panel::client::{SitemorseClient, SitemorseClientConfig};
//! use sitemorse_panel::report::Category;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SitemorseClientConfig::new("https://audit.sitemorse.example");
//!     let client = SitemorseClient::new(config)?;
//!
//!     let report = client.fetch_report("https://www.example.com/about", "licence-token")?;
//!     for category in Category::ALL {
//!         println!("{}: {} finding(s)", category.label(), report.group(category).len());
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: u16/usize casts are pervasive in TUI layout math and
    // all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines
)]

pub mod bridge;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod resolve;
pub mod session;
pub mod tui;

// Re-export main types for convenience
pub use bridge::{FileBridge, HostBridge, HostSession, PageContext};
pub use client::{SitemorseClient, SitemorseClientConfig};
pub use config::PanelConfig;
pub use error::{PanelError, Result};
pub use report::{AnalysisReport, Category, Diagnostic};
pub use resolve::{ensure_https, resolve_audit_url};
pub use session::{CycleFailure, CycleState, FailureKind, PanelSession};
