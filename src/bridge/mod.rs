//! Host bridge.
//!
//! The panel never talks to the editing host directly. It registers through
//! a bridge, which hands back the extension configuration (a JSON-encoded
//! string, see [`crate::config::PanelConfig`]) and the page the author has
//! open; afterwards the bridge reports navigation events. Registration
//! happens exactly once per process; a failed registration leaves the panel
//! non-functional.

mod file;

pub use file::{FileBridge, CODE_CONTEXT_MALFORMED, CODE_CONTEXT_MISSING, CODE_CONTEXT_UNREADABLE};

use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;
use crate::error::Result;

/// The page the author currently has open.
///
/// Replaced wholesale on every navigation; nothing of the previous page
/// survives into the next cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContext {
    /// Full preview URL of the page.
    pub url: String,
    /// Site-relative path of the page.
    pub path: String,
}

/// What a successful registration yields.
#[derive(Debug, Clone)]
pub struct HostSession {
    /// Decoded extension configuration.
    pub config: PanelConfig,
    /// The page open at registration time.
    pub page: PageContext,
}

/// Connection to the editing host.
pub trait HostBridge {
    /// Register the panel with the host. Errors here are
    /// [`crate::error::PanelError::Registration`] and terminal.
    fn register(&mut self) -> Result<HostSession>;

    /// Navigation events observed since the last call, oldest first.
    /// Quiet periods return an empty vec; this is polled from the UI tick.
    fn poll_navigation(&mut self) -> Vec<PageContext>;
}
