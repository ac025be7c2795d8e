//! Unified error types for sitemorse-panel.
//!
//! Three failure classes reach the user: configuration problems (no token),
//! service problems (anything network-shaped), and bridge registration
//! problems at startup. Everything else is plumbing IO.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for panel operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PanelError {
    /// The configuration cannot drive an audit cycle (e.g. missing token).
    /// Raised before any network traffic.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Any failure talking to the audit service. Connection refusal,
    /// timeouts, bad statuses and unparseable bodies all land here; the
    /// panel does not distinguish between them.
    #[error("unable to access the Sitemorse service at {service_url}: {message}")]
    Network {
        service_url: String,
        message: String,
    },

    /// Host bridge registration failed at startup. The panel stays
    /// non-functional; `code` is the bridge's stable error code.
    #[error("failed to register the panel ({code}): {message}")]
    Registration { code: String, message: String },

    /// IO errors with path context.
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenient Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

impl PanelError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a network error tied to the service URL it targeted.
    pub fn network(service_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            service_url: service_url.into(),
            message: message.into(),
        }
    }

    /// Create a registration error with the bridge's error code.
    pub fn registration(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registration {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// True when the error means "fix your configuration", not "retry".
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for PanelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
