//! Panel configuration supplied by the host.
//!
//! The host hands the extension its settings as a JSON-encoded *string*
//! (not an object) embedded in the registration payload, so decoding is a
//! two-step affair: pull the string out of the context document, then parse
//! it here. Field names follow the host's camelCase keys.

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};

/// Settings for one panel session.
///
/// Every field defaults to the empty string; whether that is workable is
/// decided per audit cycle (see [`PanelConfig::require_token`]), not at
/// registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    /// Base URL of the Sitemorse audit service.
    pub sitemorse_url: String,
    /// Mount prefix spliced into resolved URLs (often empty).
    pub preview_mount_name: String,
    /// Auth token sent with every report request.
    pub sitemorse_token: String,
}

impl PanelConfig {
    /// Decode the host's JSON-encoded configuration string.
    ///
    /// Unknown keys are ignored; missing keys default to `""`.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| PanelError::config(format!("unreadable extension config: {e}")))
    }

    /// The token, or a `Config` error when it is empty.
    ///
    /// Called at the start of each audit cycle; an empty token ends the
    /// cycle before any request is made.
    pub fn require_token(&self) -> Result<&str> {
        if self.sitemorse_token.is_empty() {
            return Err(PanelError::config(
                "no Sitemorse token found in the configuration",
            ));
        }
        Ok(&self.sitemorse_token)
    }
}
