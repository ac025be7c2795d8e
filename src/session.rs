//! Audit cycle engine.
//!
//! One navigation starts one cycle: resolve the production URL, ask the
//! service, show the outcome. The fetch runs on a background thread so the
//! panel stays responsive; a monotonically increasing sequence number
//! decides which outcome may land. When the author navigates again before
//! the previous answer arrives, the older outcome is discarded on arrival;
//! the page navigated to last always wins.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::bridge::PageContext;
use crate::client::{SitemorseClient, SitemorseClientConfig};
use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use crate::report::AnalysisReport;
use crate::resolve::resolve_audit_url;

/// Where the current cycle stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CycleState {
    /// No navigation seen yet.
    #[default]
    Idle,
    /// A fetch is in flight; the loading modal is up.
    Loading,
    /// The report arrived and is on display.
    Ready(AnalysisReport),
    /// The cycle failed; the error panel is up.
    Failed(CycleFailure),
}

impl CycleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CycleState::Loading)
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            CycleState::Ready(report) => Some(report),
            _ => None,
        }
    }
}

/// Why a cycle failed, pre-split for the error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The configuration cannot drive a cycle; no request was made.
    Config,
    /// The service could not be reached or answered garbage.
    Network,
}

/// User-facing failure for the error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&PanelError> for CycleFailure {
    fn from(err: &PanelError) -> Self {
        let kind = if err.is_config() {
            FailureKind::Config
        } else {
            FailureKind::Network
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Outcome of one background fetch, tagged with its cycle sequence.
#[derive(Debug)]
struct CycleOutcome {
    seq: u64,
    result: std::result::Result<AnalysisReport, PanelError>,
}

/// Drives audit cycles for one registered panel.
pub struct PanelSession {
    config: PanelConfig,
    client: Arc<SitemorseClient>,
    state: CycleState,
    /// Sequence of the latest dispatched cycle; outcomes carrying anything
    /// older are superseded and dropped.
    seq: u64,
    page: Option<PageContext>,
    target_url: Option<String>,
    tx: Sender<CycleOutcome>,
    rx: Receiver<CycleOutcome>,
}

impl PanelSession {
    /// Build a session from registered configuration.
    pub fn new(config: PanelConfig) -> Result<Self> {
        let client = SitemorseClient::new(SitemorseClientConfig::new(&config.sitemorse_url))?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            config,
            client: Arc::new(client),
            state: CycleState::Idle,
            seq: 0,
            page: None,
            target_url: None,
            tx,
            rx,
        })
    }

    /// Start a new audit cycle for a freshly navigated page.
    ///
    /// Supersedes any cycle still in flight. An empty token ends the cycle
    /// right here, before any request exists to send.
    pub fn start_cycle(&mut self, page: PageContext) {
        self.seq += 1;
        let seq = self.seq;

        let target = resolve_audit_url(&page, &self.config.preview_mount_name);
        info!(seq, url = %target, "analyzing URL");
        self.page = Some(page);
        self.target_url = Some(target.clone());

        let token = match self.config.require_token() {
            Ok(token) => token.to_string(),
            Err(err) => {
                warn!(error = %err, "cycle ended before any request");
                self.state = CycleState::Failed(CycleFailure::from(&err));
                return;
            }
        };

        self.state = CycleState::Loading;
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.fetch_report(&target, &token);
            // The receiver is gone during shutdown; nothing to do then.
            let _ = tx.send(CycleOutcome { seq, result });
        });
    }

    /// Apply any finished fetches. Returns true when the visible state
    /// changed. Called from the UI tick.
    pub fn poll_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    fn apply_outcome(&mut self, outcome: CycleOutcome) -> bool {
        if outcome.seq != self.seq {
            debug!(
                outcome = outcome.seq,
                latest = self.seq,
                "discarding superseded outcome"
            );
            return false;
        }
        self.state = match outcome.result {
            Ok(report) => {
                info!(findings = report.total_diagnostics(), "report applied");
                CycleState::Ready(report)
            }
            Err(err) => {
                warn!(error = %err, "audit cycle failed");
                CycleState::Failed(CycleFailure::from(&err))
            }
        };
        true
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// The page of the latest cycle.
    pub fn page(&self) -> Option<&PageContext> {
        self.page.as_ref()
    }

    /// The resolved URL the latest cycle targets.
    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_deref()
    }

    pub fn service_url(&self) -> &str {
        self.client.service_url()
    }
}
