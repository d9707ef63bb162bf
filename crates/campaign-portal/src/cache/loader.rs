//! Initial load with a bounded connectivity retry.

use std::time::Duration;
use tracing::{info, warn};

use super::state::PortalState;
use crate::backend::PortalBackend;
use crate::error::Result;

/// How the initial load retries a failed probe or fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one is always made
    pub attempts: u32,
    /// Fixed pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Result of the initial load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        campaigns: usize,
        submissions: usize,
        attempts: u32,
    },
    /// Every attempt failed; the cache continues with empty collections
    Degraded { attempts: u32, last_error: String },
}

impl LoadOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOutcome::Degraded { .. })
    }
}

async fn load_once(backend: &dyn PortalBackend) -> Result<PortalState> {
    backend.ping().await?;
    let campaigns = backend.fetch_campaigns().await?;
    let submissions = backend.fetch_submissions().await?;
    Ok(PortalState {
        campaigns,
        submissions,
    })
}

/// Probe the backend until it answers or the policy runs out.
///
/// Returns the number of attempts used.
pub(crate) async fn probe(backend: &dyn PortalBackend, policy: &RetryPolicy) -> Result<u32> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match backend.ping().await {
            Ok(()) => return Ok(attempt),
            Err(e) if attempt < attempts => {
                warn!(attempt, attempts, error = %e, "Connection check failed, retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Load both tables, retrying the whole probe-and-fetch sequence.
pub(crate) async fn load(backend: &dyn PortalBackend, policy: &RetryPolicy) -> (PortalState, LoadOutcome) {
    let attempts = policy.attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match load_once(backend).await {
            Ok(state) => {
                info!(
                    attempt,
                    campaigns = state.campaigns.len(),
                    submissions = state.submissions.len(),
                    "Portal data loaded"
                );
                let outcome = LoadOutcome::Loaded {
                    campaigns: state.campaigns.len(),
                    submissions: state.submissions.len(),
                    attempts: attempt,
                };
                return (state, outcome);
            }
            Err(e) => {
                warn!(attempt, attempts, transient = e.is_transient(), error = %e, "Initial load failed");
                last_error = e.to_string();
                if attempt < attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    warn!(attempts, "Giving up on initial load, continuing with empty data");
    (
        PortalState::default(),
        LoadOutcome::Degraded {
            attempts,
            last_error,
        },
    )
}
