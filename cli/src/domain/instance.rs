//! Instance snapshots and the per-tick classification used by `cf start`.
//!
//! Everything here is a pure function of one poll result: the orchestrator
//! feeds each [`PollOutcome`] through [`classify`] and acts on the returned
//! [`TickDecision`].

use cf_common::{ApiError, ApplicationInstance, InstanceState};

use crate::domain::error::StartFailure;

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// One consistent read of all instance states of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceSnapshot {
    instances: Vec<ApplicationInstance>,
}

impl InstanceSnapshot {
    #[must_use]
    pub fn new(instances: Vec<ApplicationInstance>) -> Self {
        Self { instances }
    }

    #[must_use]
    pub fn instances(&self) -> &[ApplicationInstance] {
        &self.instances
    }

    /// Aggregate counts, computed fresh on every call.
    #[must_use]
    pub fn counts(&self) -> InstanceCounts {
        let mut counts = InstanceCounts {
            total: self.instances.len(),
            ..InstanceCounts::default()
        };
        for instance in &self.instances {
            match instance.state {
                InstanceState::Running => counts.running += 1,
                InstanceState::Starting => counts.starting += 1,
                InstanceState::Down => counts.down += 1,
                InstanceState::Flapping => counts.flapping += 1,
                InstanceState::Unknown(_) => {}
            }
        }
        counts
    }
}

/// Per-state instance counts of a snapshot.
///
/// `total` can be below the desired count while the platform is still
/// allocating instances; that alone is not a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceCounts {
    pub running: usize,
    pub starting: usize,
    pub down: usize,
    pub flapping: usize,
    pub total: usize,
}

impl InstanceCounts {
    /// Render `"<running> of <desired> instances running (<breakdown>)"`.
    ///
    /// The breakdown lists the non-zero categories among starting, down and
    /// flapping, in that order. It is omitted when all of them are zero.
    #[must_use]
    pub fn status_line(&self, desired: u32) -> String {
        let mut line = format!("{} of {desired} instances running", self.running);
        let breakdown: Vec<String> = [
            (self.starting, "starting"),
            (self.down, "down"),
            (self.flapping, "flapping"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {label}"))
        .collect();
        if !breakdown.is_empty() {
            line.push_str(&format!(" ({})", breakdown.join(", ")));
        }
        line
    }

    #[must_use]
    pub fn all_running(&self, desired: u32) -> bool {
        desired > 0 && self.running == desired as usize
    }
}

// ── Poll classification ───────────────────────────────────────────────────────

/// Result of one instance fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Snapshot(InstanceSnapshot),
    /// The platform has no instances yet because staging is still running.
    NotYetStaged,
    Fatal(ApiError),
}

impl PollOutcome {
    /// Classify a remote fetch result. Error code 170002 is expected while
    /// staging; every other error is fatal.
    #[must_use]
    pub fn from_fetch(result: Result<Vec<ApplicationInstance>, ApiError>) -> Self {
        match result {
            Ok(instances) => Self::Snapshot(InstanceSnapshot::new(instances)),
            Err(err) if err.is_not_staged() => Self::NotYetStaged,
            Err(err) => Self::Fatal(err),
        }
    }
}

/// Non-terminal phase of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPhase {
    /// No instance has been reported yet.
    Staging,
    /// Instances exist but are not all running.
    Monitoring,
}

/// What the poll loop should do after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Continue(StartPhase),
    Succeeded,
    Failed(StartFailure),
}

/// Outcome of classifying one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickDecision {
    /// Instance count line to print for this tick, if any.
    pub status_line: Option<String>,
    pub verdict: Verdict,
}

/// Classify a poll outcome against the desired instance count.
///
/// A flapping instance fails the start even when every other instance is
/// running.
#[must_use]
pub fn classify(outcome: &PollOutcome, desired: u32) -> TickDecision {
    match outcome {
        PollOutcome::NotYetStaged => TickDecision {
            status_line: None,
            verdict: Verdict::Continue(StartPhase::Staging),
        },
        PollOutcome::Fatal(err) if err.is_staging_error() => TickDecision {
            status_line: None,
            verdict: Verdict::Failed(StartFailure::Staging(err.clone())),
        },
        PollOutcome::Fatal(err) => TickDecision {
            status_line: None,
            verdict: Verdict::Failed(StartFailure::Remote(err.clone())),
        },
        PollOutcome::Snapshot(snapshot) => {
            let counts = snapshot.counts();
            let verdict = if counts.flapping > 0 {
                Verdict::Failed(StartFailure::Flapping)
            } else if counts.all_running(desired) {
                Verdict::Succeeded
            } else {
                Verdict::Continue(StartPhase::Monitoring)
            };
            TickDecision {
                status_line: Some(counts.status_line(desired)),
                verdict,
            }
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
