//! Application service: application start use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use cf_common::Application;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::application::ports::{ApplicationRepository, StagingLogRepository, StartReporter};
use crate::application::services::{instance_poll, staging_log};
use crate::domain::error::StartFailure;
use crate::domain::instance::{InstanceSnapshot, PollOutcome, StartPhase, Verdict, classify};

/// Delay between two instance polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long a still-running staging log copy may hold up the terminal line.
pub const LOG_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Timing knobs for one `cf start` invocation.
#[derive(Debug, Clone, Copy)]
pub struct StartOptions {
    /// Measured from the moment the start request is accepted.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl StartOptions {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Successful outcomes of the `start_application` use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The app was already started; nothing was sent to the platform.
    AlreadyStarted,
    /// Every desired instance is running.
    Started { url: Option<String> },
}

/// Working state of one start invocation.
struct StartSession<'a> {
    app: &'a Application,
    deadline: Instant,
    phase: StartPhase,
    ticks: u32,
    last_snapshot: Option<InstanceSnapshot>,
}

impl<'a> StartSession<'a> {
    fn begin(app: &'a Application, timeout: Duration) -> Self {
        Self {
            app,
            deadline: Instant::now() + timeout,
            phase: StartPhase::Staging,
            ticks: 0,
            last_snapshot: None,
        }
    }

    fn record(&mut self, outcome: PollOutcome) {
        self.ticks += 1;
        if let PollOutcome::Snapshot(snapshot) = outcome {
            self.last_snapshot = Some(snapshot);
        }
    }

    fn advance(&mut self, phase: StartPhase) {
        if phase != self.phase {
            debug!(app = %self.app.name, from = ?self.phase, to = ?phase, "start phase changed");
        }
        self.phase = phase;
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    fn timed_out(&self) -> StartFailure {
        info!(
            app = %self.app.name,
            ticks = self.ticks,
            last = ?self.last_snapshot.as_ref().map(InstanceSnapshot::counts),
            "start timed out"
        );
        StartFailure::Timeout
    }
}

/// Start `app` and wait until all of its instances are running.
///
/// Prints the whole transcript through `reporter`, ending with exactly one
/// terminal line: the start confirmation, `is already started`, or `FAILED`
/// with the reason. The staging log is copied concurrently and may interleave
/// with instance status lines; a log that is slow to open or never ends does
/// not delay polling, and is given [`LOG_DRAIN_GRACE`] after the last poll.
///
/// # Errors
///
/// Returns a [`StartFailure`] if the start request is rejected, staging
/// fails, an instance flaps, polling fails, or the timeout elapses.
pub async fn start_application<R>(
    apps: &impl ApplicationRepository,
    logs: &impl StagingLogRepository,
    reporter: &R,
    app: &Application,
    opts: StartOptions,
) -> Result<StartOutcome, StartFailure>
where
    R: StartReporter + ?Sized,
{
    if app.is_started() {
        reporter.say(&format!("App {} is already started", app.name));
        return Ok(StartOutcome::AlreadyStarted);
    }

    reporter.say(&format!("Starting app {}...", app.name));
    let log_url = match apps.start(app).await {
        Ok(url) => url,
        Err(detail) => {
            let failure = StartFailure::StartRequest {
                app: app.name.clone(),
                detail,
            };
            reporter.failed(&failure.to_string());
            return Err(failure);
        }
    };
    reporter.ok();

    let copy = async {
        if let Some(url) = log_url.as_deref() {
            staging_log::follow(logs, url, reporter).await;
        }
    };
    let watch = watch_instances(apps, reporter, app, opts);
    tokio::pin!(copy, watch);

    let mut copying = true;
    let result = loop {
        tokio::select! {
            result = &mut watch => break result,
            () = &mut copy, if copying => copying = false,
        }
    };
    if copying {
        staging_log::settle(copy, LOG_DRAIN_GRACE).await;
    }
    match &result {
        Ok(StartOutcome::Started { url: Some(url) }) => {
            reporter.say(&format!("Started: app {} available at {url}", app.name));
        }
        Ok(_) => reporter.say("Started"),
        Err(failure) => {
            if let StartFailure::Staging(detail) = failure {
                debug!(app = %app.name, error = %detail, "staging failed");
            }
            reporter.failed(&failure.to_string());
        }
    }
    info!(app = %app.name, ok = result.is_ok(), "start finished");
    result
}

/// Poll instance state once per tick until a terminal verdict or the deadline.
async fn watch_instances<R>(
    apps: &impl ApplicationRepository,
    reporter: &R,
    app: &Application,
    opts: StartOptions,
) -> Result<StartOutcome, StartFailure>
where
    R: StartReporter + ?Sized,
{
    let mut session = StartSession::begin(app, opts.timeout);
    loop {
        let poll = instance_poll::poll(apps, app);
        let Ok(outcome) = tokio::time::timeout_at(session.deadline, poll).await else {
            return Err(session.timed_out());
        };
        let decision = classify(&outcome, app.instances);
        session.record(outcome);

        if let Some(line) = &decision.status_line {
            reporter.say(line);
        }

        match decision.verdict {
            Verdict::Succeeded => {
                return Ok(StartOutcome::Started {
                    url: app.urls.first().cloned(),
                });
            }
            Verdict::Failed(failure) => return Err(failure),
            Verdict::Continue(phase) => session.advance(phase),
        }

        if session.is_expired() {
            return Err(session.timed_out());
        }
        tokio::time::sleep(opts.poll_interval).await;
    }
}
