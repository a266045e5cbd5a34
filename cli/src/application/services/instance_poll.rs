//! Application service: fetch and classify one instance snapshot.
//!
//! No retries happen here; the start loop decides when to poll again.

use cf_common::Application;
use tracing::debug;

use crate::application::ports::ApplicationRepository;
use crate::domain::instance::PollOutcome;

/// Fetch the instances of `app` once and classify the result.
pub async fn poll(apps: &impl ApplicationRepository, app: &Application) -> PollOutcome {
    let outcome = PollOutcome::from_fetch(apps.instances(app).await);
    match &outcome {
        PollOutcome::Snapshot(snapshot) => {
            debug!(app = %app.name, instances = snapshot.instances().len(), "instance snapshot");
        }
        PollOutcome::NotYetStaged => debug!(app = %app.name, "app not staged yet"),
        PollOutcome::Fatal(err) => debug!(app = %app.name, code = %err.code, error = %err, "instance poll failed"),
    }
    outcome
}
