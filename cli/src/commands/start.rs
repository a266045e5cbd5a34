//! `cf start`: start an app and wait until its instances are running.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ApplicationRepository, StartReporter};
use crate::application::services::app_start::{self as service, StartOptions};
use crate::application::services::config_service;
use crate::infra::app_repo::CloudControllerApplicationRepository;
use crate::infra::gateway::CloudControllerGateway;
use crate::infra::staging_log::CloudControllerStagingLogRepository;

/// Arguments for the start command.
#[derive(Args)]
pub struct StartArgs {
    /// Name of the app to start
    pub app_name: String,
}

/// Run `cf start`.
///
/// Classified failures (app not found, start rejected, staging failed,
/// flapping, timeout) are printed as `FAILED` and turn into a failing exit
/// code rather than an error.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, no space is
/// targeted, or the HTTP client cannot be built.
pub async fn run(args: &StartArgs, app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let space_guid = config.space_guid()?;
    let gateway = CloudControllerGateway::new(&config)?;
    let apps = CloudControllerApplicationRepository::new(gateway.clone(), space_guid);
    let logs = CloudControllerStagingLogRepository::new(gateway);
    let reporter = app.output.reporter();

    let application = match apps.find_by_name(&args.app_name).await {
        Ok(application) => application,
        Err(err) => {
            reporter.failed(&err.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };

    let opts = StartOptions::new(config.start_timeout());
    match service::start_application(&apps, &logs, &reporter, &application, opts).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
