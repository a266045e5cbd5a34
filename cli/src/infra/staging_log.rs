//! Cloud Controller implementation of the `StagingLogRepository` port.

use cf_common::ApiError;

use crate::application::ports::{LogStream, StagingLogRepository};
use crate::infra::gateway::CloudControllerGateway;

pub struct CloudControllerStagingLogRepository {
    gateway: CloudControllerGateway,
}

impl CloudControllerStagingLogRepository {
    #[must_use]
    pub fn new(gateway: CloudControllerGateway) -> Self {
        Self { gateway }
    }
}

impl StagingLogRepository for CloudControllerStagingLogRepository {
    async fn stream_log(&self, log_url: &str) -> Result<LogStream, ApiError> {
        self.gateway.get_stream(log_url).await
    }
}
