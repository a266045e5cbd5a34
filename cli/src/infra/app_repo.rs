//! Cloud Controller implementation of the `ApplicationRepository` port.

use cf_common::resources::{
    AppEntity, InstancesResponse, PaginatedResources, StateChangeRequest, instances_by_index,
};
use cf_common::{ApiError, Application, ApplicationInstance};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::application::ports::ApplicationRepository;
use crate::infra::gateway::CloudControllerGateway;

/// Response header carrying the staging log URL of an async start.
pub const STAGING_LOG_HEADER: &str = "x-app-staging-log";

/// Everything but RFC 3986 unreserved characters is escaped in a filter value.
const FILTER_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Application repository scoped to one space.
pub struct CloudControllerApplicationRepository {
    gateway: CloudControllerGateway,
    space_guid: String,
}

impl CloudControllerApplicationRepository {
    #[must_use]
    pub fn new(gateway: CloudControllerGateway, space_guid: impl Into<String>) -> Self {
        Self {
            gateway,
            space_guid: space_guid.into(),
        }
    }
}

impl ApplicationRepository for CloudControllerApplicationRepository {
    async fn find_by_name(&self, name: &str) -> Result<Application, ApiError> {
        let path = find_by_name_path(&self.space_guid, name);
        let page: PaginatedResources<AppEntity> = self.gateway.get_json(&path).await?;
        page.resources
            .into_iter()
            .next()
            .map(Application::from)
            .ok_or_else(|| ApiError::new("", format!("App {name} not found")))
    }

    async fn start(&self, app: &Application) -> Result<Option<String>, ApiError> {
        let path = format!("/v2/apps/{}?stage_async=true", app.guid);
        let headers = self
            .gateway
            .put_json(&path, &StateChangeRequest::started())
            .await?;
        Ok(headers
            .get(STAGING_LOG_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned))
    }

    async fn instances(&self, app: &Application) -> Result<Vec<ApplicationInstance>, ApiError> {
        let path = format!("/v2/apps/{}/instances", app.guid);
        let response: InstancesResponse = self.gateway.get_json(&path).await?;
        Ok(instances_by_index(response))
    }
}

fn find_by_name_path(space_guid: &str, name: &str) -> String {
    format!(
        "/v2/spaces/{space_guid}/apps?q=name%3A{}&inline-relations-depth=1",
        utf8_percent_encode(name, FILTER_VALUE)
    )
}
