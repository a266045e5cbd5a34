//! Cloud Controller v2 wire resources and their mapping onto domain types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AppState, Application, ApplicationInstance, InstanceState};

#[derive(Debug, Deserialize)]
pub struct PaginatedResources<E> {
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

#[derive(Debug, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

#[derive(Debug, Deserialize)]
pub struct AppEntity {
    pub name: String,
    #[serde(default)]
    pub instances: u32,
    #[serde(default)]
    pub state: AppState,
    /// Only present when requested with `inline-relations-depth=1`.
    #[serde(default)]
    pub routes: Vec<Resource<RouteEntity>>,
}

#[derive(Debug, Deserialize)]
pub struct RouteEntity {
    #[serde(default)]
    pub host: String,
    pub domain: Resource<DomainEntity>,
}

#[derive(Debug, Deserialize)]
pub struct DomainEntity {
    pub name: String,
}

impl RouteEntity {
    /// `host.domain`, or the bare domain for a host-less route.
    #[must_use]
    pub fn url(&self) -> String {
        if self.host.is_empty() {
            self.domain.entity.name.clone()
        } else {
            format!("{}.{}", self.host, self.domain.entity.name)
        }
    }
}

impl From<Resource<AppEntity>> for Application {
    fn from(resource: Resource<AppEntity>) -> Self {
        let urls = resource.entity.routes.iter().map(|r| r.entity.url()).collect();
        Self {
            guid: resource.metadata.guid,
            name: resource.entity.name,
            instances: resource.entity.instances,
            urls,
            state: resource.entity.state,
        }
    }
}

/// Body of `PUT /v2/apps/{guid}` used to change the lifecycle state.
#[derive(Debug, Serialize)]
pub struct StateChangeRequest {
    pub state: &'static str,
}

impl StateChangeRequest {
    #[must_use]
    pub fn started() -> Self {
        Self { state: "STARTED" }
    }
}

#[derive(Debug, Deserialize)]
pub struct InstanceEntry {
    pub state: InstanceState,
}

/// Body of `GET /v2/apps/{guid}/instances`: a map keyed by instance index.
pub type InstancesResponse = BTreeMap<String, InstanceEntry>;

/// Flatten an instances response into a list ordered by numeric index.
///
/// Keys are strings, so `"10"` would sort before `"2"` lexically; entries
/// whose key is not a number are placed last in key order.
#[must_use]
pub fn instances_by_index(response: InstancesResponse) -> Vec<ApplicationInstance> {
    let mut entries: Vec<(Option<u32>, String, InstanceEntry)> = response
        .into_iter()
        .map(|(key, entry)| (key.parse().ok(), key, entry))
        .collect();
    entries.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.1.cmp(&b.1),
    });
    entries
        .into_iter()
        .map(|(_, _, entry)| ApplicationInstance::new(entry.state))
        .collect()
}
