use serde::{Deserialize, Serialize};

/// Lifecycle state of an application, as recorded by the Cloud Controller.
///
/// The platform reports states in upper case (`"STARTED"`); they are
/// normalised to lower case when parsed. Values this client does not know
/// about are kept verbatim in [`AppState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppState {
    #[default]
    Stopped,
    Started,
    Other(String),
}

impl AppState {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stopped => "stopped",
            Self::Started => "started",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for AppState {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "started" => Self::Started,
            "stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<AppState> for String {
    fn from(state: AppState) -> Self {
        state.as_str().to_string()
    }
}

/// State of a single application instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceState {
    Starting,
    Running,
    Down,
    Flapping,
    /// Any state the platform reports that is not one of the above.
    Unknown(String),
}

impl InstanceState {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Down => "DOWN",
            Self::Flapping => "FLAPPING",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for InstanceState {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "STARTING" => Self::Starting,
            "RUNNING" => Self::Running,
            "DOWN" => Self::Down,
            "FLAPPING" => Self::Flapping,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<InstanceState> for String {
    fn from(state: InstanceState) -> Self {
        state.as_str().to_string()
    }
}

/// An application deployed to the targeted space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub guid: String,
    pub name: String,
    /// Desired instance count.
    pub instances: u32,
    /// Externally reachable URLs, in route order.
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub state: AppState,
}

impl Application {
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state == AppState::Started
    }
}

/// One running (or not-yet-running) replica of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInstance {
    pub state: InstanceState,
}

impl ApplicationInstance {
    #[must_use]
    pub fn new(state: InstanceState) -> Self {
        Self { state }
    }
}
