use serde::{Deserialize, Serialize};

/// Response of the backend health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub encryption: Option<String>,
    #[serde(default)]
    pub algorithms: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ServiceHealth {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

/// Error body returned by the backend on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
