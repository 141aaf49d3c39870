use crate::{DatasetArgs, GlobalArgs};
use anyhow::{Context, Result};
use holomine_application::{SessionStore, WorkflowController};
use holomine_core::config::ClientConfig;
use holomine_core::session::DatasetInput;
use holomine_infrastructure::{ConfigOverrides, ConfigService, load_dataset, sample_dataset_input};
use holomine_interaction::BackendClient;
use std::sync::Arc;

/// Resolved configuration plus the HTTP client built from it.
pub struct AppContext {
    pub config: ClientConfig,
    pub client: Arc<BackendClient>,
}

impl AppContext {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let service = match &global.config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let overrides = ConfigOverrides {
            base_url: global.base_url.clone(),
            timeout_secs: global.timeout_secs,
        };
        let config = service
            .resolve(&overrides)
            .with_context(|| format!("Failed to load configuration from {}", service.path().display()))?;
        let client = Arc::new(BackendClient::from_config(&config.service));

        Ok(Self { config, client })
    }

    /// A controller over a fresh session, talking to the configured backend.
    pub fn workflow(&self) -> WorkflowController {
        WorkflowController::new(
            Arc::new(SessionStore::new()),
            self.client.clone(),
            self.client.clone(),
            self.config.service.timeout(),
        )
    }
}

pub async fn read_dataset(args: &DatasetArgs) -> Result<DatasetInput> {
    match &args.file {
        Some(path) => load_dataset(path)
            .await
            .with_context(|| format!("Cannot use {} as a dataset", path.display())),
        None => sample_dataset_input().context("Failed to build the sample dataset"),
    }
}
