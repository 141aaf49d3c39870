//! BackendClient - HTTP implementation of the Encryption and Mining services.
//!
//! Talks to the backend REST API:
//!
//! - `POST /api/encrypt` (multipart, field `file`) → `EncryptionResult`
//! - `POST /api/mine` (JSON `MiningRequest`) → `MiningResult`
//! - `GET /api/health` → `ServiceHealth`

use async_trait::async_trait;
use holomine_core::config::{DEFAULT_TIMEOUT_SECS, ServiceConfig};
use holomine_core::contract::{
    EncryptionResult, ErrorBody, MiningRequest, MiningResult, ServiceHealth,
};
use holomine_core::error::{ServiceError, ServiceKind};
use holomine_core::service::{EncryptionService, MiningService};
use holomine_core::session::DatasetInput;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const ENCRYPT_PATH: &str = "/api/encrypt";
const MINE_PATH: &str = "/api/mine";
const HEALTH_PATH: &str = "/api/health";

/// Multipart field name the Encryption Service reads the dataset from.
const UPLOAD_FIELD: &str = "file";

/// Client for the encryption/mining backend.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    /// Creates a client for the backend at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates a client from the `[service]` configuration section.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.base_url.clone()).with_timeout(config.timeout())
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Queries the backend health endpoint.
    pub async fn health(&self) -> Result<ServiceHealth, ServiceError> {
        let request = self.client.get(self.endpoint(HEALTH_PATH));
        let response = self.send(ServiceKind::Health, request).await?;
        read_json(ServiceKind::Health, response, self.timeout).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        service: ServiceKind,
        request: RequestBuilder,
    ) -> Result<Response, ServiceError> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| map_send_error(service, err, self.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(service, status, body_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl EncryptionService for BackendClient {
    async fn encrypt(&self, input: &DatasetInput) -> Result<EncryptionResult, ServiceError> {
        let mime = mime_guess::from_path(input.file_name()).first_or_octet_stream();
        let part = Part::bytes(input.content().to_vec())
            .file_name(input.file_name().to_string())
            .mime_str(mime.essence_str())
            .map_err(|err| {
                ServiceError::transport(
                    ServiceKind::Encryption,
                    format!("Failed to build upload part: {err}"),
                )
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(
            file_name = input.file_name(),
            bytes = input.len(),
            "[BackendClient] uploading dataset for encryption"
        );

        let request = self.client.post(self.endpoint(ENCRYPT_PATH)).multipart(form);
        let response = self.send(ServiceKind::Encryption, request).await?;
        read_json(ServiceKind::Encryption, response, self.timeout).await
    }
}

#[async_trait]
impl MiningService for BackendClient {
    async fn mine(&self, request: &MiningRequest) -> Result<MiningResult, ServiceError> {
        tracing::debug!(
            algorithm = %request.algorithm,
            ciphertext_chars = request.encrypted_data.len(),
            "[BackendClient] requesting mining run"
        );

        let builder = self.client.post(self.endpoint(MINE_PATH)).json(request);
        let response = self.send(ServiceKind::Mining, builder).await?;
        read_json(ServiceKind::Mining, response, self.timeout).await
    }
}

async fn read_json<T: DeserializeOwned>(
    service: ServiceKind,
    response: Response,
    timeout: Duration,
) -> Result<T, ServiceError> {
    response.json::<T>().await.map_err(|err| {
        if err.is_decode() {
            ServiceError::contract(service, format!("Failed to parse response: {err}"))
        } else {
            map_send_error(service, err, timeout)
        }
    })
}

fn map_send_error(service: ServiceKind, err: reqwest::Error, timeout: Duration) -> ServiceError {
    if err.is_timeout() {
        ServiceError::timeout(service, timeout)
    } else {
        ServiceError::transport(service, format!("{err}"))
    }
}

fn map_http_error(service: ServiceKind, status: StatusCode, body: String) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|wrapper| wrapper.error)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.clone()
            }
        });

    ServiceError::http(service, status.as_u16(), message)
}
