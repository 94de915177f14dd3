use std::time::Duration;

use fcetool_logging::{fce_debug, fce_info, fce_warn};

use crate::{ClientError, ExtractRequest, ExtractResponse, ServiceReply};

/// Resolved endpoints and transport limits.
///
/// The timeout is unset by default; the call then resolves or fails on the
/// transport's own terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub extract_endpoint: String,
    pub health_endpoint: String,
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(extract_endpoint: impl Into<String>, health_endpoint: impl Into<String>) -> Self {
        Self {
            extract_endpoint: extract_endpoint.into(),
            health_endpoint: health_endpoint.into(),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Issue exactly one extraction call. Non-2xx replies are `Ok`.
    async fn extract(&self, request: &ExtractRequest) -> Result<ServiceReply, ClientError>;

    /// `true` when the health endpoint answers with a success status.
    async fn probe_health(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct ReqwestExtractionClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestExtractionClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl ExtractionClient for ReqwestExtractionClient {
    async fn extract(&self, request: &ExtractRequest) -> Result<ServiceReply, ClientError> {
        fce_info!(
            "POST {} images={} url={}",
            self.settings.extract_endpoint,
            request.images,
            request.url
        );

        let response = self
            .client
            .post(&self.settings.extract_endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let http_status = response.status().as_u16();
        let text = response.text().await.map_err(map_reqwest_error)?;
        fce_debug!("extract reply status={} body_len={}", http_status, text.len());

        let body: ExtractResponse =
            serde_json::from_str(&text).map_err(|err| ClientError::InvalidBody {
                status: http_status,
                reason: err.to_string(),
            })?;

        Ok(ServiceReply { http_status, body })
    }

    async fn probe_health(&self) -> bool {
        match self.client.head(&self.settings.health_endpoint).send().await {
            Ok(response) => {
                let online = response.status().is_success();
                fce_info!(
                    "health probe {} -> {}",
                    self.settings.health_endpoint,
                    response.status()
                );
                online
            }
            Err(err) => {
                fce_warn!("health probe {} failed: {}", self.settings.health_endpoint, err);
                false
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout(err.to_string());
    }
    ClientError::Transport(err.to_string())
}
