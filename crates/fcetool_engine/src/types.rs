use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// JSON body of `POST /extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractRequest {
    pub url: String,
    pub images: String,
}

/// JSON body of any `/extract` reply.
///
/// Decoding is lenient: absent fields, and fields of an unexpected type
/// (e.g. a validation `detail` that is a list), become `None`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExtractResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration_seconds: Option<f64>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// A reply that arrived, whatever its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub http_status: u16,
    pub body: ExtractResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("reply with http status {status} is not a JSON object: {reason}")]
    InvalidBody { status: u16, reason: String },
    #[error("request task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ExtractionFinished {
        request_id: RequestId,
        result: Result<ServiceReply, ClientError>,
    },
    HealthChecked {
        online: bool,
    },
}
