//! Mapping of a finished extraction call onto a terminal UI state.

use crate::{ErrorKind, ExtractionResult, SuccessKind, UiState};

pub const VALIDATION_MESSAGE: &str = "Please select a partition image to extract";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Unable to connect to the server";
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Decoded JSON body of a service reply. Every field is optional because
/// the same shape is used for successes and failures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplyBody {
    pub status: Option<String>,
    pub message: Option<String>,
    pub detail: Option<String>,
    pub download_url: Option<String>,
    pub filename: Option<String>,
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The service answered with a JSON body.
    Replied { http_status: u16, body: ReplyBody },
    /// No usable reply: connection, timeout or body decoding failure.
    TransportFailed { reason: String },
}

/// Classify a finished call. `requested_image` fills in a missing filename.
pub fn classify(outcome: ExtractionOutcome, requested_image: &str) -> UiState {
    match outcome {
        ExtractionOutcome::TransportFailed { .. } => UiState::Error {
            kind: ErrorKind::Generic,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        },
        ExtractionOutcome::Replied { http_status, body } if (200..300).contains(&http_status) => {
            let kind = match body.status.as_deref() {
                Some("cached") => SuccessKind::Cached,
                Some("completed") => SuccessKind::Completed,
                _ => SuccessKind::Other,
            };
            UiState::Success {
                kind,
                result: ExtractionResult {
                    message: body.message.unwrap_or_default(),
                    download_url: body.download_url.unwrap_or_default(),
                    filename: body
                        .filename
                        .unwrap_or_else(|| requested_image.to_string()),
                    duration_seconds: body.duration_seconds.unwrap_or(0.0),
                },
            }
        }
        ExtractionOutcome::Replied { http_status, body } => {
            let message = error_message(&body);
            UiState::Error {
                kind: classify_failure(http_status, &message),
                message,
            }
        }
    }
}

/// `message`, else `detail`, else the fallback. Empty strings count as absent.
pub fn error_message(body: &ReplyBody) -> String {
    [body.message.as_deref(), body.detail.as_deref()]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_string()
}

/// 429 wins over the message text; "capacity" is sniffed from the message
/// because the service has no machine-readable error code.
pub fn classify_failure(http_status: u16, message: &str) -> ErrorKind {
    if http_status == 429 {
        ErrorKind::RateLimited
    } else if message.to_lowercase().contains("capacity") {
        ErrorKind::Capacity
    } else {
        ErrorKind::Generic
    }
}
