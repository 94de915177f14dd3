//! fcetool core: configuration holder, pure submission state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use config::{
    ServiceConfig, DEFAULT_BASE_URL, DEFAULT_EXTRACT_PATH, DEFAULT_HEALTH_PATH, SUPPORTED_IMAGES,
};
pub use effect::{Effect, ExtractionRequest};
pub use msg::Msg;
pub use outcome::{
    classify, classify_failure, error_message, ExtractionOutcome, ReplyBody,
    FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, VALIDATION_MESSAGE,
};
pub use state::{
    AppState, ErrorKind, ExtractionResult, FormValues, RequestId, ServiceStatus, SuccessKind,
    UiState,
};
pub use update::update;
pub use view_model::{
    AppViewModel, DownloadView, StatusMessage, Tone, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
