use crate::view_model::{AppViewModel, DownloadView, StatusMessage, Tone};
use crate::view_model::{SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
use crate::ServiceConfig;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessKind {
    /// Served from a previous extraction.
    Cached,
    /// Freshly extracted.
    Completed,
    /// Any other success status; rendered without a notice.
    Other,
}

/// Error classes as the user sees them.
///
/// Validation, transport and plain service failures all land in `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RateLimited,
    Capacity,
    Generic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub message: String,
    pub download_url: String,
    pub filename: String,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading {
        request_id: RequestId,
        images: String,
    },
    Success {
        kind: SuccessKind,
        result: ExtractionResult,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Online,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    pub url: String,
    pub partition: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    partitions: Vec<String>,
    probe_health: bool,
    form: FormValues,
    ui: UiState,
    service: ServiceStatus,
    last_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            partitions: config.images.clone(),
            probe_health: config.probe_health,
            form: FormValues::default(),
            ui: UiState::Idle,
            service: ServiceStatus::Unknown,
            last_request_id: 0,
            dirty: false,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn service(&self) -> ServiceStatus {
        self.service
    }

    pub fn partitions(&self) -> &[String] {
        &self.partitions
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.ui, UiState::Loading { .. })
    }

    /// Returns true if the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.is_loading();
        let success = matches!(self.ui, UiState::Success { .. });
        AppViewModel {
            partitions: self.partitions.clone(),
            form_visible: !success,
            inputs_enabled: !loading,
            submit_enabled: !loading,
            submit_label: if loading {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            },
            url: self.form.url.clone(),
            selected_partition: self.form.partition.clone(),
            status: self.status_message(),
            download: self.download_view(),
            service: self.service,
        }
    }

    fn status_message(&self) -> Option<StatusMessage> {
        match &self.ui {
            UiState::Idle | UiState::Loading { .. } => None,
            UiState::Success { kind, result } => {
                let tone = match kind {
                    SuccessKind::Cached => Tone::Info,
                    SuccessKind::Completed => Tone::Success,
                    SuccessKind::Other => return None,
                };
                Some(StatusMessage {
                    text: result.message.clone(),
                    tone,
                })
            }
            UiState::Error { kind, message } => Some(StatusMessage {
                text: message.clone(),
                tone: match kind {
                    ErrorKind::RateLimited | ErrorKind::Capacity => Tone::Warning,
                    ErrorKind::Generic => Tone::Error,
                },
            }),
        }
    }

    fn download_view(&self) -> Option<DownloadView> {
        let UiState::Success { kind, result } = &self.ui else {
            return None;
        };
        Some(DownloadView {
            status_label: match kind {
                SuccessKind::Cached => Some("Retrieved from cache"),
                SuccessKind::Completed => Some("Extraction completed"),
                SuccessKind::Other => None,
            },
            download_url: result.download_url.clone(),
            filename: result.filename.clone(),
            duration_text: format!("{}s", result.duration_seconds),
        })
    }

    pub(crate) fn probe_health_enabled(&self) -> bool {
        self.probe_health
    }

    /// Form fields accept edits and submission only in Idle and Error.
    pub(crate) fn form_editable(&self) -> bool {
        matches!(self.ui, UiState::Idle | UiState::Error { .. })
    }

    pub(crate) fn in_flight(&self) -> Option<(RequestId, &str)> {
        match &self.ui {
            UiState::Loading { request_id, images } => Some((*request_id, images.as_str())),
            _ => None,
        }
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if self.form.url != url {
            self.form.url = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_partition(&mut self, partition: Option<String>) {
        if self.form.partition != partition {
            self.form.partition = partition;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_ui(&mut self, ui: UiState) {
        self.ui = ui;
        self.mark_dirty();
    }

    pub(crate) fn set_service(&mut self, service: ServiceStatus) {
        if self.service != service {
            self.service = service;
            self.mark_dirty();
        }
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Back to Idle with an empty form.
    pub(crate) fn reset(&mut self) {
        self.form = FormValues::default();
        self.set_ui(UiState::Idle);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
