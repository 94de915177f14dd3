use crate::ServiceStatus;

pub const SUBMIT_LABEL_IDLE: &str = "Extract Now";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadView {
    pub status_label: Option<&'static str>,
    pub download_url: String,
    pub filename: String,
    pub duration_text: String,
}

/// Everything a front-end needs to draw the page.
///
/// `form_visible` and `download.is_some()` are never both true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub partitions: Vec<String>,
    pub form_visible: bool,
    pub inputs_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub url: String,
    pub selected_partition: Option<String>,
    pub status: Option<StatusMessage>,
    pub download: Option<DownloadView>,
    pub service: ServiceStatus,
}
