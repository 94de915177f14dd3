use std::time::Duration;

/// Partition images the extraction service accepts, in display order.
///
/// The last entry ends with U+200E (left-to-right mark); the service compares
/// names byte-for-byte and lists it that way.
pub const SUPPORTED_IMAGES: &[&str] = &[
    "boot.img",
    "init_boot.img",
    "dtbo.img",
    "super_empty.img",
    "vbmeta.img",
    "vendor_boot.img",
    "vendor_kernel_boot.img",
    "preloader.img",
    "recovery.img",
    "logo.img\u{200e}",
];

pub const DEFAULT_BASE_URL: &str = "https://offici5l-fcetool.hf.space";
pub const DEFAULT_EXTRACT_PATH: &str = "/extract";
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Static description of the extraction service and the selectable partitions.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub extract_path: String,
    pub health_path: String,
    pub images: Vec<String>,
    pub probe_health: bool,
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            extract_path: DEFAULT_EXTRACT_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            images: SUPPORTED_IMAGES.iter().map(|name| name.to_string()).collect(),
            probe_health: true,
            request_timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Replace the base URL; it must parse as an absolute URL.
    pub fn set_base_url(&mut self, raw: &str) -> Result<(), url::ParseError> {
        let trimmed = raw.trim();
        url::Url::parse(trimmed)?;
        self.base_url = trimmed.to_string();
        Ok(())
    }

    pub fn extract_endpoint(&self) -> String {
        join_endpoint(&self.base_url, &self.extract_path)
    }

    pub fn health_endpoint(&self) -> String {
        join_endpoint(&self.base_url, &self.health_path)
    }
}

fn join_endpoint(base: &str, path: &str) -> String {
    if base.ends_with('/') && path.starts_with('/') {
        format!("{}{}", base, &path[1..])
    } else {
        format!("{base}{path}")
    }
}
