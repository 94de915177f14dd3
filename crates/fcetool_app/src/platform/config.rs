//! Optional `fcetool.ron` overrides for the static service configuration.
//!
//! Every field is optional; anything left out keeps its built-in default.
//!
//! ```ron
//! (
//!     base_url: "http://127.0.0.1:7860",
//!     images: ["boot.img", "init_boot.img"],
//!     request_timeout_secs: 120,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fcetool_core::ServiceConfig;
use fcetool_logging::{fce_info, fce_warn};
use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_FILENAME: &str = "fcetool.ron";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    extract_path: Option<String>,
    health_path: Option<String>,
    images: Option<Vec<String>>,
    probe_health: Option<bool>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("invalid base_url {value:?}: {reason}")]
    BaseUrl { value: String, reason: String },
    #[error("images must list at least one partition")]
    NoImages,
}

/// Load `path`, falling back to the defaults when it is absent or invalid.
pub(crate) fn load_or_default(path: &Path) -> ServiceConfig {
    match load(path) {
        Ok(config) => config,
        Err(err) => {
            fce_warn!("Ignoring service configuration: {}", err);
            ServiceConfig::default()
        }
    }
}

pub(crate) fn load(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ServiceConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let file: ConfigFile = ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&content)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let config = apply(file)?;
    fce_info!("Loaded service configuration from {:?}", path);
    Ok(config)
}

fn apply(file: ConfigFile) -> Result<ServiceConfig, ConfigError> {
    let mut config = ServiceConfig::default();
    if let Some(base_url) = file.base_url {
        config
            .set_base_url(&base_url)
            .map_err(|err| ConfigError::BaseUrl {
                value: base_url.clone(),
                reason: err.to_string(),
            })?;
    }
    if let Some(path) = file.extract_path {
        config.extract_path = path;
    }
    if let Some(path) = file.health_path {
        config.health_path = path;
    }
    if let Some(images) = file.images {
        if images.is_empty() {
            return Err(ConfigError::NoImages);
        }
        config.images = images;
    }
    if let Some(probe) = file.probe_health {
        config.probe_health = probe;
    }
    if let Some(secs) = file.request_timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }
    Ok(config)
}
