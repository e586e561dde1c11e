//! Server configuration.

use score_inference::{ArtifactConfig, ConfigValidationError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Runtime settings for the web front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    /// Default: 127.0.0.1
    pub host: IpAddr,

    /// Port to bind.
    /// Default: 8000
    pub port: u16,

    /// Where the preprocessor and model live.
    pub artifacts: ArtifactConfig,

    /// Directory served under `/static`.
    /// Default: "static"
    pub static_dir: PathBuf,

    /// Load artifacts before accepting requests instead of on the first prediction.
    /// Default: false
    pub eager_load: bool,

    /// Map the form's `reading_score` onto the record's `writing_score` and
    /// vice versa. This reproduces the form handler's historical mapping;
    /// whether it was intended is unknown.
    /// Default: true
    pub swap_score_fields: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            artifacts: ArtifactConfig::default(),
            static_dir: PathBuf::from("static"),
            eager_load: false,
            swap_score_fields: true,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.artifacts.validate()
    }
}
