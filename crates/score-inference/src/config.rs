//! Artifact location configuration.
//!
//! [`ArtifactConfig`] tells the pipeline where the fitted preprocessor and
//! the model live on disk. Use [`ArtifactConfig::builder()`] or
//! [`ArtifactConfig::from_dir()`].
//!
//! # Example
//!
//! ```
//! use score_inference::ArtifactConfig;
//!
//! let config = ArtifactConfig::builder()
//!     .artifacts_dir("artifacts")
//!     .model_file("model.json")
//!     .build()
//!     .expect("valid config");
//!
//! assert!(config.model_path.ends_with("model.json"));
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory holding both artifacts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
/// Default file name of the serialized preprocessor.
pub const DEFAULT_PREPROCESSOR_FILE: &str = "preprocessor.json";
/// Default file name of the serialized model.
pub const DEFAULT_MODEL_FILE: &str = "model.json";

/// Where to find the two artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the serialized preprocessor.
    /// Default: "artifacts/preprocessor.json"
    pub preprocessor_path: PathBuf,

    /// Path to the serialized model.
    /// Default: "artifacts/model.json"
    pub model_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::from_dir(DEFAULT_ARTIFACTS_DIR)
    }
}

impl ArtifactConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ArtifactConfigBuilder {
        ArtifactConfigBuilder::default()
    }

    /// Both artifacts under `dir` with their default file names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            preprocessor_path: dir.join(DEFAULT_PREPROCESSOR_FILE),
            model_path: dir.join(DEFAULT_MODEL_FILE),
        }
    }

    /// Validate the configuration and return errors if invalid.
    ///
    /// Only the shape of the paths is checked here. Whether the files exist is
    /// reported as an artifact load error when they are first read.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.preprocessor_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("preprocessor_path"));
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("model_path"));
        }

        if self.preprocessor_path == self.model_path {
            return Err(ConfigValidationError::SamePath(
                self.model_path.display().to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Artifact path '{0}' must not be empty")]
    EmptyPath(&'static str),

    #[error("Preprocessor and model cannot share the same path: {0}")]
    SamePath(String),
}

/// Builder for [`ArtifactConfig`].
#[derive(Debug, Clone, Default)]
pub struct ArtifactConfigBuilder {
    artifacts_dir: Option<PathBuf>,
    preprocessor_file: Option<PathBuf>,
    model_file: Option<PathBuf>,
}

impl ArtifactConfigBuilder {
    /// Directory that relative file names are resolved against.
    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    /// Preprocessor file. Absolute paths ignore `artifacts_dir`.
    pub fn preprocessor_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.preprocessor_file = Some(file.into());
        self
    }

    /// Model file. Absolute paths ignore `artifacts_dir`.
    pub fn model_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.model_file = Some(file.into());
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ArtifactConfig, ConfigValidationError> {
        let dir = self
            .artifacts_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        let preprocessor = self
            .preprocessor_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREPROCESSOR_FILE));
        let model = self
            .model_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_FILE));

        // Path::join keeps absolute right-hand sides as-is
        let config = ArtifactConfig {
            preprocessor_path: dir.join(preprocessor),
            model_path: dir.join(model),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ArtifactConfig::default();
        assert_eq!(
            config.preprocessor_path,
            PathBuf::from("artifacts/preprocessor.json")
        );
        assert_eq!(config.model_path, PathBuf::from("artifacts/model.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_dir() {
        let config = ArtifactConfig::builder()
            .artifacts_dir("/srv/models")
            .build()
            .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/srv/models/model.json"));
    }

    #[test]
    fn test_builder_rejects_same_path() {
        let result = ArtifactConfig::builder()
            .preprocessor_file("both.json")
            .model_file("both.json")
            .build();
        assert!(matches!(result, Err(ConfigValidationError::SamePath(_))));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let config = ArtifactConfig {
            preprocessor_path: PathBuf::new(),
            model_path: PathBuf::from("model.json"),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyPath("preprocessor_path"))
        ));
    }
}
