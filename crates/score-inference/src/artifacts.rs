//! Artifact loading and the immutable model context.
//!
//! Both fitted artifacts are JSON documents carrying a `format_version`.
//! [`Artifact::load`] reads, parses and validates one of them, turning every
//! failure into [`PredictError::ArtifactLoad`]. [`ModelContext`] bundles the
//! two loaded artifacts; it is built once and shared read-only afterwards.

use crate::config::{ArtifactConfig, ConfigValidationError};
use crate::error::{PredictError, Result};
use crate::model::RegressionModel;
use crate::preprocessor::Preprocessor;
use polars::prelude::DataFrame;
use serde::de::DeserializeOwned;
use static_assertions::assert_impl_all;
use std::path::Path;
use tracing::{debug, info, warn};

/// Artifact format understood by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// A fitted object stored as JSON on disk.
pub trait Artifact: DeserializeOwned + Sized {
    /// Human-readable artifact name used in log lines.
    const NAME: &'static str;

    /// Format version recorded in the document.
    fn format_version(&self) -> u32;

    /// Check the internal consistency of a freshly parsed artifact.
    fn validate(&self) -> std::result::Result<(), String>;

    /// Read, parse and validate the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::ArtifactLoad`] if the file is missing or
    /// unreadable, is not valid JSON for this artifact, has an unsupported
    /// `format_version`, or fails [`validate()`](Self::validate).
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Check file exists first so the message is not an OS error string
        if !path.exists() {
            return Err(PredictError::artifact_load(path.display(), "file not found"));
        }

        let bytes =
            std::fs::read(path).map_err(|e| PredictError::artifact_load(path.display(), e))?;
        let artifact: Self = serde_json::from_slice(&bytes)
            .map_err(|e| PredictError::artifact_load(path.display(), e))?;

        if artifact.format_version() != FORMAT_VERSION {
            return Err(PredictError::artifact_load(
                path.display(),
                format!(
                    "unsupported format_version {} (expected {})",
                    artifact.format_version(),
                    FORMAT_VERSION
                ),
            ));
        }

        artifact
            .validate()
            .map_err(|reason| PredictError::artifact_load(path.display(), reason))?;

        debug!("Loaded {} from {}", Self::NAME, path.display());
        Ok(artifact)
    }
}

/// The loaded preprocessor and model.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ModelContext {
    preprocessor: Preprocessor,
    model: RegressionModel,
}

assert_impl_all!(ModelContext: Send, Sync);

impl ModelContext {
    /// Load both artifacts described by `config`.
    ///
    /// The preprocessor is loaded first; if it fails the model file is not
    /// touched.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            let at = match &e {
                ConfigValidationError::EmptyPath(field) => field.to_string(),
                ConfigValidationError::SamePath(path) => path.clone(),
            };
            PredictError::artifact_load(at, e)
        })?;

        let preprocessor = Preprocessor::load(&config.preprocessor_path)?;
        let model = RegressionModel::load(&config.model_path)?;

        let context = Self::new(preprocessor, model);
        info!(
            "Artifacts loaded: model '{}' predicting '{}' ({} features)",
            context.model.name,
            context.model.target,
            context.model.input_width()
        );
        Ok(context)
    }

    /// Assemble a context from already loaded artifacts.
    pub fn new(preprocessor: Preprocessor, model: RegressionModel) -> Self {
        if preprocessor.output_width() != model.input_width() {
            // Surfaced as a scoring error on every prediction
            warn!(
                "Preprocessor emits {} features but model '{}' expects {}",
                preprocessor.output_width(),
                model.name,
                model.input_width()
            );
        }

        Self {
            preprocessor,
            model,
        }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    /// Preprocess and score every row of `df`, in row order.
    pub fn predict_frame(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let features = self.preprocessor.transform(df)?;
        debug!("Feature matrix: {:?}", features);
        self.model.predict(&features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_nonexistent_preprocessor() {
        let result = Preprocessor::load("/nonexistent/path/preprocessor.json");
        match result {
            Err(PredictError::ArtifactLoad { path, reason }) => {
                assert!(path.contains("preprocessor.json"));
                assert_eq!(reason, "file not found");
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_context_load_stops_at_missing_preprocessor() {
        let config = ArtifactConfig::from_dir("/nonexistent/artifacts");
        let err = ModelContext::load(&config).unwrap_err();
        assert_eq!(err.error_code(), "ARTIFACT_LOAD_ERROR");
        assert!(err.to_string().contains("preprocessor.json"));
    }

    #[test]
    fn test_context_load_names_invalid_config_field() {
        let config = ArtifactConfig {
            preprocessor_path: "".into(),
            model_path: "artifacts/model.json".into(),
        };
        match ModelContext::load(&config) {
            Err(PredictError::ArtifactLoad { path, reason }) => {
                assert_eq!(path, "preprocessor_path");
                assert!(reason.contains("must not be empty"));
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }
}
