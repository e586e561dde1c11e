//! Error types for the inference pipeline.
//!
//! [`PredictError`] is returned by every fallible operation in this crate.
//! Variants are grouped into coarse [`ErrorKind`]s so the boundary layer can
//! decide how to present each failure without matching on every variant.
//!
//! Errors are serializable as `{code, message}` so they can be handed to a
//! JSON consumer unchanged.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`PredictError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An artifact file is missing, unreadable, malformed or inconsistent.
    ArtifactLoad,
    /// The record could not be turned into a feature vector.
    Preprocessing,
    /// The feature vector does not fit the model.
    Scoring,
    /// The record itself could not be constructed.
    InvalidInput,
}

impl ErrorKind {
    /// Stable code used in rendered messages and serialized errors.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArtifactLoad => "ARTIFACT_LOAD_ERROR",
            Self::Preprocessing => "PREPROCESSING_ERROR",
            Self::Scoring => "SCORING_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The main error type for record construction, artifact loading and prediction.
#[derive(Error, Debug)]
pub enum PredictError {
    /// An artifact could not be loaded.
    #[error("Failed to load artifact '{path}': {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// A categorical value was not among the categories seen at fit time.
    #[error("Unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// A numeric value is outside the fitted range or not finite.
    #[error("Value {value} for column '{column}' is outside the expected range [{min}, {max}]")]
    ValueOutOfRange {
        column: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An input column expected by the preprocessor is absent.
    #[error("Column '{0}' not found in input")]
    MissingColumn(String),

    /// An input column contains a null.
    #[error("Column '{0}' contains a null value")]
    NullValue(String),

    /// The feature width does not match the model's input width.
    #[error("Feature vector has {actual} values but the model expects {expected}")]
    Scoring { expected: usize, actual: usize },

    /// The record could not be constructed from the supplied values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Polars error raised while building or reading the input table.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PredictError {
    /// Build an [`PredictError::ArtifactLoad`] from any displayable cause.
    pub fn artifact_load(path: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::ArtifactLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArtifactLoad { .. } => ErrorKind::ArtifactLoad,
            Self::UnknownCategory { .. }
            | Self::ValueOutOfRange { .. }
            | Self::MissingColumn(_)
            | Self::NullValue(_)
            | Self::Polars(_) => ErrorKind::Preprocessing,
            Self::Scoring { .. } => ErrorKind::Scoring,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Error code for consumers that branch on the failure.
    pub fn error_code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for PredictError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PredictError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = PredictError::UnknownCategory {
            column: "lunch".to_string(),
            value: "brunch".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Preprocessing);
        assert_eq!(err.error_code(), "PREPROCESSING_ERROR");

        let err = PredictError::Scoring {
            expected: 19,
            actual: 18,
        };
        assert_eq!(err.kind(), ErrorKind::Scoring);

        let err = PredictError::artifact_load("artifacts/model.json", "file not found");
        assert_eq!(err.error_code(), "ARTIFACT_LOAD_ERROR");
        assert!(err.to_string().contains("artifacts/model.json"));
    }

    #[test]
    fn test_missing_column_is_preprocessing() {
        assert_eq!(
            PredictError::MissingColumn("gender".to_string()).kind(),
            ErrorKind::Preprocessing
        );
        assert_eq!(
            PredictError::NullValue("gender".to_string()).error_code(),
            "PREPROCESSING_ERROR"
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = PredictError::UnknownCategory {
            column: "race_ethnicity".to_string(),
            value: "group Z".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("PREPROCESSING_ERROR"));
        assert!(json.contains("group Z"));
    }
}
