//! score-inference: preprocessing and scoring for the student score predictor.
//!
//! This crate turns one set of student attributes into a predicted math score
//! using two frozen, previously fitted artifacts:
//!
//! - a [`Preprocessor`] that encodes categorical fields and scales numeric ones
//! - a [`RegressionModel`] that maps the resulting feature vector to a score
//!
//! It never trains or modifies either artifact.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use score_inference::{ArtifactConfig, Gender, PredictPipeline, StudentRecord};
//!
//! // Load once at startup (or let the first prediction do it)
//! let pipeline = PredictPipeline::load_eager(ArtifactConfig::from_dir("artifacts"))?;
//!
//! let record = StudentRecord::builder()
//!     .gender(Gender::Female)
//!     .race_ethnicity("group B")
//!     .parental_level_of_education("bachelor's degree")
//!     .lunch("standard")
//!     .test_preparation_course("completed")
//!     .reading_score(72.0)
//!     .writing_score(74.0)
//!     .build()?;
//!
//! match pipeline.predict(&record) {
//!     Ok(scores) => println!("Predicted: {:.2}", scores[0]),
//!     Err(e) => println!("Error [{}]: {}", e.error_code(), e),
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! StudentRecord ──► DataFrame ──► Preprocessor ──► FeatureMatrix ──► RegressionModel ──► Vec<f64>
//!                                 └──────────── ModelContext (Arc, loaded once) ──────────┘
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PredictError>`](PredictError).
//! [`PredictError::kind()`] groups the variants:
//!
//! - [`ErrorKind::ArtifactLoad`] - an artifact is missing or malformed
//! - [`ErrorKind::Preprocessing`] - unknown category, null or out-of-range value
//! - [`ErrorKind::Scoring`] - feature width does not match the model
//! - [`ErrorKind::InvalidInput`] - the record could not be constructed

pub mod artifacts;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod preprocessor;
pub mod record;

// Re-exports for convenient access
pub use artifacts::{Artifact, FORMAT_VERSION, ModelContext};
pub use config::{ArtifactConfig, ArtifactConfigBuilder, ConfigValidationError};
pub use error::{ErrorKind, PredictError, Result as PredictResult};
pub use model::{Estimator, RegressionModel};
pub use pipeline::PredictPipeline;
pub use preprocessor::{CategoricalEncoder, FeatureMatrix, NumericScaler, Preprocessor};
pub use record::{Gender, StudentRecord, StudentRecordBuilder, columns};
