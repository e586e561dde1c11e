//! The prediction service.
//!
//! [`PredictPipeline`] owns the artifact locations and the memoized
//! [`ModelContext`]. Artifacts are read at most once per successful load:
//! either eagerly with [`PredictPipeline::load_eager()`] or on the first call
//! to [`predict()`](PredictPipeline::predict).
//!
//! # Example
//!
//! ```rust,ignore
//! use score_inference::{ArtifactConfig, Gender, PredictPipeline, StudentRecord};
//!
//! let pipeline = PredictPipeline::new(ArtifactConfig::from_dir("artifacts"));
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
//! let scores = pipeline.predict(&record)?;
//! println!("Predicted math score: {:.2}", scores[0]);
//! ```
//!
//! # Thread Safety
//!
//! The pipeline is `Send + Sync`. Only one thread runs the load at a time;
//! concurrent first callers block until it finishes and then share its
//! context, or retry the load themselves if it failed.

use crate::artifacts::ModelContext;
use crate::config::ArtifactConfig;
use crate::error::Result;
use crate::record::StudentRecord;
use once_cell::sync::OnceCell;
use polars::prelude::DataFrame;
use static_assertions::assert_impl_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Loads artifacts once and scores records against them.
#[derive(Debug)]
pub struct PredictPipeline {
    config: ArtifactConfig,
    context: OnceCell<Arc<ModelContext>>,
}

assert_impl_all!(PredictPipeline: Send, Sync);

impl PredictPipeline {
    /// Create a pipeline that loads its artifacts on first use.
    pub fn new(config: ArtifactConfig) -> Self {
        Self {
            config,
            context: OnceCell::new(),
        }
    }

    /// Create a pipeline and load its artifacts immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::ArtifactLoad`](crate::PredictError::ArtifactLoad)
    /// if either artifact cannot be loaded.
    pub fn load_eager(config: ArtifactConfig) -> Result<Self> {
        let pipeline = Self::new(config);
        pipeline.warm_up()?;
        Ok(pipeline)
    }

    /// Load the artifacts now if they are not loaded yet.
    ///
    /// Does nothing once a load has succeeded.
    pub fn warm_up(&self) -> Result<()> {
        self.context().map(|_| ())
    }

    /// Artifact locations this pipeline reads from.
    pub fn config(&self) -> &ArtifactConfig {
        &self.config
    }

    /// Whether the artifacts have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.context.get().is_some()
    }

    /// The loaded context, loading it first if needed.
    ///
    /// A failed load is not remembered; the next call tries again.
    pub fn context(&self) -> Result<Arc<ModelContext>> {
        self.context
            .get_or_try_init(|| {
                info!(
                    "Loading artifacts: preprocessor={}, model={}",
                    self.config.preprocessor_path.display(),
                    self.config.model_path.display()
                );
                ModelContext::load(&self.config).map(Arc::new)
            })
            .cloned()
    }

    /// Predict the score for one record.
    ///
    /// Returns one value per input row, so always a single element here.
    ///
    /// # Errors
    ///
    /// The first failure is returned unchanged:
    /// - artifact load errors, before the record is looked at
    /// - preprocessing errors for unknown categories, nulls or out-of-range scores
    /// - scoring errors if the artifacts disagree on the feature width
    pub fn predict(&self, record: &StudentRecord) -> Result<Vec<f64>> {
        let context = self.context()?;

        debug!("Input record: {:?}", record);
        let df = record.to_data_frame()?;
        let predictions = context.predict_frame(&df)?;

        info!("Prediction result: {:?}", predictions);
        Ok(predictions)
    }

    /// Predict one score per row of an arbitrary input table.
    pub fn predict_frame(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let context = self.context()?;
        debug!("Input frame with {} rows", df.height());
        context.predict_frame(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictError;
    use crate::record::Gender;

    fn record() -> StudentRecord {
        StudentRecord::builder()
            .gender(Gender::Male)
            .race_ethnicity("group C")
            .parental_level_of_education("some college")
            .lunch("standard")
            .test_preparation_course("none")
            .reading_score(65.0)
            .writing_score(60.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lazy_pipeline_starts_unloaded() {
        let pipeline = PredictPipeline::new(ArtifactConfig::from_dir("/nonexistent"));
        assert!(!pipeline.is_loaded());
    }

    #[test]
    fn test_missing_artifacts_fail_before_preprocessing() {
        let pipeline = PredictPipeline::new(ArtifactConfig::from_dir("/nonexistent"));

        // A record that would also fail preprocessing
        let mut bad = record();
        bad.race_ethnicity = "not-a-real-group".to_string();

        let err = pipeline.predict(&bad).unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { .. }));
        assert!(!pipeline.is_loaded());
    }

    #[test]
    fn test_warm_up_failure_leaves_pipeline_unloaded() {
        let pipeline = PredictPipeline::new(ArtifactConfig::from_dir("/nonexistent"));

        let err = pipeline.warm_up().unwrap_err();
        assert_eq!(err.error_code(), "ARTIFACT_LOAD_ERROR");
        assert!(!pipeline.is_loaded());
    }

    #[test]
    fn test_load_eager_propagates_error() {
        let result = PredictPipeline::load_eager(ArtifactConfig::from_dir("/nonexistent"));
        assert!(matches!(result, Err(PredictError::ArtifactLoad { .. })));
    }
}
