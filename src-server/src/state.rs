//! Shared application state.

use crate::config::ServerConfig;
use score_inference::{PredictPipeline, PredictResult};
use std::sync::Arc;
use tracing::warn;

/// State handed to every request handler.
///
/// Nothing in here changes after startup; the pipeline memoizes its own
/// artifacts.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub pipeline: Arc<PredictPipeline>,
}

impl AppState {
    /// Build the state, loading the artifacts now if `eager_load` is set.
    pub fn new(config: ServerConfig) -> PredictResult<Self> {
        let pipeline = if config.eager_load {
            PredictPipeline::load_eager(config.artifacts.clone())?
        } else {
            PredictPipeline::new(config.artifacts.clone())
        };

        if config.swap_score_fields {
            warn!(
                "Form reading_score/writing_score are mapped onto the swapped record fields; \
                 pass --straight-score-fields to map them directly"
            );
        }

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
        })
    }
}
