//! HTTP routes.
//!
//! ```text
//! GET  /             landing page
//! GET  /predictdata  empty form
//! POST /predictdata  form + result or error
//! GET  /static/...   files from the configured static directory
//! ```

use crate::form::PredictForm;
use crate::render::{self, Outcome};
use crate::state::AppState;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, warn};
use warp::{Filter, Rejection, Reply};

/// Largest accepted form body in bytes.
const FORM_BODY_LIMIT: u64 = 16 * 1024;

/// All routes of the application.
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let static_dir = state.config.static_dir.clone();
    let with_state = warp::any().map(move || state.clone());

    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(render::index_page()));

    let show_form = warp::path!("predictdata")
        .and(warp::get())
        .map(|| warp::reply::html(render::home_page(None)));

    let predict = warp::path!("predictdata")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_BODY_LIMIT))
        .and(warp::body::form::<PredictForm>())
        .and(with_state)
        .and_then(predict_handler);

    let static_files = warp::path("static").and(warp::fs::dir(static_dir));

    index
        .or(show_form)
        .or(predict)
        .or(static_files)
        .with(warp::trace::request())
}

async fn predict_handler(
    form: PredictForm,
    state: Arc<AppState>,
) -> Result<impl Reply, Infallible> {
    let outcome = predict_outcome(form, &state).await;
    Ok(warp::reply::html(render::home_page(Some(&outcome))))
}

/// Run one prediction and fold any failure into the rendered outcome.
pub async fn predict_outcome(form: PredictForm, state: &AppState) -> Outcome {
    let record = match form.into_record(state.config.swap_score_fields) {
        Ok(record) => record,
        Err(e) => {
            warn!("Rejected form: {}", e);
            return e.into();
        }
    };

    // The first call may read the artifacts from disk
    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.predict(&record)).await;

    match result {
        Ok(Ok(predictions)) => match predictions.first() {
            Some(score) => Outcome::Score(*score),
            None => Outcome::Failed {
                code: "INTERNAL_ERROR".to_string(),
                message: "model returned no prediction".to_string(),
            },
        },
        Ok(Err(e)) => {
            warn!("Prediction failed [{}]: {}", e.error_code(), e);
            e.into()
        }
        Err(join_error) => {
            error!("Prediction task failed: {}", join_error);
            Outcome::Failed {
                code: "INTERNAL_ERROR".to_string(),
                message: join_error.to_string(),
            }
        }
    }
}
