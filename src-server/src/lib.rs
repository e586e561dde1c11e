//! score-server: web front-end for the student score predictor.
//!
//! Collects student attributes from an HTML form, runs them through
//! [`score_inference::PredictPipeline`] and renders the predicted math score,
//! or a readable error, back into the same page.
//!
//! The binary in `main.rs` only parses flags, installs logging and serves
//! [`routes::routes()`]; everything testable lives in this library.

pub mod config;
pub mod form;
pub mod render;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
