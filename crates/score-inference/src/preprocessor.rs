//! The fitted preprocessing transform.
//!
//! A [`Preprocessor`] turns a table of raw student attributes into a numeric
//! feature matrix. Its fitted state is two lists of per-column steps:
//!
//! - [`NumericScaler`]: standard scaling, `(x - mean) / scale`, with the
//!   value required to be finite and inside `[min, max]`
//! - [`CategoricalEncoder`]: one-hot encoding over the categories seen at fit
//!   time, each indicator then divided by its own scale
//!
//! The output layout is fixed: all numeric features in artifact order,
//! followed by one one-hot block per categorical column in artifact order.
//! Unknown categories are an error, never an all-zero block.
//!
//! # Example
//!
//! ```rust,ignore
//! use score_inference::{Artifact, Preprocessor};
//!
//! let preprocessor = Preprocessor::load("artifacts/preprocessor.json")?;
//! let features = preprocessor.transform(&record.to_data_frame()?)?;
//! assert_eq!(features[0].len(), preprocessor.output_width());
//! ```

use crate::artifacts::Artifact;
use crate::error::{PredictError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Feature vectors, one per input row.
pub type FeatureMatrix = Vec<Vec<f64>>;

/// Standard scaling step for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericScaler {
    /// Input column name.
    pub column: String,
    /// Mean observed at fit time.
    pub mean: f64,
    /// Standard deviation observed at fit time.
    pub scale: f64,
    /// Smallest accepted raw value.
    pub min: f64,
    /// Largest accepted raw value.
    pub max: f64,
}

impl NumericScaler {
    fn apply(&self, value: f64) -> Result<f64> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(PredictError::ValueOutOfRange {
                column: self.column.clone(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok((value - self.mean) / self.scale)
    }
}

/// One-hot encoding step for one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    /// Input column name.
    pub column: String,
    /// Categories in output order.
    pub categories: Vec<String>,
    /// Divisor applied to each indicator, parallel to `categories`.
    pub scale: Vec<f64>,
}

impl CategoricalEncoder {
    fn encode_into(&self, value: &str, out: &mut Vec<f64>) -> Result<()> {
        let position = self
            .categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| PredictError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })?;

        out.extend(
            self.scale
                .iter()
                .enumerate()
                .map(|(i, s)| if i == position { 1.0 / s } else { 0.0 }),
        );
        Ok(())
    }
}

/// The fitted preprocessing transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub format_version: u32,
    #[serde(default)]
    pub numeric: Vec<NumericScaler>,
    #[serde(default)]
    pub categorical: Vec<CategoricalEncoder>,
}

impl Artifact for Preprocessor {
    const NAME: &'static str = "preprocessor";

    fn format_version(&self) -> u32 {
        self.format_version
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err("preprocessor has no columns".to_string());
        }

        let mut seen = HashSet::new();
        for column in self.input_columns() {
            if !seen.insert(column) {
                return Err(format!("column '{}' is listed more than once", column));
            }
        }

        for scaler in &self.numeric {
            if !scaler.scale.is_finite() || scaler.scale == 0.0 || !scaler.mean.is_finite() {
                return Err(format!(
                    "numeric column '{}' has an invalid mean/scale",
                    scaler.column
                ));
            }
            if !scaler.min.is_finite() || !scaler.max.is_finite() {
                return Err(format!(
                    "numeric column '{}' has a non-finite min/max",
                    scaler.column
                ));
            }
            if scaler.min > scaler.max {
                return Err(format!(
                    "numeric column '{}' has min {} above max {}",
                    scaler.column, scaler.min, scaler.max
                ));
            }
        }

        for encoder in &self.categorical {
            if encoder.categories.is_empty() {
                return Err(format!(
                    "categorical column '{}' has no categories",
                    encoder.column
                ));
            }
            if encoder.categories.len() != encoder.scale.len() {
                return Err(format!(
                    "categorical column '{}' has {} categories but {} scales",
                    encoder.column,
                    encoder.categories.len(),
                    encoder.scale.len()
                ));
            }
            if encoder.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err(format!(
                    "categorical column '{}' has a zero or non-finite scale",
                    encoder.column
                ));
            }
        }

        Ok(())
    }
}

impl Preprocessor {
    /// Names of the input columns the transform reads.
    pub fn input_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .map(|s| s.column.as_str())
            .chain(self.categorical.iter().map(|e| e.column.as_str()))
    }

    /// Number of features produced per row.
    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|e| e.categories.len())
                .sum::<usize>()
    }

    /// Names of the produced features, in output order.
    ///
    /// Numeric features are named `num__<column>`, one-hot features
    /// `cat__<column>_<category>`.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.output_width());
        names.extend(self.numeric.iter().map(|s| format!("num__{}", s.column)));
        for encoder in &self.categorical {
            names.extend(
                encoder
                    .categories
                    .iter()
                    .map(|c| format!("cat__{}_{}", encoder.column, c)),
            );
        }
        names
    }

    /// Transform every row of `df` into a feature vector.
    ///
    /// Columns are looked up by name; extra columns are ignored.
    ///
    /// # Errors
    ///
    /// - [`PredictError::MissingColumn`] if an input column is absent
    /// - [`PredictError::NullValue`] if an input cell is null
    /// - [`PredictError::ValueOutOfRange`] for a non-finite or out-of-range number
    /// - [`PredictError::UnknownCategory`] for a category not seen at fit time
    /// - [`PredictError::Polars`] if a column has an incompatible type
    pub fn transform(&self, df: &DataFrame) -> Result<FeatureMatrix> {
        let width = self.output_width();
        let mut rows: FeatureMatrix = vec![Vec::with_capacity(width); df.height()];

        for scaler in &self.numeric {
            let series = input_series(df, &scaler.column)?.cast(&DataType::Float64)?;
            for (row, value) in rows.iter_mut().zip(series.f64()?.into_iter()) {
                let value = value.ok_or_else(|| PredictError::NullValue(scaler.column.clone()))?;
                row.push(scaler.apply(value)?);
            }
        }

        for encoder in &self.categorical {
            let series = input_series(df, &encoder.column)?;
            for (row, value) in rows.iter_mut().zip(series.str()?.into_iter()) {
                let value =
                    value.ok_or_else(|| PredictError::NullValue(encoder.column.clone()))?;
                encoder.encode_into(value, row)?;
            }
        }

        Ok(rows)
    }
}

fn input_series(df: &DataFrame, column: &str) -> Result<Series> {
    df.column(column)
        .map(|c| c.as_materialized_series().clone())
        .map_err(|_| PredictError::MissingColumn(column.to_string()))
}
