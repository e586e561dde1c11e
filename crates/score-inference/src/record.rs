//! The prediction request record.
//!
//! A [`StudentRecord`] holds the seven attributes submitted for one student.
//! Its only behavior is [`to_data_frame()`](StudentRecord::to_data_frame),
//! which lays the fields out as a one-row table keyed by the column names the
//! preprocessor was fitted on.
//!
//! Categorical values other than gender are kept as plain strings. Whether a
//! value is acceptable is decided by the fitted preprocessor, not here.

use crate::error::{PredictError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names of the tabular record, in the order they are emitted.
pub mod columns {
    pub const GENDER: &str = "gender";
    pub const RACE_ETHNICITY: &str = "race_ethnicity";
    pub const PARENTAL_LEVEL_OF_EDUCATION: &str = "parental_level_of_education";
    pub const LUNCH: &str = "lunch";
    pub const TEST_PREPARATION_COURSE: &str = "test_preparation_course";
    pub const READING_SCORE: &str = "reading_score";
    pub const WRITING_SCORE: &str = "writing_score";

    /// All record columns.
    pub const ALL: [&str; 7] = [
        GENDER,
        RACE_ETHNICITY,
        PARENTAL_LEVEL_OF_EDUCATION,
        LUNCH,
        TEST_PREPARATION_COURSE,
        READING_SCORE,
        WRITING_SCORE,
    ];
}

/// Student gender as collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The category label used by the preprocessor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(PredictError::InvalidInput(format!(
                "Unknown gender '{}'. Expected 'male' or 'female'.",
                other
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One set of student attributes submitted for a single prediction.
///
/// Deserialization rejects unknown and missing fields, so a record that
/// exists always has all seven values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentRecord {
    pub gender: Gender,
    pub race_ethnicity: String,
    pub parental_level_of_education: String,
    pub lunch: String,
    pub test_preparation_course: String,
    pub reading_score: f64,
    pub writing_score: f64,
}

impl StudentRecord {
    /// Create a new record builder.
    pub fn builder() -> StudentRecordBuilder {
        StudentRecordBuilder::default()
    }

    /// Lay the record out as a single-row table.
    ///
    /// Column names match [`columns::ALL`] name-for-name. Values are not
    /// validated.
    pub fn to_data_frame(&self) -> Result<DataFrame> {
        let df = df! {
            columns::GENDER => &[self.gender.as_str()],
            columns::RACE_ETHNICITY => &[self.race_ethnicity.as_str()],
            columns::PARENTAL_LEVEL_OF_EDUCATION => &[self.parental_level_of_education.as_str()],
            columns::LUNCH => &[self.lunch.as_str()],
            columns::TEST_PREPARATION_COURSE => &[self.test_preparation_course.as_str()],
            columns::READING_SCORE => &[self.reading_score],
            columns::WRITING_SCORE => &[self.writing_score],
        }?;
        Ok(df)
    }
}

/// Builder for [`StudentRecord`].
///
/// `build()` fails with [`PredictError::InvalidInput`] naming the first
/// field that was never set.
#[derive(Debug, Clone, Default)]
pub struct StudentRecordBuilder {
    gender: Option<Gender>,
    race_ethnicity: Option<String>,
    parental_level_of_education: Option<String>,
    lunch: Option<String>,
    test_preparation_course: Option<String>,
    reading_score: Option<f64>,
    writing_score: Option<f64>,
}

impl StudentRecordBuilder {
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn race_ethnicity(mut self, value: impl Into<String>) -> Self {
        self.race_ethnicity = Some(value.into());
        self
    }

    pub fn parental_level_of_education(mut self, value: impl Into<String>) -> Self {
        self.parental_level_of_education = Some(value.into());
        self
    }

    pub fn lunch(mut self, value: impl Into<String>) -> Self {
        self.lunch = Some(value.into());
        self
    }

    pub fn test_preparation_course(mut self, value: impl Into<String>) -> Self {
        self.test_preparation_course = Some(value.into());
        self
    }

    pub fn reading_score(mut self, value: f64) -> Self {
        self.reading_score = Some(value);
        self
    }

    pub fn writing_score(mut self, value: f64) -> Self {
        self.writing_score = Some(value);
        self
    }

    /// Build the record.
    pub fn build(self) -> Result<StudentRecord> {
        Ok(StudentRecord {
            gender: require(self.gender, columns::GENDER)?,
            race_ethnicity: require(self.race_ethnicity, columns::RACE_ETHNICITY)?,
            parental_level_of_education: require(
                self.parental_level_of_education,
                columns::PARENTAL_LEVEL_OF_EDUCATION,
            )?,
            lunch: require(self.lunch, columns::LUNCH)?,
            test_preparation_course: require(
                self.test_preparation_course,
                columns::TEST_PREPARATION_COURSE,
            )?,
            reading_score: require(self.reading_score, columns::READING_SCORE)?,
            writing_score: require(self.writing_score, columns::WRITING_SCORE)?,
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| PredictError::InvalidInput(format!("Missing field '{}'", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StudentRecord {
        StudentRecord::builder()
            .gender(Gender::Female)
            .race_ethnicity("group B")
            .parental_level_of_education("bachelor's degree")
            .lunch("standard")
            .test_preparation_course("completed")
            .reading_score(72.0)
            .writing_score(74.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_to_data_frame_columns() {
        let df = sample().to_data_frame().unwrap();
        assert_eq!(df.height(), 1);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, columns::ALL.to_vec());
    }

    #[test]
    fn test_to_data_frame_values() {
        let df = sample().to_data_frame().unwrap();
        let ethnicity = df
            .column(columns::RACE_ETHNICITY)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .get(0);
        assert_eq!(ethnicity, Some("group B"));

        let reading = df
            .column(columns::READING_SCORE)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0);
        assert_eq!(reading, Some(72.0));
    }

    #[test]
    fn test_builder_reports_missing_field() {
        let err = StudentRecord::builder()
            .gender(Gender::Male)
            .race_ethnicity("group A")
            .build()
            .unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
        assert!(err.to_string().contains("parental_level_of_education"));
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_parse_is_exact() {
        // Labels must match the fitted categories, like every other column
        for label in ["FEMALE", "Female", " male "] {
            let err = label.parse::<Gender>().unwrap_err();
            assert!(matches!(err, PredictError::InvalidInput(_)), "{}", label);
            assert!(err.to_string().contains(label));
        }
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = serde_json::json!({
            "gender": "female",
            "race_ethnicity": "group B",
            "parental_level_of_education": "high school",
            "lunch": "standard",
            "test_preparation_course": "none",
            "reading_score": 60.0,
            "writing_score": 61.0,
            "math_score": 70.0
        });
        assert!(serde_json::from_value::<StudentRecord>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_fields() {
        let json = serde_json::json!({
            "gender": "female",
            "race_ethnicity": "group B",
            "lunch": "standard"
        });
        assert!(serde_json::from_value::<StudentRecord>(json).is_err());
    }
}
