//! Decoding of the prediction form.
//!
//! Every field is optional at the decoding stage so that a missing or
//! malformed field is rendered on the form page as an error instead of being
//! rejected by the router.

use score_inference::{Gender, PredictError, PredictResult, StudentRecord};
use serde::Deserialize;

/// Raw fields posted to `/predictdata`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictForm {
    pub gender: Option<String>,
    pub ethnicity: Option<String>,
    pub parental_level_of_education: Option<String>,
    pub lunch: Option<String>,
    pub test_preparation_course: Option<String>,
    pub reading_score: Option<String>,
    pub writing_score: Option<String>,
}

impl PredictForm {
    /// Convert the submitted fields into a record.
    ///
    /// With `swap_score_fields` set, the submitted reading score becomes the
    /// record's writing score and vice versa.
    pub fn into_record(self, swap_score_fields: bool) -> PredictResult<StudentRecord> {
        let gender: Gender = required(self.gender, "gender")?.parse()?;
        let reading = parse_score(required(self.reading_score, "reading_score")?, "reading_score")?;
        let writing = parse_score(required(self.writing_score, "writing_score")?, "writing_score")?;

        let (reading, writing) = if swap_score_fields {
            (writing, reading)
        } else {
            (reading, writing)
        };

        StudentRecord::builder()
            .gender(gender)
            .race_ethnicity(required(self.ethnicity, "ethnicity")?)
            .parental_level_of_education(required(
                self.parental_level_of_education,
                "parental_level_of_education",
            )?)
            .lunch(required(self.lunch, "lunch")?)
            .test_preparation_course(required(
                self.test_preparation_course,
                "test_preparation_course",
            )?)
            .reading_score(reading)
            .writing_score(writing)
            .build()
    }
}

fn required(value: Option<String>, field: &str) -> PredictResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PredictError::InvalidInput(format!("Missing field '{}'", field)))
}

fn parse_score(raw: String, field: &str) -> PredictResult<f64> {
    raw.parse::<f64>().map_err(|_| {
        PredictError::InvalidInput(format!("Field '{}' is not a number: '{}'", field, raw))
    })
}
