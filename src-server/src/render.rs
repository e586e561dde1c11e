//! HTML pages.
//!
//! Pages are small enough to be assembled with `format!`. Anything that came
//! from the request is escaped before it is written into the page.

use score_inference::PredictError;

/// Choices offered by the form. They mirror the categories of the shipped
/// preprocessor; values outside these lists are still accepted on POST.
const GENDERS: [&str; 2] = ["male", "female"];
const ETHNICITIES: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
const EDUCATION_LEVELS: [&str; 6] = [
    "associate's degree",
    "bachelor's degree",
    "high school",
    "master's degree",
    "some college",
    "some high school",
];
const LUNCH_TYPES: [&str; 2] = ["free/reduced", "standard"];
const TEST_PREPARATION: [&str; 2] = ["none", "completed"];

/// What to show under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A predicted score.
    Score(f64),
    /// A failure, rendered as `Error [<code>]: <message>`.
    Failed { code: String, message: String },
}

impl From<PredictError> for Outcome {
    fn from(err: PredictError) -> Self {
        Outcome::Failed {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Landing page.
pub fn index_page() -> String {
    layout(
        "Student Score Predictor",
        "<h1>Student Score Predictor</h1>\n\
         <p>Estimate a student's math score from their background and their reading and writing scores.</p>\n\
         <p><a href=\"/predictdata\">Start a prediction</a></p>",
    )
}

/// The prediction form, optionally followed by a result or an error.
pub fn home_page(outcome: Option<&Outcome>) -> String {
    let mut body = String::from("<h1>Student Exam Performance Indicator</h1>\n");
    body.push_str("<form action=\"/predictdata\" method=\"post\">\n");
    body.push_str(&select("gender", "Gender", &GENDERS));
    body.push_str(&select("ethnicity", "Race or Ethnicity", &ETHNICITIES));
    body.push_str(&select(
        "parental_level_of_education",
        "Parental Level of Education",
        &EDUCATION_LEVELS,
    ));
    body.push_str(&select("lunch", "Lunch Type", &LUNCH_TYPES));
    body.push_str(&select(
        "test_preparation_course",
        "Test Preparation Course",
        &TEST_PREPARATION,
    ));
    body.push_str(&score_input("reading_score", "Reading Score out of 100"));
    body.push_str(&score_input("writing_score", "Writing Score out of 100"));
    body.push_str("<input type=\"submit\" value=\"Predict your Maths Score\">\n</form>\n");

    match outcome {
        Some(Outcome::Score(score)) => {
            body.push_str(&format!(
                "<h2 id=\"result\">The prediction is {:.2}</h2>\n",
                score
            ));
        }
        Some(Outcome::Failed { code, message }) => {
            body.push_str(&format!(
                "<div class=\"error\" id=\"error\">Error [{}]: {}</div>\n",
                escape(code),
                escape(message)
            ));
        }
        None => {}
    }

    layout("Student Exam Performance Indicator", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n\
         <body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn select(name: &str, label: &str, options: &[&str]) -> String {
    let mut html = format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\" required>\n\
         <option value=\"\" disabled selected>Select your {label}</option>\n"
    );
    for option in options {
        let option = escape(option);
        html.push_str(&format!("<option value=\"{option}\">{option}</option>\n"));
    }
    html.push_str("</select>\n");
    html
}

fn score_input(name: &str, label: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"0\" max=\"100\" step=\"any\" required>\n"
    )
}

/// Escape text for use inside HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_without_outcome() {
        let page = home_page(None);
        assert!(page.contains("name=\"ethnicity\""));
        assert!(page.contains("bachelor&#39;s degree"));
        assert!(!page.contains("id=\"result\""));
        assert!(!page.contains("id=\"error\""));
    }

    #[test]
    fn test_home_page_with_score() {
        let page = home_page(Some(&Outcome::Score(62.518)));
        assert!(page.contains("The prediction is 62.52"));
    }

    #[test]
    fn test_error_is_escaped() {
        let outcome = Outcome::from(PredictError::UnknownCategory {
            column: "race_ethnicity".to_string(),
            value: "<script>".to_string(),
        });
        let page = home_page(Some(&outcome));
        assert!(page.contains("Error [PREPROCESSING_ERROR]"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
