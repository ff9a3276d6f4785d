use serde::{Deserialize, Serialize};

pub(crate) use crate::core::time::format_primitive;
use crate::db::models::Submission;
use crate::db::types::SubmissionStatus;

#[derive(Debug, Deserialize)]
pub(crate) struct GradeRequest {
    #[serde(default)]
    pub(crate) score: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) feedback: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionResponse {
    pub(crate) id: String,
    pub(crate) exam_id: String,
    pub(crate) student_id: String,
    pub(crate) answers: serde_json::Value,
    pub(crate) status: SubmissionStatus,
    pub(crate) score: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) submitted_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            exam_id: submission.exam_id,
            student_id: submission.student_id,
            answers: submission.answers.0,
            status: submission.status,
            score: submission.score,
            feedback: submission.feedback,
            submitted_at: format_primitive(submission.submitted_at),
        }
    }
}

/// Accepts a JSON number or a numeric string; the caller's type is not
/// trusted. Non-finite results are rejected rather than stored.
pub(crate) fn coerce_score(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => {
            raw.trim().parse::<f64>().ok().filter(|score| score.is_finite())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::coerce_score;
    use serde_json::json;

    #[test]
    fn coerce_score_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_score(&json!(85)), Some(85.0));
        assert_eq!(coerce_score(&json!(-3.5)), Some(-3.5));
        assert_eq!(coerce_score(&json!("85")), Some(85.0));
        assert_eq!(coerce_score(&json!(" 42.5 ")), Some(42.5));
    }

    #[test]
    fn coerce_score_rejects_everything_else() {
        assert_eq!(coerce_score(&json!("abc")), None);
        assert_eq!(coerce_score(&json!("NaN")), None);
        assert_eq!(coerce_score(&json!("inf")), None);
        assert_eq!(coerce_score(&json!(true)), None);
        assert_eq!(coerce_score(&json!({ "value": 85 })), None);
        assert_eq!(coerce_score(&json!([85])), None);
    }
}
