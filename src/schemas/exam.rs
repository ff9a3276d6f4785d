use serde::{Deserialize, Serialize};
use validator::Validate;

pub(crate) use crate::core::time::format_primitive;
use crate::schemas::submission::SubmissionResponse;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ExamCreate {
    #[serde(default)]
    #[serde(alias = "tallyFormId")]
    #[validate(length(min = 1, message = "tally_form_id must not be empty"))]
    pub(crate) tally_form_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamSummaryResponse {
    pub(crate) id: String,
    pub(crate) tally_form_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
    pub(crate) submission_count: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamResponse {
    pub(crate) id: String,
    pub(crate) tally_form_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) questions: serde_json::Value,
    pub(crate) created_at: String,
    pub(crate) submissions: Vec<SubmissionResponse>,
}
