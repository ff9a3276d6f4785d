use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::SubmissionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Exam {
    pub(crate) id: String,
    pub(crate) tally_form_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    /// Form structure as fetched at creation time. Frozen: never re-synced.
    pub(crate) questions: Json<serde_json::Value>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Submission {
    pub(crate) id: String,
    pub(crate) exam_id: String,
    pub(crate) student_id: String,
    pub(crate) answers: Json<serde_json::Value>,
    pub(crate) status: SubmissionStatus,
    pub(crate) score: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) submitted_at: PrimitiveDateTime,
}
