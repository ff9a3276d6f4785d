use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "submissionstatus", rename_all = "UPPERCASE")]
pub(crate) enum SubmissionStatus {
    Pending,
    Graded,
}
