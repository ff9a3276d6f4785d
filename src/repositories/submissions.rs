use sqlx::types::Json;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::Submission;
use crate::db::types::SubmissionStatus;

pub(crate) const COLUMNS: &str =
    "id, exam_id, student_id, answers, status, score, feedback, submitted_at";

pub(crate) struct CreateSubmission<'a> {
    pub(crate) id: &'a str,
    pub(crate) exam_id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) answers: serde_json::Value,
    pub(crate) submitted_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateSubmission<'_>,
) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "INSERT INTO submissions (id, exam_id, student_id, answers, status, submitted_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.exam_id)
    .bind(params.student_id)
    .bind(Json(params.answers))
    .bind(SubmissionStatus::Pending)
    .bind(params.submitted_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_by_exam(
    pool: &PgPool,
    exam_id: &str,
) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "SELECT {COLUMNS} FROM submissions WHERE exam_id = $1 ORDER BY submitted_at DESC"
    ))
    .bind(exam_id)
    .fetch_all(pool)
    .await
}

/// Applies a grade and moves the row to GRADED. Overwrites any previous grade.
pub(crate) async fn grade(
    pool: &PgPool,
    id: &str,
    score: Option<f64>,
    feedback: Option<&str>,
) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(&format!(
        "UPDATE submissions
         SET score = $1, feedback = $2, status = $3
         WHERE id = $4
         RETURNING {COLUMNS}"
    ))
    .bind(score)
    .bind(feedback)
    .bind(SubmissionStatus::Graded)
    .bind(id)
    .fetch_optional(pool)
    .await
}
