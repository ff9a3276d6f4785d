use sqlx::types::Json;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::Exam;

pub(crate) const COLUMNS: &str =
    "id, tally_form_id, title, description, questions, created_at";

pub(crate) struct CreateExam<'a> {
    pub(crate) id: &'a str,
    pub(crate) tally_form_id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) questions: serde_json::Value,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateExam<'_>) -> Result<Exam, sqlx::Error> {
    sqlx::query_as::<_, Exam>(&format!(
        "INSERT INTO exams (id, tally_form_id, title, description, questions, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.tally_form_id)
    .bind(params.title)
    .bind(params.description)
    .bind(Json(params.questions))
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(&format!("SELECT {COLUMNS} FROM exams WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ExamListRow {
    pub(crate) id: String,
    pub(crate) tally_form_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) submission_count: i64,
}

pub(crate) async fn list_newest_first(pool: &PgPool) -> Result<Vec<ExamListRow>, sqlx::Error> {
    sqlx::query_as::<_, ExamListRow>(
        "SELECT e.id, e.tally_form_id, e.title, e.description, e.created_at,
                COALESCE(sc.cnt, 0) AS submission_count
         FROM exams e
         LEFT JOIN (SELECT exam_id, COUNT(*) AS cnt FROM submissions GROUP BY exam_id) sc
             ON sc.exam_id = e.id
         ORDER BY e.created_at DESC",
    )
    .fetch_all(pool)
    .await
}
