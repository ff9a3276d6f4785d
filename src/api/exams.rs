use axum::{extract::Path, extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::Exam;
use crate::repositories;
use crate::schemas::exam::{format_primitive, ExamCreate, ExamResponse, ExamSummaryResponse};
use crate::schemas::submission::SubmissionResponse;
use crate::services::questions::{render_questions, DisplayQuestion};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam).get(list_exams))
        .route("/:exam_id", get(get_exam))
        .route("/:exam_id/questions", get(get_exam_questions))
}

async fn create_exam(
    State(state): State<AppState>,
    Json(payload): Json<ExamCreate>,
) -> Result<(StatusCode, Json<ExamResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // One fetch per creation; the result is frozen into the exam row.
    let questions = state
        .tally()
        .fetch_form(&payload.tally_form_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch Tally form"))?;

    let now = primitive_now_utc();
    let exam = repositories::exams::create(
        state.db(),
        repositories::exams::CreateExam {
            id: &Uuid::new_v4().to_string(),
            tally_form_id: &payload.tally_form_id,
            title: &payload.title,
            description: payload.description.as_deref(),
            questions,
            created_at: now,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Exam with this Tally form ID already exists".to_string())
        } else {
            ApiError::internal(e, "Failed to create exam")
        }
    })?;

    tracing::info!(exam_id = %exam.id, tally_form_id = %exam.tally_form_id, "Exam created");

    Ok((StatusCode::CREATED, Json(exam_to_response(exam, Vec::new()))))
}

async fn list_exams(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamSummaryResponse>>, ApiError> {
    let rows = repositories::exams::list_newest_first(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list exams"))?;

    let summaries = rows
        .into_iter()
        .map(|row| ExamSummaryResponse {
            id: row.id,
            tally_form_id: row.tally_form_id,
            title: row.title,
            description: row.description,
            created_at: format_primitive(row.created_at),
            submission_count: row.submission_count,
        })
        .collect();

    Ok(Json(summaries))
}

async fn get_exam(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ExamResponse>, ApiError> {
    let exam = repositories::exams::find_by_id(state.db(), &exam_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch exam"))?;

    let Some(exam) = exam else {
        return Err(ApiError::NotFound("Exam not found".to_string()));
    };

    let submissions = repositories::submissions::list_by_exam(state.db(), &exam.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list submissions"))?;

    let submissions = submissions.into_iter().map(SubmissionResponse::from).collect();

    Ok(Json(exam_to_response(exam, submissions)))
}

async fn get_exam_questions(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<DisplayQuestion>>, ApiError> {
    let exam = repositories::exams::find_by_id(state.db(), &exam_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch exam"))?;

    let Some(exam) = exam else {
        return Err(ApiError::NotFound("Exam not found".to_string()));
    };

    Ok(Json(render_questions(&exam.questions.0)))
}

fn exam_to_response(exam: Exam, submissions: Vec<SubmissionResponse>) -> ExamResponse {
    ExamResponse {
        id: exam.id,
        tally_form_id: exam.tally_form_id,
        title: exam.title,
        description: exam.description,
        questions: exam.questions.0,
        created_at: format_primitive(exam.created_at),
        submissions,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests;
