use axum::{extract::Path, extract::State, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::submission::{coerce_score, GradeRequest, SubmissionResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/:submission_id/grade", post(grade_submission))
}

/// Applies a teacher's grade. The previous grade, if any, is overwritten;
/// the submission moves to GRADED even when no score is supplied.
async fn grade_submission(
    Path(submission_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<GradeRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let score = match &payload.score {
        Some(raw) => Some(
            coerce_score(raw)
                .ok_or_else(|| ApiError::BadRequest("score must be numeric".to_string()))?,
        ),
        None => None,
    };

    let submission = repositories::submissions::grade(
        state.db(),
        &submission_id,
        score,
        payload.feedback.as_deref(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to grade submission"))?;

    let Some(submission) = submission else {
        return Err(ApiError::NotFound("Submission not found".to_string()));
    };

    tracing::info!(
        submission_id = %submission.id,
        score = ?submission.score,
        "Submission graded"
    );

    Ok(Json(SubmissionResponse::from(submission)))
}
