use axum::{extract::Path, extract::State, routing::post, Json, Router};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::services::ingest;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/tally/:exam_id", post(receive_tally_submission))
}

/// Tally posts one event per completed form. Delivery retries are the
/// provider's concern; every accepted event becomes its own submission row,
/// so repeated deliveries produce duplicate rows rather than conflicts.
async fn receive_tally_submission(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(data) = ingest::payload_data(&body) else {
        return Err(ApiError::BadRequest("Invalid payload".to_string()));
    };

    let exam = repositories::exams::find_by_id(state.db(), &exam_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch exam"))?;

    let Some(exam) = exam else {
        return Err(ApiError::NotFound("Exam not found".to_string()));
    };

    let student_id = ingest::extract_student_id(data);

    let submission = repositories::submissions::create(
        state.db(),
        repositories::submissions::CreateSubmission {
            id: &Uuid::new_v4().to_string(),
            exam_id: &exam.id,
            student_id: &student_id,
            answers: data.clone(),
            submitted_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to store submission"))?;

    tracing::info!(
        exam_id = %exam.id,
        submission_id = %submission.id,
        student_id = %submission.student_id,
        "Webhook submission stored"
    );

    Ok(Json(serde_json::json!({ "success": true, "submission_id": submission.id })))
}
