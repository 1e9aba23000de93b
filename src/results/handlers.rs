use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    answers::repo::Answer,
    auth::AuthUser,
    error::ApiError,
    results::{dto::ResultResponse, repo::AssessmentResult, scoring},
    sessions::repo::Session,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/sessions/:id/result", post(compute_result).get(get_result))
}

/// Aggregate the session's answers into sub-scores and a severity label,
/// then persist the one result row for this session.
#[instrument(skip(state))]
pub async fn compute_result(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
) -> Result<(StatusCode, Json<ResultResponse>), ApiError> {
    Session::find_owned(&state.db, user_id, session_id).await?;

    let answers = Answer::list_by_session(&state.db, session_id).await?;
    let scores = scoring::aggregate(&answers, &state.config.scoring)?;

    let result = AssessmentResult::insert(&state.db, session_id, &scores).await?;
    info!(
        user_id,
        session_id,
        label = %scores.final_label,
        answers = answers.len(),
        "result computed"
    );
    Ok((StatusCode::CREATED, Json(result.into())))
}

#[instrument(skip(state))]
pub async fn get_result(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
) -> Result<Json<ResultResponse>, ApiError> {
    Session::find_owned(&state.db, user_id, session_id).await?;
    let result = AssessmentResult::find_by_session(&state.db, session_id).await?;
    Ok(Json(result.into()))
}
