use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    answers::{
        dto::RecordAnswerRequest,
        repo::{Answer, NewAnswer},
    },
    auth::AuthUser,
    error::ApiError,
    sessions::repo::Session,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/sessions/:id/answers",
        post(record_answer).get(list_answers),
    )
}

#[instrument(skip(state, payload))]
pub async fn record_answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
    Json(payload): Json<RecordAnswerRequest>,
) -> Result<(StatusCode, Json<Answer>), ApiError> {
    // Ownership check doubles as the session existence check.
    Session::find_owned(&state.db, user_id, session_id).await?;

    let answer = Answer::record(
        &state.db,
        NewAnswer {
            session_id,
            question_id: payload.question_id,
            answer_text: &payload.answer_text,
            facial_emotion: payload.facial_emotion.as_deref(),
            vocal_features: payload.vocal_features.clone(),
            linguistic_score: payload.linguistic_score,
            heartbeat: payload.heartbeat,
        },
    )
    .await?;

    info!(user_id, session_id, answer_id = answer.id, "answer recorded");
    Ok((StatusCode::CREATED, Json(answer)))
}

#[instrument(skip(state))]
pub async fn list_answers(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
) -> Result<Json<Vec<Answer>>, ApiError> {
    Session::find_owned(&state.db, user_id, session_id).await?;
    let answers = Answer::list_by_session(&state.db, session_id).await?;
    Ok(Json(answers))
}
