use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::ApiError,
    sessions::{
        dto::{Pagination, SessionResponse},
        repo::Session,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session).get(list_sessions))
        .route("/sessions/:id/close", post(close_session))
        .route("/sessions/:id", delete(delete_session).get(get_session))
}

fn to_response(s: Session) -> SessionResponse {
    SessionResponse {
        session_id: s.session_id,
        start_time: s.start_time,
        end_time: s.end_time,
    }
}

#[instrument(skip(state))]
pub async fn start_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = Session::start(&state.db, user_id).await?;
    info!(user_id, session_id = session.session_id, "session started");
    Ok((StatusCode::CREATED, Json(to_response(session))))
}

#[instrument(skip(state))]
pub async fn close_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = Session::close(&state.db, user_id, session_id).await?;
    info!(user_id, session_id, "session closed");
    Ok(Json(to_response(session)))
}

#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = Session::find_owned(&state.db, user_id, session_id).await?;
    Ok(Json(to_response(session)))
}

#[instrument(skip(state))]
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let sessions = Session::list_by_user(&state.db, user_id, p.limit, p.offset).await?;
    Ok(Json(sessions.into_iter().map(to_response).collect()))
}

#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    Session::delete(&state.db, user_id, session_id).await?;
    info!(user_id, session_id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}
