use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{auth::AuthUser, error::ApiError, questions::repo::Question, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/questions", get(list_questions))
}

#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = Question::list(&state.db).await?;
    Ok(Json(questions))
}
