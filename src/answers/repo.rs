use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{db_error, ApiError};

/// One question-answer event with the signals observed while it was given.
/// Append-only: rows are never updated. The session/question references are
/// nullable so an answer outlives a deleted session or question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub session_id: Option<i64>,
    pub question_id: Option<i64>,
    pub answer_text: String,
    pub facial_emotion: Option<String>,
    pub vocal_features: Option<serde_json::Value>,
    pub linguistic_score: Option<f64>,
    pub heartbeat: Option<i32>,
    pub created_at: OffsetDateTime,
}

pub struct NewAnswer<'a> {
    pub session_id: i64,
    pub question_id: i64,
    pub answer_text: &'a str,
    pub facial_emotion: Option<&'a str>,
    pub vocal_features: Option<serde_json::Value>,
    pub linguistic_score: Option<f64>,
    pub heartbeat: Option<i32>,
}

/// The insert can trip either reference: the question FK when the caller
/// sends a bad question_id, or the session FK when the session was deleted
/// after the ownership check. The constraint name says which one broke.
fn record_error(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23503") {
            return match db.constraint() {
                Some(c) if c.contains("session") => ApiError::NotFound("session"),
                _ => ApiError::NotFound("question"),
            };
        }
    }
    db_error(e, "answer")
}

impl Answer {
    /// Append one answer row. A missing session or question trips its FK
    /// and surfaces as NotFound for that entity.
    pub async fn record(db: &PgPool, new: NewAnswer<'_>) -> Result<Answer, ApiError> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers
                (session_id, question_id, answer_text, facial_emotion,
                 vocal_features, linguistic_score, heartbeat)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, session_id, question_id, answer_text, facial_emotion,
                      vocal_features, linguistic_score, heartbeat, created_at
            "#,
        )
        .bind(new.session_id)
        .bind(new.question_id)
        .bind(new.answer_text)
        .bind(new.facial_emotion)
        .bind(new.vocal_features)
        .bind(new.linguistic_score)
        .bind(new.heartbeat)
        .fetch_one(db)
        .await
        .map_err(record_error)?;
        Ok(answer)
    }

    pub async fn list_by_session(db: &PgPool, session_id: i64) -> Result<Vec<Answer>, ApiError> {
        let rows = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, session_id, question_id, answer_text, facial_emotion,
                   vocal_features, linguistic_score, heartbeat, created_at
            FROM answers
            WHERE session_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(db)
        .await
        .map_err(|e| db_error(e, "answer"))?;
        Ok(rows)
    }
}
