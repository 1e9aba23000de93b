use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{db_error, ApiError};
use crate::results::scoring::Scores;

/// Persisted aggregation outcome for one session. Written once; deleted
/// only by the cascade when its session goes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentResult {
    pub result_id: i64,
    pub session_id: i64,
    pub facial_score: Option<f64>,
    pub vocal_score: Option<f64>,
    pub linguistic_score: Option<f64>,
    pub heartbeat_score: Option<f64>,
    pub final_label: Option<String>,
    pub created_at: OffsetDateTime,
}

impl AssessmentResult {
    /// Persist the scores for a session. The unique index on `session_id`
    /// makes a second aggregation fail with DuplicateKey.
    pub async fn insert(
        db: &PgPool,
        session_id: i64,
        scores: &Scores,
    ) -> Result<AssessmentResult, ApiError> {
        let result = sqlx::query_as::<_, AssessmentResult>(
            r#"
            INSERT INTO results
                (session_id, facial_score, vocal_score, linguistic_score,
                 heartbeat_score, final_label)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING result_id, session_id, facial_score, vocal_score,
                      linguistic_score, heartbeat_score, final_label, created_at
            "#,
        )
        .bind(session_id)
        .bind(scores.facial)
        .bind(scores.vocal)
        .bind(scores.linguistic)
        .bind(scores.heartbeat)
        .bind(scores.final_label)
        .fetch_one(db)
        .await
        .map_err(|e| db_error(e, "result"))?;
        Ok(result)
    }

    pub async fn find_by_session(
        db: &PgPool,
        session_id: i64,
    ) -> Result<AssessmentResult, ApiError> {
        let result = sqlx::query_as::<_, AssessmentResult>(
            r#"
            SELECT result_id, session_id, facial_score, vocal_score,
                   linguistic_score, heartbeat_score, final_label, created_at
            FROM results
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(db)
        .await
        .map_err(|e| db_error(e, "result"))?;
        result.ok_or(ApiError::NotFound("result"))
    }
}
