use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{db_error, ApiError};

/// One assessment attempt. `end_time` stays NULL while in progress.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub session_id: i64,
    pub user_id: i64,
    pub start_time: OffsetDateTime,
    pub end_time: Option<OffsetDateTime>,
}

impl Session {
    /// Open a new session for `user_id`. A missing user trips the FK and
    /// surfaces as NotFound.
    pub async fn start(db: &PgPool, user_id: i64) -> Result<Session, ApiError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id)
            VALUES ($1)
            RETURNING session_id, user_id, start_time, end_time
            "#,
        )
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(|e| db_error(e, "user"))?;
        Ok(session)
    }

    /// Close an open session. Not idempotent: a session that is missing,
    /// owned by someone else, or already closed yields NotFound.
    pub async fn close(db: &PgPool, user_id: i64, session_id: i64) -> Result<Session, ApiError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions
            SET end_time = now()
            WHERE session_id = $1 AND user_id = $2 AND end_time IS NULL
            RETURNING session_id, user_id, start_time, end_time
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| db_error(e, "session"))?;
        session.ok_or(ApiError::NotFound("session"))
    }

    pub async fn find_owned(
        db: &PgPool,
        user_id: i64,
        session_id: i64,
    ) -> Result<Session, ApiError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT session_id, user_id, start_time, end_time
            FROM sessions
            WHERE session_id = $1 AND user_id = $2
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| db_error(e, "session"))?;
        session.ok_or(ApiError::NotFound("session"))
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Session>, ApiError> {
        let rows = sqlx::query_as::<_, Session>(
            r#"
            SELECT session_id, user_id, start_time, end_time
            FROM sessions
            WHERE user_id = $1
            ORDER BY start_time DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(|e| db_error(e, "session"))?;
        Ok(rows)
    }

    /// Delete a session. Its result row cascades away; its answers survive
    /// with `session_id` set NULL by the schema.
    pub async fn delete(db: &PgPool, user_id: i64, session_id: i64) -> Result<(), ApiError> {
        let res = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE session_id = $1 AND user_id = $2
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .execute(db)
        .await
        .map_err(|e| db_error(e, "session"))?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("session"));
        }
        Ok(())
    }
}
