use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{db_error, ApiError};

/// One assessment prompt. Reference data seeded by migration; id order is
/// questionnaire order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub created_at: OffsetDateTime,
}

impl Question {
    pub async fn list(db: &PgPool) -> Result<Vec<Question>, ApiError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question_text, created_at
            FROM questions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(db)
        .await
        .map_err(|e| db_error(e, "question"))?;
        Ok(rows)
    }
}
