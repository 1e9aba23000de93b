use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to API callers. All are recoverable at the request
/// boundary; only `Internal` hides its detail from the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("duplicate key: {0}")]
    DuplicateKey(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("insufficient data: {0}")]
    InsufficientData(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateKey(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Maps constraint violations onto the domain taxonomy. `entity` names what
/// the statement was touching, for NotFound/DuplicateKey messages.
pub fn db_error(e: sqlx::Error, entity: &'static str) -> ApiError {
    match classify_sqlstate(&e) {
        Some(DbViolation::Unique) => ApiError::DuplicateKey(entity),
        Some(DbViolation::ForeignKey) => ApiError::NotFound(entity),
        None => match e {
            sqlx::Error::RowNotFound => ApiError::NotFound(entity),
            other => ApiError::Internal(other.into()),
        },
    }
}

#[derive(Debug, PartialEq, Eq)]
enum DbViolation {
    Unique,
    ForeignKey,
}

fn classify_sqlstate(e: &sqlx::Error) -> Option<DbViolation> {
    let db = match e {
        sqlx::Error::Database(db) => db,
        _ => return None,
    };
    match db.code().as_deref() {
        Some("23505") => Some(DbViolation::Unique),
        Some("23503") => Some(DbViolation::ForeignKey),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    /// Minimal database error carrying just a SQLSTATE and a constraint
    /// name, for exercising the classifier without a live connection.
    #[derive(Debug)]
    pub(crate) struct StubDbError {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.code)
        }
    }

    impl StdError for StubDbError {}

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    pub(crate) fn db_err(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDbError { code, constraint }))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::db_err;
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::DuplicateKey("users").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::NotFound("session").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InsufficientData("no answers").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unique_violation_maps_to_duplicate_key() {
        let err = db_error(db_err("23505", Some("users_username_key")), "user");
        assert!(matches!(err, ApiError::DuplicateKey("user")));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn foreign_key_violation_maps_to_not_found() {
        let err = db_error(db_err("23503", Some("sessions_user_id_fkey")), "user");
        assert!(matches!(err, ApiError::NotFound("user")));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_sqlstates_stay_internal() {
        let err = db_error(db_err("57014", None), "user");
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = db_error(sqlx::Error::RowNotFound, "session");
        assert!(matches!(err, ApiError::NotFound("session")));
    }

    #[test]
    fn non_db_errors_stay_internal() {
        let err = db_error(sqlx::Error::PoolClosed, "users");
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
