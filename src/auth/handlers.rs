use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        jwt::{AuthUser, JwtKeys},
        password::{check_password, hash_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{3,20}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

fn token_pair(keys: &JwtKeys, user_id: i64) -> Result<(String, String), ApiError> {
    let access = keys.sign_access(user_id)?;
    let refresh = keys.sign_refresh(user_id)?;
    Ok((access, refresh))
}

/// A refresh token for a user row that no longer exists is just a bad
/// credential; the auth boundary never says which part failed.
fn stale_refresh_user(e: ApiError) -> ApiError {
    match e {
        ApiError::NotFound(_) => ApiError::InvalidCredentials,
        other => other,
    }
}

fn public(user: User) -> PublicUser {
    PublicUser {
        user_id: user.user_id,
        username: user.username,
        email: user.email,
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err(ApiError::Validation(
            "Username must be 3-20 characters: letters, numbers, underscores".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    let hash = hash_password(&payload.password)?;

    // Uniqueness of username and email is enforced by the table constraints;
    // the insert surfaces a violation as DuplicateKey.
    let user = User::create(&state.db, &payload.username, &payload.email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = token_pair(&keys, user.user_id)?;

    info!(user_id = %user.user_id, username = %user.username, "user registered");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: public(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.username = payload.username.trim().to_string();

    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::InvalidCredentials);
        }
    };

    check_password(&payload.password, &user.password_hash).map_err(|e| {
        if matches!(e, ApiError::InvalidCredentials) {
            warn!(username = %payload.username, user_id = %user.user_id, "login invalid password");
        }
        e
    })?;

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = token_pair(&keys, user.user_id)?;

    info!(user_id = %user.user_id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: public(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(stale_refresh_user)?;
    let (access_token, refresh_token) = token_pair(&keys, user.user_id)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: public(user),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id).await?;
    Ok(Json(public(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules_match_registration_form() {
        assert!(is_valid_username("ada_lovelace"));
        assert!(is_valid_username("abc"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("this_username_is_way_too_long"));
        assert!(!is_valid_username("no spaces"));
        assert!(!is_valid_username("dot.ted"));
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn refresh_for_deleted_user_is_invalid_credentials() {
        let err = stale_refresh_user(ApiError::NotFound("user"));
        assert!(matches!(err, ApiError::InvalidCredentials));
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
        // Other failures keep their own status.
        let err = stale_refresh_user(ApiError::Internal(anyhow::anyhow!("pool closed")));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn public_user_serialization_hides_nothing_sensitive() {
        let response = PublicUser {
            user_id: 1,
            username: "tester".into(),
            email: "test@example.com".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("tester"));
        assert!(!json.contains("password"));
    }
}
