use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use farescout_core::pii::Masked;
use farescout_store::{AuthError, UserAccount};

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: Masked<String>,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: uuid::Uuid,
    pub email: String,
    pub full_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserAccount> for UserView {
    fn from(user: UserAccount) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    tracing::debug!(?req, "signup request");
    let (user, token) = state
        .sessions
        .sign_up(&req.email, &req.password.0, &req.full_name)
        .await
        .map_err(auth_error)?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.into(),
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (user, token) = state
        .sessions
        .login(&req.email, &req.password.0)
        .await
        .map_err(auth_error)?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.into(),
    }))
}

async fn logout(State(state): State<AppState>) -> Result<Json<LogoutResponse>, AppError> {
    state.sessions.logout().await.map_err(auth_error)?;
    Ok(Json(LogoutResponse { success: true }))
}

async fn me(State(state): State<AppState>) -> Json<Option<UserView>> {
    Json(state.sessions.current_user().await.map(UserView::from))
}

fn auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::EmailTaken => AppError::ConflictError(err.to_string()),
        AuthError::InvalidCredentials => AppError::AuthenticationError(err.to_string()),
        AuthError::InvalidEmail | AuthError::WeakPassword | AuthError::MissingName => {
            AppError::ValidationError(err.to_string())
        }
        AuthError::Storage(_) => AppError::InternalServerError(err.to_string()),
    }
}
