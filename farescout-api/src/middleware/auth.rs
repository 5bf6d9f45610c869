use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Session gate: the presented bearer token must match the stored session
/// token exactly. No token on file means nobody is logged in.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Compare against the live session
    let current = state.sessions.token().await.ok_or(StatusCode::UNAUTHORIZED)?;
    if token != current {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}
