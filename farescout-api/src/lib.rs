use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod middleware;
pub mod search;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Flight search is only reachable with a live session.
    let flights = search::routes().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::session_auth_middleware,
    ));

    Router::new()
        .nest("/v1/auth", auth::routes())
        .nest("/v1/flights", flights)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
