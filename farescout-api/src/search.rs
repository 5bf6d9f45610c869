use axum::{extract::State, routing::post, Json, Router};

use farescout_core::search::{SearchOutcome, SearchParams, SearchResult};

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", post(search_flights))
}

async fn search_flights(
    State(state): State<AppState>,
    Json(params): Json<SearchParams>,
) -> Result<Json<SearchResult>, AppError> {
    // Invalid input is the only caller-visible failure; everything past this
    // point falls back to generated flights instead of erroring.
    params
        .validate()
        .map_err(|err| AppError::ValidationError(err.to_string()))?;

    let outcome = state.search.search(&params).await;
    if let SearchOutcome::Mocked(_) = &outcome {
        tracing::info!(
            origin = params.origin.as_str(),
            destination = params.destination.as_str(),
            "serving generated flights"
        );
    }
    Ok(Json(outcome.into_result()))
}
