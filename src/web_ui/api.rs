use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use crate::entities::{HomePageContent, MediaItem, Trip};
use crate::web_ui::error::ApiError;
use crate::web_ui::{AppState, Result};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/trips", get(get_all_trips))
        .route("/api/trips/:trip_id", get(get_trip))
        .route("/api/trips/:trip_id/media", get(get_trip_media))
        .route("/api/home", get(get_home_content))
}

async fn get_all_trips(
    State(state): State<AppState>,
) -> Json<Vec<Trip>> {
    let store = state.store.read().await;
    Json(store.trips().to_vec())
}

async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>> {
    let store = state.store.read().await;
    let trip = store.get_trip(&trip_id).cloned().ok_or(ApiError::NotFound)?;
    Ok(Json(trip))
}

async fn get_trip_media(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<MediaItem>>> {
    let store = state.store.read().await;
    let trip = store.get_trip(&trip_id).ok_or(ApiError::NotFound)?;
    Ok(Json(trip.combined_media()))
}

async fn get_home_content(
    State(state): State<AppState>,
) -> Json<HomePageContent> {
    let store = state.store.read().await;
    Json(store.home_content().clone())
}
