use askama::Template;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use crate::entities::{Continent, HomePageContent, MediaItem, Trip};
use crate::media::{self, GalleryCursor};
use crate::store::ContinentTrips;
use crate::web_ui::error::ApiError;
use crate::web_ui::forms::{apply_home_content_edit, apply_trip_edit, parse_trip_draft, AddVideoForm, MultipartForm};
use crate::web_ui::{AppState, HtmlTemplate, Result};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/home", post(update_home_content))
        .route("/trips", post(add_trip))
        .route("/trip/:trip_id", get(trip_page).post(update_trip))
        .route("/trip/:trip_id/photos", post(add_photo))
        .route("/trip/:trip_id/videos", post(add_video))
        .route("/trip/:trip_id/media/:media_id/delete", post(delete_media))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    home: HomePageContent,
    groups: Vec<ContinentTrips>,
    continents: Vec<&'static str>,
    db_path: String,
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    HtmlTemplate(IndexTemplate {
        home: store.home_content().clone(),
        groups: store.trips_by_continent(),
        continents: Continent::ALL.iter().map(|x| x.name()).collect(),
        db_path: state.config.db_path.display().to_string(),
    })
}

#[derive(Deserialize, Debug, Default)]
struct ViewerQuery {
    view: Option<String>,
}

#[derive(Debug)]
struct MediaView {
    index: usize,
    id: String,
    caption: String,
    location: String,
    is_photo: bool,
}

impl MediaView {
    fn new(index: usize, item: &MediaItem) -> Self {
        Self {
            index,
            id: item.id().to_string(),
            caption: item.caption().to_string(),
            location: item.location().to_string(),
            is_photo: item.is_photo(),
        }
    }
}

#[derive(Debug)]
struct ViewerView {
    item: MediaView,
    position: usize,
    total: usize,
    previous_index: usize,
    next_index: usize,
}

impl ViewerView {
    fn new(cursor: GalleryCursor, media: &[MediaItem]) -> Self {
        Self {
            item: MediaView::new(cursor.index(), &media[cursor.index()]),
            position: cursor.index() + 1,
            total: cursor.len(),
            previous_index: cursor.previous().index(),
            next_index: cursor.next().index(),
        }
    }
}

#[derive(Template)]
#[template(path = "trip.html")]
struct TripTemplate {
    trip: Trip,
    media: Vec<MediaView>,
    viewer: Option<ViewerView>,
}

async fn trip_page(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Response {
    let store = state.store.read().await;
    let Some(trip) = store.get_trip(&trip_id).cloned() else {
        return Redirect::to("/").into_response();
    };
    drop(store);

    let combined = trip.combined_media();
    let viewer = query.view
        .and_then(|x| x.parse::<usize>().ok())
        .and_then(|index| GalleryCursor::new(index, combined.len()))
        .map(|cursor| ViewerView::new(cursor, &combined));
    let media = combined.iter().enumerate()
        .map(|(index, item)| MediaView::new(index, item))
        .collect();
    HtmlTemplate(TripTemplate { trip, media, viewer }).into_response()
}

async fn add_trip(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = MultipartForm::read(multipart).await?;
    let draft = parse_trip_draft(&form)?;
    let mut store = state.store.write().await;
    store.add_trip(draft).await?;
    Ok(Redirect::to("/"))
}

async fn update_home_content(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = MultipartForm::read(multipart).await?;
    let mut store = state.store.write().await;
    let content = apply_home_content_edit(store.home_content(), &form);
    store.update_home_content(content).await?;
    Ok(Redirect::to("/"))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = MultipartForm::read(multipart).await?;
    let mut store = state.store.write().await;
    let trip = store.get_trip(&trip_id).ok_or(ApiError::NotFound)?;
    let edited = apply_trip_edit(trip, &form);
    store.update_trip(edited).await?;
    Ok(trip_redirect(&trip_id))
}

async fn add_photo(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = MultipartForm::read(multipart).await?;
    let file = form.file("file").ok_or_else(|| ApiError::unprocessable_entity([("file", "a photo is required")]))?;
    let caption = form.text("caption").unwrap_or_default();
    let mut store = state.store.write().await;
    let trip = store.get_trip(&trip_id).cloned().ok_or(ApiError::NotFound)?;
    media::add_photo(&mut *store, &trip, file, caption).await?;
    Ok(trip_redirect(&trip_id))
}

async fn add_video(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Form(form): Form<AddVideoForm>,
) -> Result<Redirect> {
    let url = form.url.trim();
    if url.is_empty() {
        return Err(ApiError::unprocessable_entity([("url", "a video url is required")]));
    }
    let mut store = state.store.write().await;
    let trip = store.get_trip(&trip_id).cloned().ok_or(ApiError::NotFound)?;
    media::add_video(&mut *store, &trip, url, form.caption.trim()).await?;
    Ok(trip_redirect(&trip_id))
}

async fn delete_media(
    State(state): State<AppState>,
    Path((trip_id, media_id)): Path<(String, String)>,
) -> Result<Redirect> {
    let mut store = state.store.write().await;
    let trip = store.get_trip(&trip_id).cloned().ok_or(ApiError::NotFound)?;
    media::delete_media(&mut *store, &trip, &media_id).await?;
    Ok(trip_redirect(&trip_id))
}

fn trip_redirect(trip_id: &str) -> Redirect {
    Redirect::to(&format!("/trip/{}", trip_id))
}
