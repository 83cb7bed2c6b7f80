mod api;
mod error;
mod forms;
mod pages;

use std::sync::Arc;
use anyhow::Context;
use askama::Template;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use axum_macros::FromRef;
use log::info;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use crate::config::AppConfig;
use crate::storage::FileStorage;
use crate::store::TripStore;
pub use error::ApiError;

// photos and covers are inlined into the store, so uploads can be large
const MAX_UPLOAD_BYTES: usize = 52_428_800;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<RwLock<TripStore<FileStorage>>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: TripStore<FileStorage>) -> Self {
        Self { config: Arc::new(config), store: Arc::new(RwLock::new(store)) }
    }
}

pub async fn serve(config: AppConfig, store: TripStore<FileStorage>) -> anyhow::Result<()> {
    info!("trip count: {}", store.trips().len());
    let addr = config.http.addr();
    let app_state = AppState::new(config, store);

    info!("initializing router...");
    let router = router(app_state);
    let listener = tokio::net::TcpListener::bind(&addr).await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("listening on http://{}", &addr);
    axum::serve(listener, router).await.context("error running HTTP server")
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(api::router())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
    where
        T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {}", err),
            ).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request};
    use log::LevelFilter;
    use tower::ServiceExt;
    use super::*;
    use crate::config::FlatConfig;
    use crate::seed;

    const BOUNDARY: &str = "wanderlust-test-boundary";

    async fn test_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(FlatConfig {
            workdir: Some(dir.path().to_path_buf()),
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: LevelFilter::Off,
        }).unwrap();
        let storage = FileStorage::new(config.db_path.clone()).unwrap();
        let store = TripStore::load(storage).await.unwrap();
        (dir, AppState::new(config, store))
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Body {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend(format!("--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n", BOUNDARY, name, value).into_bytes());
        }
        if let Some((name, file_name, bytes)) = file {
            body.extend(format!("--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n", BOUNDARY, name, file_name).into_bytes());
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend(format!("--{}--\r\n", BOUNDARY).into_bytes());
        Body::from(body)
    }

    fn multipart_request(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(body)
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_trips_by_continent() {
        let (_dir, state) = test_state().await;
        let response = router(state).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Our Shared Journey"));
        assert!(body.contains("Asia"));
        assert!(body.contains("/trip/japan"));
        assert!(body.contains("/trip/italy"));
    }

    #[tokio::test]
    async fn test_unknown_trip_redirects_home() {
        let (_dir, state) = test_state().await;
        let response = router(state).oneshot(get("/trip/atlantis")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_viewer_links_wrap_around() {
        let (_dir, state) = test_state().await;
        let response = router(state).oneshot(get("/trip/japan?view=2")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("3 / 3"));
        assert!(body.contains("/trip/japan?view=0"));
        assert!(body.contains("/trip/japan?view=1"));
    }

    #[tokio::test]
    async fn test_unparsable_view_renders_without_viewer() {
        let (_dir, state) = test_state().await;
        for uri in ["/trip/japan?view=x", "/trip/japan?view=", "/trip/japan?view=-1", "/trip/japan?view=9"] {
            let response = router(state.clone()).oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            let body = body_string(response).await;
            assert!(!body.contains(" / 3"), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_add_trip_without_country_code() {
        let (_dir, state) = test_state().await;
        let body = multipart_body(&[("country", "Peru"), ("continent", "South America")], None);
        let response = router(state.clone()).oneshot(multipart_request("/trips", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let store = state.store.read().await;
        assert_eq!(store.get_trip("peru").unwrap().country_code, "");
    }

    #[tokio::test]
    async fn test_add_trip_requires_continent() {
        let (_dir, state) = test_state().await;
        let body = multipart_body(&[("country", "Peru"), ("countryCode", "pe")], None);
        let response = router(state.clone()).oneshot(multipart_request("/trips", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.store.read().await.trips().len(), 2);
    }

    #[tokio::test]
    async fn test_add_trip() {
        let (_dir, state) = test_state().await;
        let body = multipart_body(
            &[("country", "Costa Rica"), ("countryCode", "cr"), ("continent", "North America"), ("quote", "Pura vida")],
            Some(("coverImage", "cover.png", &b"png"[..])),
        );
        let response = router(state.clone()).oneshot(multipart_request("/trips", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let store = state.store.read().await;
        let trip = store.get_trip("costa-rica").unwrap();
        assert_eq!(trip.country_code, "CR");
        assert_eq!(trip.cover_image, "data:image/png;base64,cG5n");
        assert!(trip.photos.is_empty());
    }

    #[tokio::test]
    async fn test_update_home_content() {
        let (_dir, state) = test_state().await;
        let body = multipart_body(&[("title", "Our Road Trips"), ("subtitle", "")], None);
        let response = router(state.clone()).oneshot(multipart_request("/home", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let store = state.store.read().await;
        assert_eq!(store.home_content().title, "Our Road Trips");
        assert_eq!(store.home_content().subtitle, "");
        assert_eq!(store.home_content().background_image, seed::initial_home_content().background_image);
    }

    #[tokio::test]
    async fn test_add_photo_and_delete_media() {
        let (_dir, state) = test_state().await;
        let body = multipart_body(&[("caption", "Lake Ashi")], Some(("file", "lake.png", &b"png"[..])));
        let response = router(state.clone()).oneshot(multipart_request("/trip/japan/photos", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/trip/japan");
        {
            let store = state.store.read().await;
            let japan = store.get_trip("japan").unwrap();
            assert_eq!(japan.photos.len(), 3);
            assert_eq!(japan.photos[2].caption, "Lake Ashi");
            assert_eq!(japan.photos[2].src, "data:image/png;base64,cG5n");
        }

        let request = Request::builder()
            .method("POST")
            .uri("/trip/japan/media/jp-photo-1/delete")
            .body(Body::empty())
            .unwrap();
        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let store = state.store.read().await;
        let japan = store.get_trip("japan").unwrap();
        assert!(japan.photos.iter().all(|x| x.id != "jp-photo-1"));
    }

    #[tokio::test]
    async fn test_add_photo_without_file_is_rejected() {
        let (_dir, state) = test_state().await;
        let body = multipart_body(&[("caption", "nothing")], None);
        let response = router(state).oneshot(multipart_request("/trip/japan/photos", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_add_video_rewrites_share_url() {
        let (_dir, state) = test_state().await;
        let request = Request::builder()
            .method("POST")
            .uri("/trip/italy/videos")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("url=https%3A%2F%2Fyoutube.com%2Fwatch%3Fv%3Dabc123&caption=Venice"))
            .unwrap();
        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/trip/italy");

        let store = state.store.read().await;
        let italy = store.get_trip("italy").unwrap();
        assert_eq!(italy.videos[0].url, "https://youtube.com/embed/abc123");
        assert_eq!(italy.videos[0].caption, "Venice");
    }

    #[tokio::test]
    async fn test_mutation_on_unknown_trip_is_not_found() {
        let (_dir, state) = test_state().await;
        let request = Request::builder()
            .method("POST")
            .uri("/trip/atlantis/media/1/delete")
            .body(Body::empty())
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_trip_media() {
        let (_dir, state) = test_state().await;
        let response = router(state.clone()).oneshot(get("/api/trips/japan/media")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let media: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let kinds = media.as_array().unwrap().iter().map(|x| x["kind"].as_str().unwrap().to_string()).collect::<Vec<_>>();
        assert_eq!(kinds, vec!["photo", "photo", "video"]);

        let response = router(state).oneshot(get("/api/trips/atlantis")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
