use std::path::Path;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::info;
use crate::entities::{MediaId, MediaItem, Photo, Trip, Video};
use crate::error::WanderlustError;
use crate::storage::Storage;
use crate::store::TripStore;

const SHARE_URL_MARKER: &str = "watch?v=";
const EMBED_URL_MARKER: &str = "embed/";

/// A file picked by the user, before it is inlined into a trip.
#[derive(Debug, Default, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn mime_type(&self) -> String {
        self.content_type.clone()
            .filter(|x| !x.is_empty() && x != mime::APPLICATION_OCTET_STREAM.essence_str())
            .or_else(|| mime_guess::from_path(&self.file_name).first().map(|x| x.to_string()))
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string())
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}

pub async fn read_file(path: &Path) -> Result<MediaFile, WanderlustError> {
    if !path.is_file() {
        return Err(WanderlustError::FileNotFound(path.display().to_string()));
    }
    let bytes = tokio::fs::read(path).await.map_err(WanderlustError::FileReadError)?;
    let file_name = path.file_name().map(|x| x.to_string_lossy().to_string()).unwrap_or_default();
    Ok(MediaFile { file_name, content_type: None, bytes })
}

/// Turns a `watch?v=` share link into an `embed/` link. Anything else is returned unchanged.
pub fn to_embed_url(share_url: &str) -> String {
    share_url.replacen(SHARE_URL_MARKER, EMBED_URL_MARKER, 1)
}

impl Trip {
    /// All photos, then all videos, each in insertion order. Gallery indices point into this.
    pub fn combined_media(&self) -> Vec<MediaItem> {
        self.photos.iter().cloned().map(MediaItem::Photo)
            .chain(self.videos.iter().cloned().map(MediaItem::Video))
            .collect()
    }

    pub fn has_media(&self, media_id: &str) -> bool {
        self.photos.iter().any(|x| x.id == media_id) || self.videos.iter().any(|x| x.id == media_id)
    }

    /// Drops photos and videos with this id; the two id spaces may overlap.
    pub fn remove_media(&mut self, media_id: &str) -> bool {
        let count_before = self.photos.len() + self.videos.len();
        self.photos.retain(|x| x.id != media_id);
        self.videos.retain(|x| x.id != media_id);
        count_before != self.photos.len() + self.videos.len()
    }

    /// Millisecond timestamp, moved forward until it is unused within this trip.
    pub fn next_media_id(&self, now_millis: i64) -> MediaId {
        let mut candidate = now_millis;
        while self.has_media(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

pub async fn add_photo<S: Storage>(
    store: &mut TripStore<S>,
    trip: &Trip,
    file: &MediaFile,
    caption: &str,
) -> Result<Photo, WanderlustError> {
    let photo = Photo {
        id: trip.next_media_id(chrono::Utc::now().timestamp_millis()),
        src: file.to_data_url(),
        caption: caption.to_string(),
    };
    info!("Adding photo {} to trip {}", photo.id, trip.id);
    let mut updated_trip = trip.clone();
    updated_trip.photos.push(photo.clone());
    store.update_trip(updated_trip).await?;
    Ok(photo)
}

pub async fn add_video<S: Storage>(
    store: &mut TripStore<S>,
    trip: &Trip,
    share_url: &str,
    caption: &str,
) -> Result<Video, WanderlustError> {
    let video = Video {
        id: trip.next_media_id(chrono::Utc::now().timestamp_millis()),
        url: to_embed_url(share_url),
        caption: caption.to_string(),
    };
    info!("Adding video {} to trip {}", video.id, trip.id);
    let mut updated_trip = trip.clone();
    updated_trip.videos.push(video.clone());
    store.update_trip(updated_trip).await?;
    Ok(video)
}

pub async fn delete_media<S: Storage>(
    store: &mut TripStore<S>,
    trip: &Trip,
    media_id: &str,
) -> Result<bool, WanderlustError> {
    let mut updated_trip = trip.clone();
    let removed = updated_trip.remove_media(media_id);
    if removed {
        info!("Deleting media {} from trip {}", media_id, trip.id);
    }
    store.update_trip(updated_trip).await?;
    Ok(removed)
}

/// Position of the full-screen viewer within a trip's combined media. Wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryCursor {
    index: usize,
    len: usize,
}

impl GalleryCursor {
    /// `None` for an empty gallery or an index past the end.
    pub fn new(index: usize, len: usize) -> Option<Self> {
        if index >= len {
            return None;
        }
        Some(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(self) -> Self {
        Self { index: (self.index + 1) % self.len, len: self.len }
    }

    pub fn previous(self) -> Self {
        Self { index: (self.index + self.len - 1) % self.len, len: self.len }
    }
}
