use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};

pub type TripId = String;
pub type MediaId = String;

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub country: String,
    pub country_code: String,
    pub continent: String,
    pub cover_image: String,
    pub quote: String,
    pub photos: Vec<Photo>,
    pub videos: Vec<Video>,
}

/// A trip as entered in the "add trip" form, before it gets an id and galleries.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub country: String,
    pub country_code: String,
    pub continent: String,
    pub cover_image: String,
    pub quote: String,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Photo {
    pub id: MediaId,
    /// Inline `data:` URL or a plain image URL.
    pub src: String,
    pub caption: String,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Video {
    pub id: MediaId,
    /// Embeddable video URL.
    pub url: String,
    pub caption: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaItem {
    Photo(Photo),
    Video(Video),
}

impl MediaItem {
    pub fn id(&self) -> &str {
        match self {
            MediaItem::Photo(photo) => &photo.id,
            MediaItem::Video(video) => &video.id,
        }
    }

    pub fn caption(&self) -> &str {
        match self {
            MediaItem::Photo(photo) => &photo.caption,
            MediaItem::Video(video) => &video.caption,
        }
    }

    pub fn is_photo(&self) -> bool {
        matches!(self, MediaItem::Photo(_))
    }

    /// The `src` of a photo or the `url` of a video.
    pub fn location(&self) -> &str {
        match self {
            MediaItem::Photo(photo) => &photo.src,
            MediaItem::Video(video) => &video.url,
        }
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HomePageContent {
    pub title: String,
    pub subtitle: String,
    pub background_image: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Oceania,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Oceania => "Oceania",
        }
    }
}

impl Display for Continent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown continent: {0}")]
pub struct UnknownContinent(pub String);

impl FromStr for Continent {
    type Err = UnknownContinent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::ALL.iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| UnknownContinent(s.to_string()))
    }
}
