use std::path::PathBuf;
use clap::{Parser, Subcommand};
use crate::config::FlatConfig;
use crate::entities::{Continent, TripDraft};
use crate::error::WanderlustError;
use crate::media;
use crate::storage::Storage;
use crate::store::TripStore;

#[derive(Parser, Debug)]
#[command(name = "wanderlust", version, about = "A travel journal with per-country photo and video galleries")]
pub struct Cli {
    #[command(flatten)]
    pub config: FlatConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web UI (default)
    Serve,
    /// Print all trips grouped by continent
    List,
    /// Add a new trip
    AddTrip {
        #[arg(long)]
        country: String,
        #[arg(long)]
        country_code: String,
        #[arg(long, help = "One of: Africa, Asia, Europe, North America, South America, Oceania")]
        continent: Continent,
        #[arg(long, default_value = "")]
        quote: String,
        #[arg(long, help = "Image file used as the trip cover")]
        cover: Option<PathBuf>,
    },
    /// Attach a photo file to a trip
    AddPhoto {
        trip_id: String,
        path: PathBuf,
        #[arg(long, default_value = "")]
        caption: String,
    },
    /// Attach a video to a trip by its share link
    AddVideo {
        trip_id: String,
        url: String,
        #[arg(long, default_value = "")]
        caption: String,
    },
    /// Remove a photo or video from a trip
    DeleteMedia {
        trip_id: String,
        media_id: String,
    },
}

pub async fn run<S: Storage>(command: Command, store: &mut TripStore<S>) -> anyhow::Result<()> {
    match command {
        Command::Serve => anyhow::bail!("serve is handled by the web UI"),
        Command::List => {
            print!("{}", format_trip_list(store));
        }
        Command::AddTrip { country, country_code, continent, quote, cover } => {
            let cover_image = match cover {
                Some(path) => media::read_file(&path).await?.to_data_url(),
                None => String::new(),
            };
            let draft = TripDraft { country, country_code, continent: continent.to_string(), cover_image, quote };
            let trip = store.add_trip(draft).await?;
            println!("Trip added: {}", trip.id);
        }
        Command::AddPhoto { trip_id, path, caption } => {
            let trip = find_trip(store, &trip_id)?;
            let file = media::read_file(&path).await?;
            let photo = media::add_photo(store, &trip, &file, &caption).await?;
            println!("Photo added: {}", photo.id);
        }
        Command::AddVideo { trip_id, url, caption } => {
            let trip = find_trip(store, &trip_id)?;
            let video = media::add_video(store, &trip, &url, &caption).await?;
            println!("Video added: {} ({})", video.id, video.url);
        }
        Command::DeleteMedia { trip_id, media_id } => {
            let trip = find_trip(store, &trip_id)?;
            if media::delete_media(store, &trip, &media_id).await? {
                println!("Media deleted: {}", media_id);
            } else {
                println!("No media {} in trip {}", media_id, trip_id);
            }
        }
    }
    Ok(())
}

fn find_trip<S: Storage>(store: &TripStore<S>, trip_id: &str) -> Result<crate::entities::Trip, WanderlustError> {
    store.get_trip(trip_id).cloned().ok_or_else(|| WanderlustError::TripNotFound(trip_id.to_string()))
}

fn format_trip_list<S: Storage>(store: &TripStore<S>) -> String {
    let mut out = String::new();
    for group in store.trips_by_continent() {
        out.push_str(&format!("{}\n", group.continent));
        for trip in group.trips {
            out.push_str(&format!(
                "  {} [{}] {} ({} photos, {} videos)\n",
                trip.id, trip.country_code, trip.country, trip.photos.len(), trip.videos.len()
            ));
        }
    }
    out
}
