use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::entities::{Continent, HomePageContent, Trip, TripDraft};
use crate::error::WanderlustError;
use crate::seed;
use crate::storage::Storage;
use crate::utils::str_utils::StringExtensions;

pub const TRIPS_KEY: &str = "wanderlust_trips";
pub const HOME_CONTENT_KEY: &str = "wanderlust_home_content";

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ContinentTrips {
    pub continent: String,
    pub trips: Vec<Trip>,
}

/// Owns the trip collection and the home page content. Every mutation writes both back to storage.
pub struct TripStore<S: Storage> {
    storage: S,
    trips: Vec<Trip>,
    home_content: HomePageContent,
}

impl<S: Storage> TripStore<S> {
    pub async fn load(storage: S) -> Result<Self, WanderlustError> {
        info!("Loading trips from storage...");
        let trips = load_or_seed(&storage, TRIPS_KEY, seed::initial_trips).await?;
        let home_content = load_or_seed(&storage, HOME_CONTENT_KEY, seed::initial_home_content).await?;
        info!("Loaded {} trips!", trips.len());
        Ok(Self { storage, trips, home_content })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn get_trip(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.iter().find(|x| x.id == trip_id)
    }

    pub fn home_content(&self) -> &HomePageContent {
        &self.home_content
    }

    /// One group per known continent, in `Continent::ALL` order, skipping empty ones.
    /// Trips keep their insertion order; trips on an unknown continent are not grouped.
    pub fn trips_by_continent(&self) -> Vec<ContinentTrips> {
        Continent::ALL.iter()
            .map(|continent| ContinentTrips {
                continent: continent.name().to_string(),
                trips: self.trips.iter()
                    .filter(|x| x.continent == continent.name())
                    .cloned()
                    .collect(),
            })
            .filter(|x| !x.trips.is_empty())
            .collect()
    }

    pub async fn add_trip(&mut self, draft: TripDraft) -> Result<Trip, WanderlustError> {
        let id = draft.country.to_trip_id();
        if self.get_trip(&id).is_some() {
            warn!("Trip id {} already exists, adding a duplicate", id);
        }
        let trip = Trip {
            id,
            country: draft.country,
            country_code: draft.country_code.to_country_code(),
            continent: draft.continent,
            cover_image: draft.cover_image,
            quote: draft.quote,
            photos: vec![],
            videos: vec![],
        };
        info!("Adding trip: {}", trip.id);
        self.trips.push(trip.clone());
        self.persist().await?;
        Ok(trip)
    }

    /// Replaces, in place, every trip with the same id. Returns `false` if there was none.
    pub async fn update_trip(&mut self, trip: Trip) -> Result<bool, WanderlustError> {
        let mut found = false;
        for existing in self.trips.iter_mut().filter(|x| x.id == trip.id) {
            *existing = trip.clone();
            found = true;
        }
        if found {
            info!("Updated trip: {}", trip.id);
        }
        self.persist().await?;
        Ok(found)
    }

    pub async fn update_home_content(&mut self, content: HomePageContent) -> Result<(), WanderlustError> {
        info!("Updating home page content: {}", content.title);
        self.home_content = content;
        self.persist().await
    }

    async fn persist(&mut self) -> Result<(), WanderlustError> {
        let trips_json = serde_json::to_string(&self.trips)
            .map_err(WanderlustError::StorageSerializationError)?;
        let home_content_json = serde_json::to_string(&self.home_content)
            .map_err(WanderlustError::StorageSerializationError)?;
        self.storage.set(TRIPS_KEY, trips_json).await?;
        self.storage.set(HOME_CONTENT_KEY, home_content_json).await?;
        Ok(())
    }
}

async fn load_or_seed<S, T, F>(storage: &S, key: &str, seed: F) -> Result<T, WanderlustError>
where
    S: Storage,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let maybe_value = match storage.get(key).await {
        Ok(x) => x,
        Err(WanderlustError::StorageSerializationError(e)) => {
            warn!("Storage is unreadable, using built-in {}: {}", key, e);
            return Ok(seed());
        }
        Err(e) => return Err(e),
    };
    let Some(value) = maybe_value else {
        info!("Nothing stored under {}, using built-in data", key);
        return Ok(seed());
    };
    match serde_json::from_str(&value) {
        Ok(x) => Ok(x),
        Err(e) => {
            warn!("Failed to parse stored {}, using built-in data: {}", key, e);
            Ok(seed())
        }
    }
}
