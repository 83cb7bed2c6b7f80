use crate::entities::{HomePageContent, Photo, Trip, Video};

pub fn initial_home_content() -> HomePageContent {
    HomePageContent {
        title: "Our Shared Journey".to_string(),
        subtitle: "A collection of memories from the places we've explored.".to_string(),
        background_image: "https://images.unsplash.com/photo-1476514525535-07fb3b4ae5f1?q=80&w=2070&auto=format&fit=crop".to_string(),
    }
}

pub fn initial_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "japan".to_string(),
            country: "Japan".to_string(),
            country_code: "JP".to_string(),
            continent: "Asia".to_string(),
            cover_image: "https://images.unsplash.com/photo-1524413840807-0c3cb6fa808d?q=80&w=2070&auto=format&fit=crop".to_string(),
            quote: "The Land of the Rising Sun opened our eyes to a world of harmony and innovation.".to_string(),
            photos: vec![
                photo("jp-photo-1", "https://images.unsplash.com/photo-1503891450247-ee5f8ec46dc3?q=80&w=1887&auto=format&fit=crop", "Shibuya Crossing bustle"),
                photo("jp-photo-2", "https://images.unsplash.com/photo-1536098561742-ca998e48cbcc?q=80&w=2036&auto=format&fit=crop", "Fushimi Inari Shrine"),
            ],
            videos: vec![
                Video {
                    id: "jp-video-1".to_string(),
                    url: "https://www.youtube.com/embed/1_44544484".to_string(),
                    caption: "Tokyo street food tour".to_string(),
                },
            ],
        },
        Trip {
            id: "italy".to_string(),
            country: "Italy".to_string(),
            country_code: "IT".to_string(),
            continent: "Europe".to_string(),
            cover_image: "https://images.unsplash.com/photo-1515859005217-8a1f08870f59?q=80&w=1974&auto=format&fit=crop".to_string(),
            quote: "Lost in the art, history, and flavors of a timeless country.".to_string(),
            photos: vec![
                photo("it-photo-1", "https://images.unsplash.com/photo-1529153510182-277c1df9037b?q=80&w=1887&auto=format&fit=crop", "Colosseum at sunset"),
            ],
            videos: vec![],
        },
    ]
}

fn photo(id: &str, src: &str, caption: &str) -> Photo {
    Photo { id: id.to_string(), src: src.to_string(), caption: caption.to_string() }
}
