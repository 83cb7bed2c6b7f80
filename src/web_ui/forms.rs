use std::collections::HashMap;
use axum::extract::Multipart;
use serde::Deserialize;
use crate::entities::{Continent, HomePageContent, Trip, TripDraft};
use crate::media::MediaFile;
use crate::web_ui::error::ApiError;

/// Text fields and non-empty file fields of a multipart form, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaFile>,
}

impl MultipartForm {
    /// Reads the whole body. File fields are converted into memory here, before any store lock is taken.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(|x| x.to_string()) {
                Some(file_name) => {
                    let content_type = field.content_type().map(|x| x.to_string());
                    let bytes = field.bytes().await?.to_vec();
                    // browsers send an empty part when no file was picked
                    if !bytes.is_empty() {
                        form.files.insert(name, MediaFile { file_name, content_type, bytes });
                    }
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }

    /// A non-empty, trimmed value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|x| !x.is_empty())
    }

    /// A trimmed value, possibly empty. `None` only when the form has no such field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|x| x.trim())
    }

    pub fn file(&self, name: &str) -> Option<&MediaFile> {
        self.files.get(name)
    }

    #[cfg(test)]
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_file(mut self, name: &str, file: MediaFile) -> Self {
        self.files.insert(name.to_string(), file);
        self
    }
}

pub fn parse_trip_draft(form: &MultipartForm) -> Result<TripDraft, ApiError> {
    let country = form.text("country");
    let continent = form.text("continent").map(|x| x.parse::<Continent>());
    let mut errors = vec![];
    if country.is_none() {
        errors.push(("country", "country is required"));
    }
    match continent {
        None => errors.push(("continent", "continent is required")),
        Some(Err(_)) => errors.push(("continent", "unknown continent")),
        Some(Ok(_)) => {}
    }
    if !errors.is_empty() {
        return Err(ApiError::unprocessable_entity(errors));
    }
    Ok(TripDraft {
        country: country.unwrap_or_default().to_string(),
        country_code: form.text("countryCode").unwrap_or_default().to_string(),
        continent: form.text("continent").unwrap_or_default().to_string(),
        cover_image: form.file("coverImage").map(|x| x.to_data_url()).unwrap_or_default(),
        quote: form.text("quote").unwrap_or_default().to_string(),
    })
}

/// Fields left out of the form keep their current value; fields sent empty are cleared.
pub fn apply_home_content_edit(current: &HomePageContent, form: &MultipartForm) -> HomePageContent {
    HomePageContent {
        title: form.field("title").map(|x| x.to_string()).unwrap_or_else(|| current.title.clone()),
        subtitle: form.field("subtitle").map(|x| x.to_string()).unwrap_or_else(|| current.subtitle.clone()),
        background_image: form.file("backgroundImage").map(|x| x.to_data_url())
            .unwrap_or_else(|| current.background_image.clone()),
    }
}

/// Header edit on the trip page. The id never changes, even when the country is renamed.
pub fn apply_trip_edit(current: &Trip, form: &MultipartForm) -> Trip {
    let mut trip = current.clone();
    if let Some(country) = form.field("country") {
        trip.country = country.to_string();
    }
    if let Some(quote) = form.field("quote") {
        trip.quote = quote.to_string();
    }
    if let Some(cover) = form.file("coverImage") {
        trip.cover_image = cover.to_data_url();
    }
    trip
}

#[derive(Deserialize, Debug, Default)]
pub struct AddVideoForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
}
