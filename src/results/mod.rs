//! Response reshaping
//!
//! Derives map links for each place and assembles the client-facing
//! payload. All link derivation is deterministic over the place record.

use crate::places::PlaceResult;
use crate::query::SearchDescriptor;
use serde::Serialize;

/// A place augmented with derived map links
#[derive(Debug, Serialize)]
pub struct DerivedPlace {
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub place_id: Option<String>,
    /// Map-search link built from name and address
    pub google_maps_url: String,
    /// Directions link; present only with coordinates
    pub directions_url: Option<String>,
    /// Embeddable map link for iframes; present only with coordinates,
    /// carries the API key
    pub map_embed_url: Option<String>,
}

impl DerivedPlace {
    /// Derive links from a provider record
    pub fn from_result(place: PlaceResult, api_key: &str) -> Self {
        let coordinates = place.coordinates();

        let base_query = match &place.formatted_address {
            Some(address) => format!("{} {}", place.name, address),
            None => place.name.clone(),
        };

        let google_maps_url = format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&base_query)
        );

        let directions_url = coordinates.map(|(lat, lng)| {
            format!("https://www.google.com/maps/dir/?api=1&destination={},{}", lat, lng)
        });

        let map_embed_url = coordinates.map(|(lat, lng)| {
            format!(
                "https://www.google.com/maps/embed/v1/place?key={}&q={},{}",
                api_key, lat, lng
            )
        });

        Self {
            name: place.name,
            address: place.formatted_address,
            lat: coordinates.map(|(lat, _)| lat),
            lng: coordinates.map(|(_, lng)| lng),
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            place_id: place.place_id,
            google_maps_url,
            directions_url,
            map_embed_url,
        }
    }
}

/// Client-facing payload for a places search
#[derive(Debug, Serialize)]
pub struct PlacesPayload {
    pub original_query: String,
    pub search_query: String,
    pub parsed: SearchDescriptor,
    pub count: usize,
    pub places: Vec<DerivedPlace>,
}

impl PlacesPayload {
    /// Assemble the payload from at most [`crate::MAX_PLACES`] results
    pub fn assemble(
        original_query: String,
        search_query: String,
        parsed: SearchDescriptor,
        results: Vec<PlaceResult>,
        api_key: &str,
    ) -> Self {
        let places: Vec<DerivedPlace> = results
            .into_iter()
            .take(crate::MAX_PLACES)
            .map(|place| DerivedPlace::from_result(place, api_key))
            .collect();

        Self {
            original_query,
            search_query,
            parsed,
            count: places.len(),
            places,
        }
    }
}
