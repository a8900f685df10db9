use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    api::{GeocodingAPI, RoutingAPI},
    config::Config,
    entities::{Coordinates, Place, Route},
    error::{invalid_input_error, upstream_error, Error},
};

/// Inputs shorter than this never reach the provider.
pub const MIN_QUERY_CHARS: usize = 3;
pub const SUGGESTION_LIMIT: usize = 5;

const TILE_BASE: &str = "https://maps.geoapify.com/v1/tile/osm-bright";

#[derive(Clone, Debug)]
pub struct Geoapify {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection<P, G> {
    #[serde(default = "Vec::new")]
    features: Vec<Feature<P, G>>,
}

#[derive(Debug, Deserialize)]
struct Feature<P, G> {
    properties: P,
    geometry: G,
}

#[derive(Debug, Deserialize)]
struct PlaceProperties {
    formatted: String,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Point {
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RouteProperties {
    distance: f64,
    time: f64,
}

#[derive(Debug, Deserialize)]
struct MultiLineString {
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl Geoapify {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.geoapify_base_url.trim_end_matches('/').to_string(),
            api_key: config.geoapify_api_key.clone(),
        })
    }

    /// Slippy-map tile template with `{z}/{x}/{y}` placeholders left in place.
    pub fn tile_url(&self) -> String {
        format!("{}/{{z}}/{{x}}/{{y}}.png?apiKey={}", TILE_BASE, self.api_key)
    }

    async fn find_place_suggestions(&self, text: &str) -> Result<Vec<Place>, Error> {
        let url = format!("{}/v1/geocode/autocomplete", self.base_url);

        let res = self
            .client
            .get(url)
            .query(&[("text", text)])
            .query(&[("limit", SUGGESTION_LIMIT)])
            .query(&[("apiKey", &self.api_key)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: FeatureCollection<PlaceProperties, Point> = res.json().await?;

        Ok(data
            .features
            .into_iter()
            .map(|feature| Place {
                formatted_address: feature.properties.formatted,
                coordinates: Coordinates::from_lng_lat(feature.geometry.coordinates),
                place_id: feature.properties.place_id,
            })
            .collect())
    }
}

#[async_trait]
impl GeocodingAPI for Geoapify {
    #[tracing::instrument(skip(self))]
    async fn suggest(&self, text: &str) -> Vec<Place> {
        if text.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        match self.find_place_suggestions(text).await {
            Ok(places) => places,
            Err(err) => {
                tracing::error!(%err, "autocomplete failed");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RoutingAPI for Geoapify {
    #[tracing::instrument(skip(self))]
    async fn route(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<Route, Error> {
        let url = format!("{}/v1/routing", self.base_url);
        let waypoints = format!("{}|{}", String::from(pickup), String::from(dropoff));

        let res = self
            .client
            .get(url)
            .query(&[("waypoints", waypoints.as_str())])
            .query(&[("mode", "drive")])
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: FeatureCollection<RouteProperties, MultiLineString> = res.json().await?;

        let feature = data.features.into_iter().next().ok_or_else(upstream_error)?;
        let points = feature
            .geometry
            .coordinates
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(Coordinates::from_lng_lat)
            .collect();

        Ok(Route::new(
            points,
            feature.properties.distance,
            feature.properties.time,
        ))
    }
}
