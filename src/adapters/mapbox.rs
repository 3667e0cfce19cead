use crate::domain::model::{Coordinates, PlaceKind};
use crate::domain::ports::Geocoder;
use crate::utils::error::{PortsError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// `[longitude, latitude]` per the places API.
    center: Vec<f64>,
}

/// Places-search client used as the coordinate fallback for directory
/// entries without coordinates and for postal locations.
pub struct MapboxGeocoder {
    base_url: String,
    access_token: String,
    client: Client,
}

impl MapboxGeocoder {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("PortsIndex/1.0")
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client,
        })
    }

    fn query_url(&self, query: &str, country_code: &str, kind: PlaceKind) -> Result<Url> {
        let types = match kind {
            PlaceKind::Poi => "poi",
            PlaceKind::Postal => "address,postcode",
        };
        let mut url = Url::parse(&format!("{}/{}.json", self.base_url, query))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("country", &country_code.to_lowercase())
            .append_pair("types", types)
            .append_pair("limit", "1");
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn search(
        &self,
        query: &str,
        country_code: &str,
        kind: PlaceKind,
    ) -> Result<Option<Coordinates>> {
        let url = self.query_url(query, country_code, kind)?;
        tracing::debug!("Geocoder query: {:?} in {}", query, country_code);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortsError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(body.features.first().and_then(|f| {
            if f.center.len() == 2 {
                Some(Coordinates {
                    latitude: f.center[1],
                    longitude: f.center[0],
                })
            } else {
                None
            }
        }))
    }
}
