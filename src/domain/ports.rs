use crate::domain::model::{Coordinates, PlaceKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Instant;

/// Source of raw per-country UN/LOCODE directory pages.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetches the raw HTML listing for a two-letter country code.
    async fn fetch_country_page(&self, country_code: &str) -> Result<String>;
}

/// Text-to-coordinates lookup against an external places API.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the best match for `query` within `country_code`, or `None`
    /// when the geocoder has no result. Transport failures are errors.
    async fn search(
        &self,
        query: &str,
        country_code: &str,
        kind: PlaceKind,
    ) -> Result<Option<Coordinates>>;
}

/// Time source for TTL caches, injectable so expiry is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
