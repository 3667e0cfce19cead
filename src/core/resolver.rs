use crate::core::{coords, directory::PortDirectory};
use crate::domain::model::{Coordinates, LocationKind, PlaceKind, PortRecord};
use crate::domain::ports::{DirectorySource, Geocoder};
use crate::utils::error::{PortsError, Result};

/// Turns a location reference (LOCODE or postal/address text) into decimal
/// coordinates, using the directory first and the geocoder as fallback.
pub struct CoordinateResolver<'a, S: DirectorySource, G: Geocoder> {
    directory: &'a PortDirectory<S>,
    geocoder: &'a G,
}

impl<'a, S: DirectorySource, G: Geocoder> CoordinateResolver<'a, S, G> {
    pub fn new(directory: &'a PortDirectory<S>, geocoder: &'a G) -> Self {
        Self {
            directory,
            geocoder,
        }
    }

    pub async fn resolve(
        &self,
        kind: LocationKind,
        location: &str,
        country_code: &str,
    ) -> Result<Coordinates> {
        match kind {
            LocationKind::Port => self.resolve_port(location).await,
            LocationKind::Postal => self.resolve_postal(location, country_code).await,
        }
    }

    /// LOCODE path: exact directory match, decode its coordinates when
    /// present, otherwise fall back to geocoding the port name.
    async fn resolve_port(&self, locode: &str) -> Result<Coordinates> {
        let port = self
            .directory
            .find_by_locode(locode)
            .await?
            .ok_or_else(|| PortsError::ResolutionError {
                location: locode.to_string(),
                reason: "not found in UN/LOCODE directory".to_string(),
            })?;

        if let Some(raw) = &port.coordinates {
            match coords::decode(raw) {
                Ok(c) => return Ok(c),
                Err(_) => {
                    tracing::warn!("Invalid directory coordinates for {}: {:?}", port.locode, raw);
                }
            }
        }

        self.geocode_port(&port).await
    }

    /// Directory entries without usable coordinates get a best-effort text
    /// search, trying query variants in fixed priority order.
    async fn geocode_port(&self, port: &PortRecord) -> Result<Coordinates> {
        let country = port.country_code();
        let queries = [
            port.name.clone(),
            format!("port of {}", port.name),
            format!("{} port", port.name),
            format!("{} {}", port.name, country),
        ];

        for query in &queries {
            tracing::debug!("Geocoding {} as {:?}", port.locode, query);
            if let Some(found) = self.geocoder.search(query, country, PlaceKind::Poi).await? {
                return Ok(found);
            }
        }

        Err(PortsError::ResolutionError {
            location: port.locode.clone(),
            reason: format!("no coordinates in directory and geocoding {:?} failed", port.name),
        })
    }

    async fn resolve_postal(&self, location: &str, country_code: &str) -> Result<Coordinates> {
        self.geocoder
            .search(location, country_code, PlaceKind::Postal)
            .await?
            .ok_or_else(|| PortsError::ResolutionError {
                location: location.to_string(),
                reason: format!("no geocoder match in country {}", country_code),
            })
    }
}
