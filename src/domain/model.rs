use serde::{Deserialize, Serialize};

/// One row of a country's UN/LOCODE directory, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    /// Five characters: two-letter country + three-character location.
    pub locode: String,
    pub name: String,
    pub name_wo_diacritics: String,
    pub subdivision: Option<String>,
    /// Encoded capability string (port/rail/road/air/postal/...).
    pub function: String,
    pub status: String,
    /// Raw YYMM last-update stamp, may be empty.
    pub date: String,
    pub iata: Option<String>,
    /// Raw "DDMM[NS] DDDMM[EW]" text as published, when present.
    pub coordinates: Option<String>,
    pub remarks: Option<String>,
}

impl PortRecord {
    pub fn country_code(&self) -> &str {
        &self.locode[..2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What kind of place a geocoder query is after. Ports map to POI results,
/// postal locations to address/postcode results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Poi,
    Postal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Port,
    Postal,
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationKind::Port => write!(f, "port"),
            LocationKind::Postal => write!(f, "postal"),
        }
    }
}

/// One unit of work for the bulk runner. Country codes ride along because
/// postal geocoding is country-filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRow {
    pub source_type: LocationKind,
    pub source_location: String,
    pub source_country: String,
    pub dest_type: LocationKind,
    pub dest_location: String,
    pub dest_country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct BulkResult {
    pub row: BulkRow,
    pub distance_nm: Option<f64>,
    pub status: RowStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}
