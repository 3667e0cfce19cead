use crate::core::distance::NM_TO_KM;
use crate::domain::model::{BulkResult, BulkRow, LocationKind, RowStatus};
use crate::utils::error::{PortsError, Result};
use regex::Regex;
use serde::Deserialize;
use std::io::Read;
use std::sync::OnceLock;

const VALID_TYPES: [&str; 4] = ["port-to-port", "port-to-door", "door-to-port", "door-to-door"];

const REQUIRED_HEADERS: [&str; 5] = [
    "origin",
    "origincountry",
    "destination",
    "destinationcountry",
    "type",
];

fn locode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{3}$").unwrap())
}

/// One line of the uploaded bulk file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRow {
    pub origin: String,
    #[serde(rename = "origincountry")]
    pub origin_country: String,
    pub destination: String,
    #[serde(rename = "destinationcountry")]
    pub destination_country: String,
    #[serde(rename = "type")]
    pub route_type: String,
}

/// Reads the bulk input file. Headers are matched case-insensitively; a
/// missing header is a validation error for the whole file.
pub fn read_bulk_csv<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: csv::StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();

    for required in REQUIRED_HEADERS {
        if !headers.iter().any(|h| h == required) {
            return Err(PortsError::ValidationError {
                message: format!(
                    "Invalid CSV format: missing column {:?}. Please use the template provided.",
                    required
                ),
            });
        }
    }
    rdr.set_headers(headers);

    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Per-row validation, reported with 1-based line numbers (header is line 1).
pub fn validate_rows(rows: &[CsvRow]) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;

        if !VALID_TYPES.contains(&row.route_type.as_str()) {
            errors.push(format!(
                "Line {}: Invalid type {:?}. Must be one of: {}",
                line,
                row.route_type,
                VALID_TYPES.join(", ")
            ));
        }

        if row.origin.is_empty() || row.destination.is_empty() {
            errors.push(format!("Line {}: Missing origin or destination", line));
        }

        if row.origin_country.is_empty() || row.destination_country.is_empty() {
            errors.push(format!("Line {}: Missing country code", line));
        }

        if row.route_type.starts_with("port-") && !locode_re().is_match(&row.origin) {
            errors.push(format!(
                "Line {}: Invalid port LOCODE format for origin {:?}",
                line, row.origin
            ));
        }

        if row.route_type.ends_with("-port") && !locode_re().is_match(&row.destination) {
            errors.push(format!(
                "Line {}: Invalid port LOCODE format for destination {:?}",
                line, row.destination
            ));
        }
    }

    errors
}

/// Maps validated input rows onto runner work items: a `port-` prefix makes
/// the origin a port endpoint, a `-port` suffix the destination.
pub fn to_bulk_rows(rows: &[CsvRow]) -> Vec<BulkRow> {
    rows.iter()
        .map(|row| BulkRow {
            source_type: if row.route_type.starts_with("port-") {
                LocationKind::Port
            } else {
                LocationKind::Postal
            },
            source_location: row.origin.clone(),
            source_country: row.origin_country.clone(),
            dest_type: if row.route_type.ends_with("-port") {
                LocationKind::Port
            } else {
                LocationKind::Postal
            },
            dest_location: row.destination.clone(),
            dest_country: row.destination_country.clone(),
        })
        .collect()
}

/// Convenience wrapper: read, validate, convert. Validation failures are
/// collapsed into a single error listing every offending line.
pub fn parse_bulk_file<R: Read>(reader: R) -> Result<Vec<BulkRow>> {
    let rows = read_bulk_csv(reader)?;
    let errors = validate_rows(&rows);
    if !errors.is_empty() {
        return Err(PortsError::ValidationError {
            message: errors.join("\n"),
        });
    }
    Ok(to_bulk_rows(&rows))
}

/// True when any endpoint is postal, meaning the batch cannot run
/// without a geocoder.
pub fn needs_geocoder(rows: &[BulkRow]) -> bool {
    rows.iter().any(|row| {
        row.source_type == LocationKind::Postal || row.dest_type == LocationKind::Postal
    })
}

/// Renders batch results in the download format. Failed rows emit `NaN`
/// for both distance columns; distances are rounded to whole units.
pub fn render_results_csv(results: &[BulkResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "sourceType",
        "sourceLocation",
        "destType",
        "destLocation",
        "distance_nm",
        "distance_km",
        "status",
        "comments",
    ])?;

    for result in results {
        let (nm, km, status) = match (result.status, result.distance_nm) {
            (RowStatus::Success, Some(nm)) => (
                format!("{}", nm.round() as i64),
                format!("{}", (nm * NM_TO_KM).round() as i64),
                "success",
            ),
            _ => ("NaN".to_string(), "NaN".to_string(), "failed"),
        };
        let comments = match (&result.error, result.status) {
            (Some(message), _) => message.clone(),
            (None, RowStatus::Success) => String::new(),
            (None, RowStatus::Error) => "Could not calculate distance".to_string(),
        };

        writer.write_record([
            result.row.source_type.to_string().as_str(),
            result.row.source_location.as_str(),
            result.row.dest_type.to_string().as_str(),
            result.row.dest_location.as_str(),
            nm.as_str(),
            km.as_str(),
            status,
            comments.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PortsError::ValidationError {
            message: format!("Failed to flush results CSV: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| PortsError::ValidationError {
        message: format!("Results CSV was not valid UTF-8: {}", e),
    })
}

/// Example input matching the expected header and row shapes.
pub fn template_csv() -> &'static str {
    "origin,originCountry,destination,destinationCountry,type\n\
     USNYC,US,GBLON,GB,port-to-port\n\
     USNYC,US,10001,US,port-to-door\n\
     90210,US,GBLON,GB,door-to-port\n\
     10001,US,90210,US,door-to-door\n"
}
