use crate::domain::model::Coordinates;
use crate::utils::error::{PortsError, Result};
use regex::Regex;
use std::sync::OnceLock;

// "1305N 08017E": DDMM + hemisphere, DDDMM + hemisphere.
fn coord_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})(\d{2})([NS]) (\d{3})(\d{2})([EW])$").unwrap())
}

/// Decodes the raw directory coordinate text into signed decimal degrees.
/// Any deviation from the fixed format is an error, never a silent default.
pub fn decode(raw: &str) -> Result<Coordinates> {
    let normalized = normalize(raw);
    let caps = coord_re()
        .captures(&normalized)
        .ok_or_else(|| PortsError::InvalidCoordinateFormat {
            raw: raw.to_string(),
        })?;

    // Digit-only captures of bounded length; parse cannot fail.
    let lat_deg: f64 = caps[1].parse().unwrap();
    let lat_min: f64 = caps[2].parse().unwrap();
    let lon_deg: f64 = caps[4].parse().unwrap();
    let lon_min: f64 = caps[5].parse().unwrap();

    let latitude = lat_deg + lat_min / 60.0;
    let longitude = lon_deg + lon_min / 60.0;

    Ok(Coordinates {
        latitude: if &caps[3] == "S" { -latitude } else { latitude },
        longitude: if &caps[6] == "W" { -longitude } else { longitude },
    })
}

/// Reformats raw coordinate text for display as `DD°MM'H DDD°MM'H`,
/// keeping the original digits rather than round-tripping through decimal.
pub fn format_dms(raw: &str) -> Result<String> {
    let normalized = normalize(raw);
    let caps = coord_re()
        .captures(&normalized)
        .ok_or_else(|| PortsError::InvalidCoordinateFormat {
            raw: raw.to_string(),
        })?;

    Ok(format!(
        "{}°{}'{} {}°{}'{}",
        &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6]
    ))
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
