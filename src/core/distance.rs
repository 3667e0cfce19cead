use crate::domain::model::Coordinates;

/// Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Nautical miles to kilometers, applied at the presentation layer.
pub const NM_TO_KM: f64 = 1.852;

/// Great-circle distance in nautical miles via the haversine formula.
/// Pure; NaN inputs propagate into the result untrapped.
pub fn haversine_nm(origin: Coordinates, destination: Coordinates) -> f64 {
    let phi1 = origin.latitude.to_radians();
    let phi2 = destination.latitude.to_radians();
    let d_phi = (destination.latitude - origin.latitude).to_radians();
    let d_lambda = (destination.longitude - origin.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}
