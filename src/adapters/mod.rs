// Adapters: HTTP implementations of the domain ports.

pub mod mapbox;
pub mod unece;
