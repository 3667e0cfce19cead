pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{mapbox::MapboxGeocoder, unece::UneceDirectory};
pub use config::{CliConfig, Command};
pub use core::{batch::BulkRunner, directory::PortDirectory, resolver::CoordinateResolver};
pub use domain::model::{BulkResult, BulkRow, Coordinates, PortRecord, ProcessingStats};
pub use utils::error::{PortsError, Result};
