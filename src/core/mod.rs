pub mod batch;
pub mod bulk_io;
pub mod cache;
pub mod coords;
pub mod directory;
pub mod distance;
pub mod parser;
pub mod resolver;

pub use crate::domain::model::{
    BulkResult, BulkRow, Coordinates, LocationKind, PortRecord, ProcessingStats,
};
pub use crate::domain::ports::{Clock, DirectorySource, Geocoder, SystemClock};
pub use crate::utils::error::Result;
