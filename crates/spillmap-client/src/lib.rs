pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::SpillApi;
pub use client::SpillClient;
pub use error::ApiError;
pub use types::{CheckCoordinatesRequest, CheckedCoordinates, ConvertedCoordinates, MapSearchRequest};
