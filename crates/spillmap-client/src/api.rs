//! The network seam the map controllers are written against.
//!
//! [`crate::SpillClient`] implements it over HTTP; tests implement it with
//! in-memory doubles.

use std::future::Future;

use spillmap_core::{LatLng, Report};

use crate::error::ApiError;
use crate::types::{
    CheckCoordinatesRequest, CheckedCoordinates, ConvertedCoordinates, MapSearchRequest,
};

pub trait SpillApi {
    /// Converts a marker position into every supported coordinate notation.
    fn latlon_to_coords(
        &self,
        position: LatLng,
    ) -> impl Future<Output = Result<ConvertedCoordinates, ApiError>> + Send;

    /// Validates a typed coordinate string and resolves it to lat/lon.
    fn check_coordinates(
        &self,
        request: &CheckCoordinatesRequest,
    ) -> impl Future<Output = Result<CheckedCoordinates, ApiError>> + Send;

    /// Finds the reports inside a bounding box, optionally date-filtered.
    fn map_search(
        &self,
        request: &MapSearchRequest,
    ) -> impl Future<Output = Result<Vec<Report>, ApiError>> + Send;

    /// Renders the side-list HTML for a page of reports.
    fn render_map_samples(
        &self,
        reports: &[Report],
    ) -> impl Future<Output = Result<String, ApiError>> + Send;
}
