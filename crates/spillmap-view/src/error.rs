use spillmap_client::ApiError;
use spillmap_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    /// The map container element does not exist; the page cannot mount.
    #[error("map container #{0} not found")]
    ContainerNotFound(String),

    /// The drag handler fired on a map without a marker.
    #[error("marker has not been placed")]
    MarkerMissing,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] CoreError),
}
