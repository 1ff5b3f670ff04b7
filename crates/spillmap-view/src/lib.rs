//! View controllers for the spill report map pages.
//!
//! The controllers own no browser state of their own: the DOM, the map widget
//! and the report server are reached through the [`Page`], [`MapSurface`] and
//! [`spillmap_client::SpillApi`] traits, so the same logic runs against a real
//! page, the headless CLI, or test doubles.

pub mod dom;
pub mod error;
pub mod format_select;
pub mod map;
pub mod marker;
pub mod report_map;
pub mod samples;

pub use dom::{ElementId, Page};
pub use error::ViewError;
pub use format_select::apply_format_selection;
pub use map::{
    initialize_map, ControlPosition, MapMount, MapOptions, MapSurface, PointMarker, TileLayer,
};
pub use marker::MarkerController;
pub use report_map::{FetchOutcome, ReportMapController, SamplePage, Trigger};
pub use samples::SampleCursor;
