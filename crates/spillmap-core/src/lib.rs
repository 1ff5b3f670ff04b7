pub mod app_config;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod geo;
pub mod report;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinates::{CoordinateFormat, FormatHint};
pub use error::{ConfigError, CoreError};
pub use geo::{BoundingBox, DateRange, LatLng};
pub use report::{CircleStyle, Report};
