use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// A spill report as returned by the map search endpoint.
///
/// Only the position and popup are interpreted client-side. Every other
/// server field is kept in `extra` so the report can be sent back verbatim
/// when its sample is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub latitude: f64,
    pub longitude: f64,
    /// Pre-rendered popup HTML bound to the report's map point.
    #[serde(default)]
    pub popup: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Report {
    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Style of the circle drawn for each report on the search map.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: u32,
    pub color: &'static str,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            fill_color: "#f03",
            fill_opacity: 0.5,
            weight: 2,
            color: "#f0b5a8",
        }
    }
}
