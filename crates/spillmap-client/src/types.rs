//! Request and response bodies for the spill report server.
//!
//! Every successful response wraps its payload as `{"data": ...}`;
//! [`DataEnvelope`] captures that pattern generically. Failures carry a
//! human-readable `msg`.

use serde::{Deserialize, Serialize};
use spillmap_core::{BoundingBox, CoordinateFormat, DateRange};

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub msg: Option<String>,
}

// ---------------------------------------------------------------------------
// /geo/latlon_to_coords
// ---------------------------------------------------------------------------

/// A marker position rendered in every supported notation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedCoordinates {
    #[serde(rename = "Decimal Degrees", default)]
    pub decimal_degrees: Option<String>,
    #[serde(rename = "Degrees Decimal Minutes", default)]
    pub degrees_decimal_minutes: Option<String>,
    #[serde(rename = "Degrees Minutes Seconds", default)]
    pub degrees_minutes_seconds: Option<String>,
}

impl ConvertedCoordinates {
    #[must_use]
    pub fn get(&self, format: CoordinateFormat) -> Option<&str> {
        match format {
            CoordinateFormat::DecimalDegrees => self.decimal_degrees.as_deref(),
            CoordinateFormat::DegreesDecimalMinutes => self.degrees_decimal_minutes.as_deref(),
            CoordinateFormat::DegreesMinutesSeconds => self.degrees_minutes_seconds.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// /geo/chk_coordinates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckCoordinatesRequest {
    pub coord_str: String,
    /// Raw `#coordinate_type` value; the server decides what it accepts.
    pub coordinate_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CheckedCoordinates {
    pub lat: f64,
    pub lon: f64,
}

// ---------------------------------------------------------------------------
// /report/map_search
// ---------------------------------------------------------------------------

/// Viewport search body: the bbox fields plus optional date filters, flat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSearchRequest {
    #[serde(flatten)]
    pub bbox: BoundingBox,
    #[serde(flatten)]
    pub dates: DateRange,
}
