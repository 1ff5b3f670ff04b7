//! Geographic primitives shared by the map controllers and the HTTP client.
//!
//! [`LatLng`] serializes exactly like a Leaflet `LatLng` (`{"lat":..,"lng":..}`)
//! because the conversion endpoint accepts the marker position as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The position a marker takes when a page has no saved coordinate.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Returns `true` when latitude is within [-90, 90] and longitude within
    /// [-180, 180]. The server enforces the same bounds.
    #[must_use]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Parses the latitude/longitude strings a report template stores in its
    /// data attributes.
    ///
    /// Each value is read like `parseFloat`: leading whitespace is skipped and
    /// the longest numeric prefix wins, so `"49.3abc"` reads as `49.3`.
    /// Returns `None` unless both values come out finite.
    #[must_use]
    pub fn from_saved(lat: &str, lng: &str) -> Option<Self> {
        let point = Self::new(parse_float_prefix(lat)?, parse_float_prefix(lng)?);
        point.is_finite().then_some(point)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LatLng({}, {})", self.lat, self.lng)
    }
}

fn parse_float_prefix(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    // Shrink until the prefix parses; "12.5e" or "3-" fall back to "12.5" / "3".
    (1..=candidate_len)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
}

/// Geographic extent of the current map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Builds a box from its south-west and north-east corners.
    #[must_use]
    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            lon_min: south_west.lng,
            lat_min: south_west.lat,
            lon_max: north_east.lng,
            lat_max: north_east.lat,
        }
    }

    /// Box of `lat_span` x `lng_span` degrees centered on `center`.
    #[must_use]
    pub fn around(center: LatLng, lat_span: f64, lng_span: f64) -> Self {
        Self {
            lon_min: center.lng - lng_span / 2.0,
            lat_min: center.lat - lat_span / 2.0,
            lon_max: center.lng + lng_span / 2.0,
            lat_max: center.lat + lat_span / 2.0,
        }
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lng)
    }
}

/// Optional report date filter attached to a map search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

impl DateRange {
    /// Parses the raw values of the two date inputs.
    ///
    /// Blank or missing values leave that side of the range open.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidDate`] if a non-blank value is not `YYYY-MM-DD`.
    /// - [`CoreError::InvertedDateRange`] if both are set and `date_from` is
    ///   after `date_to`.
    pub fn from_fields(date_from: Option<&str>, date_to: Option<&str>) -> Result<Self, CoreError> {
        let range = Self {
            date_from: parse_date_field("date_from", date_from)?,
            date_to: parse_date_field("date_to", date_to)?,
        };
        if let (Some(from), Some(to)) = (range.date_from, range.date_to) {
            if from > to {
                return Err(CoreError::InvertedDateRange {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }
        Ok(range)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.date_from.is_none() && self.date_to.is_none()
    }
}

fn parse_date_field(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CoreError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latlng_serializes_like_leaflet() {
        let json = serde_json::to_value(LatLng::new(49.3, -123.5)).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 49.3, "lng": -123.5}));
    }

    #[test]
    fn from_saved_parses_plain_numbers() {
        assert_eq!(
            LatLng::from_saved("49.25", "-123.1"),
            Some(LatLng::new(49.25, -123.1))
        );
    }

    #[test]
    fn from_saved_reads_numeric_prefix() {
        assert_eq!(
            LatLng::from_saved("  49.3abc", "-123.5 W"),
            Some(LatLng::new(49.3, -123.5))
        );
    }

    #[test]
    fn from_saved_rejects_missing_or_non_numeric() {
        assert_eq!(LatLng::from_saved("", "-123.5"), None);
        assert_eq!(LatLng::from_saved("None", "-123.5"), None);
        assert_eq!(LatLng::from_saved("49.3", "undefined"), None);
    }

    #[test]
    fn from_saved_rejects_overflow_to_infinity() {
        assert_eq!(LatLng::from_saved("1e400", "0"), None);
    }

    #[test]
    fn in_range_checks_both_axes() {
        assert!(LatLng::new(90.0, -180.0).in_range());
        assert!(!LatLng::new(90.5, 0.0).in_range());
        assert!(!LatLng::new(0.0, 181.0).in_range());
    }

    #[test]
    fn bbox_from_corners_and_contains() {
        let bbox = BoundingBox::from_corners(LatLng::new(49.0, -124.0), LatLng::new(49.6, -123.0));
        assert!(bbox.contains(LatLng::new(49.3, -123.5)));
        assert!(!bbox.contains(LatLng::new(50.0, -123.5)));
        let center = bbox.center();
        assert!((center.lat - 49.3).abs() < 1e-9);
        assert!((center.lng - -123.5).abs() < 1e-9);
    }

    #[test]
    fn bbox_serializes_with_server_field_names() {
        let bbox = BoundingBox::around(LatLng::new(0.0, 0.0), 2.0, 4.0);
        let json = serde_json::to_value(bbox).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"lon_min": -2.0, "lat_min": -1.0, "lon_max": 2.0, "lat_max": 1.0})
        );
    }

    #[test]
    fn date_range_blank_fields_are_open() {
        let range = DateRange::from_fields(Some("  "), None).unwrap();
        assert!(range.is_open());
        assert_eq!(serde_json::to_value(range).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn date_range_parses_iso_dates() {
        let range = DateRange::from_fields(Some("2021-03-01"), Some("2021-04-15")).unwrap();
        assert_eq!(
            serde_json::to_value(range).unwrap(),
            serde_json::json!({"date_from": "2021-03-01", "date_to": "2021-04-15"})
        );
    }

    #[test]
    fn date_range_rejects_bad_date() {
        let err = DateRange::from_fields(Some("03/01/2021"), None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { ref field, .. } if field == "date_from"));
    }

    #[test]
    fn date_range_rejects_inverted_range() {
        let err = DateRange::from_fields(Some("2021-05-01"), Some("2021-04-01")).unwrap_err();
        assert!(matches!(err, CoreError::InvertedDateRange { .. }));
    }
}
