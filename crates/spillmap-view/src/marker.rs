//! Single-marker coordinate editor on the report form.
//!
//! The marker and the form fields are kept in step through the server:
//! moving the marker asks the server to render its position in every
//! notation, and typing a coordinate asks the server to resolve it to
//! lat/lon. Failures of either round-trip are shown in `#coord_error`; the
//! fields keep their previous values.

use spillmap_client::{CheckCoordinatesRequest, ConvertedCoordinates, SpillApi};
use spillmap_core::{CoordinateFormat, FormatHint, LatLng};

use crate::dom::{ElementId, Page};
use crate::error::ViewError;
use crate::format_select::apply_format_selection;
use crate::map::MapSurface;

/// Zoom used when focusing the map on a saved report coordinate.
pub const MARKER_FOCUS_ZOOM: u8 = 8;

pub struct MarkerController<M, P, A> {
    map: M,
    page: P,
    api: A,
    draggable: bool,
}

impl<M, P, A> MarkerController<M, P, A>
where
    M: MapSurface,
    P: Page,
    A: SpillApi,
{
    /// Places the marker at `saved`, or at (0, 0) when the report has no
    /// usable coordinate. A finite saved coordinate also centers the map on
    /// it at [`MARKER_FOCUS_ZOOM`]; otherwise the map keeps its default view.
    pub fn initialize(map: M, page: P, api: A, saved: Option<LatLng>, draggable: bool) -> Self {
        let focus = saved.filter(LatLng::is_finite);
        map.place_marker(focus.unwrap_or_else(LatLng::origin), draggable);
        match focus {
            Some(center) => {
                tracing::info!(center = %center, draggable, "report has coordinates, focusing map");
                map.set_view(center, MARKER_FOCUS_ZOOM);
            }
            None => tracing::debug!(draggable, "no saved coordinates, keeping default view"),
        }
        Self {
            map,
            page,
            api,
            draggable,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Handles the end of a marker drag.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::MarkerMissing`] if no marker is on the map, or
    /// [`ViewError::Api`] if the conversion request fails.
    pub async fn on_drag_end(&self) -> Result<ConvertedCoordinates, ViewError> {
        let position = self.map.marker_position().ok_or(ViewError::MarkerMissing)?;
        self.map.set_marker_draggable(self.draggable);
        self.sync_fields_from(position).await
    }

    /// Moves the marker to a double-clicked point.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Api`] if the conversion request fails.
    pub async fn on_double_click(&self, at: LatLng) -> Result<ConvertedCoordinates, ViewError> {
        tracing::debug!(at = %at, "double click");
        self.map.set_marker_position(at);
        self.sync_fields_from(at).await
    }

    /// Validates the typed coordinate and moves the marker to it, keeping the
    /// current zoom.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Api`] if the server rejects the coordinate or the
    /// request fails; the message is also shown in `#coord_error`.
    pub async fn on_coordinates_changed(&self) -> Result<LatLng, ViewError> {
        let request = CheckCoordinatesRequest {
            coord_str: self.page.value(ElementId::Coordinates).unwrap_or_default(),
            coordinate_type: self.page.value(ElementId::CoordinateType).unwrap_or_default(),
        };

        let checked = match self.api.check_coordinates(&request).await {
            Ok(checked) => checked,
            Err(err) => {
                tracing::warn!(coord_str = %request.coord_str, error = %err, "coordinate check failed");
                self.page.show_error(ElementId::CoordError, &err.to_string());
                return Err(err.into());
            }
        };

        self.page.hide_error(ElementId::CoordError);
        self.page
            .set_value(ElementId::Latitude, &checked.lat.to_string());
        self.page
            .set_value(ElementId::Longitude, &checked.lon.to_string());

        let position = LatLng::new(checked.lat, checked.lon);
        self.map.set_marker_position(position);
        self.map.set_view(position, self.map.zoom());
        Ok(position)
    }

    pub fn on_coordinate_type_changed(&self) -> FormatHint {
        apply_format_selection(&self.page)
    }

    async fn sync_fields_from(&self, position: LatLng) -> Result<ConvertedCoordinates, ViewError> {
        let converted = match self.api.latlon_to_coords(position).await {
            Ok(converted) => converted,
            Err(err) => {
                tracing::warn!(position = %position, error = %err, "coordinate conversion failed");
                self.page.show_error(ElementId::CoordError, &err.to_string());
                return Err(err.into());
            }
        };

        self.page.hide_error(ElementId::CoordError);
        let selected = self
            .page
            .value(ElementId::CoordinateType)
            .and_then(|label| CoordinateFormat::from_label(&label));
        // With no notation selected the typed coordinate is left alone.
        if let Some(text) = selected.and_then(|format| converted.get(format)) {
            self.page.set_value(ElementId::Coordinates, text);
        }
        self.page
            .set_value(ElementId::Latitude, &position.lat.to_string());
        self.page
            .set_value(ElementId::Longitude, &position.lng.to_string());
        Ok(converted)
    }
}
