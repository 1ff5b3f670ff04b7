//! Map seam and the map initializer.
//!
//! [`MapSurface`] is the subset of a slippy-map widget the controllers need:
//! view, bounds, one editable marker, and a layer of report points.

use spillmap_core::{BoundingBox, CircleStyle, LatLng, Report};

use crate::error::ViewError;

const ESRI_IMAGERY_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const ESRI_ATTRIBUTION: &str = r#"Map data &copy; <a href="https://www.esri.com/">ESRI</a>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl TileLayer {
    /// ESRI World Imagery, the background of every map in the app.
    #[must_use]
    pub fn esri_imagery() -> Self {
        Self {
            url_template: ESRI_IMAGERY_URL.to_string(),
            max_zoom: 18,
            attribution: ESRI_ATTRIBUTION.to_string(),
        }
    }

    /// Expands the template for one tile.
    #[must_use]
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// A report drawn on the search map.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub center: LatLng,
    pub popup: String,
    pub style: CircleStyle,
}

impl From<&Report> for PointMarker {
    fn from(report: &Report) -> Self {
        Self {
            center: report.position(),
            popup: report.popup.clone(),
            style: CircleStyle::default(),
        }
    }
}

pub trait MapSurface {
    fn set_view(&self, center: LatLng, zoom: u8);
    fn center(&self) -> LatLng;
    fn zoom(&self) -> u8;
    /// Extent of the visible viewport.
    fn bounds(&self) -> BoundingBox;

    fn set_zoom_control(&self, position: ControlPosition);
    fn add_tile_layer(&self, layer: &TileLayer);

    /// Adds the single editable marker.
    fn place_marker(&self, at: LatLng, draggable: bool);
    fn set_marker_position(&self, at: LatLng);
    fn set_marker_draggable(&self, draggable: bool);
    fn marker_position(&self) -> Option<LatLng>;

    /// Adds a report point to the point layer.
    fn add_point(&self, point: &PointMarker);
    /// Removes every report point; the editable marker is untouched.
    fn clear_points(&self);
}

/// Creates map widgets inside page containers.
pub trait MapMount {
    type Map: MapSurface;

    /// Returns `None` when no element with `container_id` exists.
    fn mount(&self, container_id: &str) -> Option<Self::Map>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    pub zoom_control: ControlPosition,
    pub tile_layer: TileLayer,
}

impl MapOptions {
    /// The report search map, centered on Vancouver harbour.
    #[must_use]
    pub fn report_map() -> Self {
        Self::new("report_map_leaflet", LatLng::new(49.3, -123.5), 11)
    }

    /// The coordinate editor on the report form, showing all of Canada.
    #[must_use]
    pub fn coordinate_preview() -> Self {
        Self::new("mapid", LatLng::new(55.0, -90.5), 4)
    }

    #[must_use]
    pub fn new(container_id: &str, center: LatLng, zoom: u8) -> Self {
        Self {
            container_id: container_id.to_string(),
            center,
            zoom,
            zoom_control: ControlPosition::TopRight,
            tile_layer: TileLayer::esri_imagery(),
        }
    }
}

/// Mounts a map, moves its zoom control, attaches the tile layer and sets the
/// default view.
///
/// # Errors
///
/// Returns [`ViewError::ContainerNotFound`] if the container is missing.
pub fn initialize_map<T: MapMount>(mount: &T, options: &MapOptions) -> Result<T::Map, ViewError> {
    let map = mount
        .mount(&options.container_id)
        .ok_or_else(|| ViewError::ContainerNotFound(options.container_id.clone()))?;
    map.set_zoom_control(options.zoom_control);
    map.add_tile_layer(&options.tile_layer);
    map.set_view(options.center, options.zoom);
    tracing::debug!(
        container = %options.container_id,
        center = %options.center,
        zoom = options.zoom,
        "map initialized"
    );
    Ok(map)
}
