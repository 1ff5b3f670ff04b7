//! Headless stand-ins for the browser: a map that only tracks its view,
//! marker and points, and a page that keeps element state in memory.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use spillmap_core::{BoundingBox, LatLng};
use spillmap_view::{ControlPosition, ElementId, MapMount, MapSurface, Page, PointMarker, TileLayer};

/// Viewport size used to derive bounds from center and zoom.
const VIEWPORT_WIDTH_PX: f64 = 1024.0;
const VIEWPORT_HEIGHT_PX: f64 = 768.0;
const TILE_SIZE_PX: f64 = 256.0;

#[derive(Debug, Default)]
struct MapState {
    center: Option<LatLng>,
    zoom: u8,
    fixed_bounds: Option<BoundingBox>,
    marker: Option<(LatLng, bool)>,
    points: Vec<PointMarker>,
}

#[derive(Debug, Default)]
pub struct HeadlessMap {
    state: Mutex<MapState>,
}

impl HeadlessMap {
    /// Pins the viewport to `bounds` regardless of center and zoom.
    pub fn pin_bounds(&self, bounds: BoundingBox) {
        let mut state = self.lock();
        state.center = Some(bounds.center());
        state.fixed_bounds = Some(bounds);
    }

    pub fn points(&self) -> Vec<PointMarker> {
        self.lock().points.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MapState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Approximate viewport extent of a Web Mercator map of the fixed viewport
/// size. Longitude span is exact; latitude span is scaled by `cos(lat)` and
/// the box is cut off at the poles.
fn viewport_bounds(center: LatLng, zoom: u8) -> BoundingBox {
    let degrees_per_px = 360.0 / (TILE_SIZE_PX * 2f64.powi(i32::from(zoom)));
    let lng_span = (degrees_per_px * VIEWPORT_WIDTH_PX).min(360.0);
    let lat_span =
        (degrees_per_px * VIEWPORT_HEIGHT_PX * center.lat.to_radians().cos()).min(180.0);
    let mut bounds = BoundingBox::around(center, lat_span, lng_span);
    bounds.lat_min = bounds.lat_min.clamp(-90.0, 90.0);
    bounds.lat_max = bounds.lat_max.clamp(-90.0, 90.0);
    bounds
}

impl MapSurface for HeadlessMap {
    fn set_view(&self, center: LatLng, zoom: u8) {
        let mut state = self.lock();
        state.center = Some(center);
        state.zoom = zoom;
        state.fixed_bounds = None;
    }

    fn center(&self) -> LatLng {
        self.lock().center.unwrap_or_else(LatLng::origin)
    }

    fn zoom(&self) -> u8 {
        self.lock().zoom
    }

    fn bounds(&self) -> BoundingBox {
        let state = self.lock();
        state.fixed_bounds.unwrap_or_else(|| {
            viewport_bounds(state.center.unwrap_or_else(LatLng::origin), state.zoom)
        })
    }

    fn set_zoom_control(&self, position: ControlPosition) {
        tracing::trace!(?position, "zoom control moved");
    }

    fn add_tile_layer(&self, layer: &TileLayer) {
        tracing::trace!(url = %layer.url_template, "tile layer attached");
    }

    fn place_marker(&self, at: LatLng, draggable: bool) {
        self.lock().marker = Some((at, draggable));
    }

    fn set_marker_position(&self, at: LatLng) {
        if let Some((position, _)) = self.lock().marker.as_mut() {
            *position = at;
        }
    }

    fn set_marker_draggable(&self, draggable: bool) {
        if let Some((_, flag)) = self.lock().marker.as_mut() {
            *flag = draggable;
        }
    }

    fn marker_position(&self) -> Option<LatLng> {
        self.lock().marker.map(|(position, _)| position)
    }

    fn add_point(&self, point: &PointMarker) {
        self.lock().points.push(point.clone());
    }

    fn clear_points(&self) {
        self.lock().points.clear();
    }
}

/// Every container exists on a headless page.
pub struct HeadlessMount;

impl MapMount for HeadlessMount {
    type Map = HeadlessMap;

    fn mount(&self, container_id: &str) -> Option<HeadlessMap> {
        tracing::debug!(container = container_id, "mounting headless map");
        Some(HeadlessMap::default())
    }
}

#[derive(Debug, Default, Clone)]
struct ElementState {
    value: String,
    html: String,
    visible: bool,
}

#[derive(Debug, Default)]
pub struct TerminalPage {
    elements: Mutex<HashMap<ElementId, ElementState>>,
}

impl TerminalPage {
    pub fn with_values(values: &[(ElementId, &str)]) -> Self {
        let page = Self::default();
        for (id, value) in values {
            page.set_value(*id, value);
        }
        page
    }

    pub fn html(&self, id: ElementId) -> String {
        self.lock()
            .get(&id)
            .map(|e| e.html.clone())
            .unwrap_or_default()
    }

    pub fn field(&self, id: ElementId) -> String {
        self.value(id).unwrap_or_default()
    }

    /// Error text of `id` if it is currently shown.
    pub fn shown_error(&self, id: ElementId) -> Option<String> {
        self.lock()
            .get(&id)
            .filter(|e| e.visible)
            .map(|e| e.html.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ElementId, ElementState>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, id: ElementId, f: impl FnOnce(&mut ElementState)) {
        f(self.lock().entry(id).or_default());
    }
}

impl Page for TerminalPage {
    fn value(&self, id: ElementId) -> Option<String> {
        self.lock().get(&id).map(|e| e.value.clone())
    }

    fn set_value(&self, id: ElementId, value: &str) {
        tracing::debug!(element = %id, value, "field updated");
        self.update(id, |e| e.value = value.to_string());
    }

    fn set_html(&self, id: ElementId, html: &str) {
        self.update(id, |e| e.html = html.to_string());
    }

    fn append_html(&self, id: ElementId, html: &str) {
        self.update(id, |e| e.html.push_str(html));
    }

    fn set_attribute(&self, id: ElementId, name: &str, value: &str) {
        tracing::debug!(element = %id, name, value, "attribute set");
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        self.update(id, |e| e.visible = visible);
    }
}
