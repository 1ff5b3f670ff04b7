//! In-memory page, map and server doubles shared by the controller tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spillmap_client::{
    ApiError, CheckCoordinatesRequest, CheckedCoordinates, ConvertedCoordinates,
    MapSearchRequest, SpillApi,
};
use spillmap_core::{BoundingBox, LatLng, Report};
use spillmap_view::{ControlPosition, ElementId, MapMount, MapSurface, Page, PointMarker, TileLayer};

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct Element {
    pub value: String,
    pub html: String,
    pub attributes: HashMap<String, String>,
    pub visible: Option<bool>,
}

#[derive(Default)]
pub struct FakePage {
    elements: Mutex<HashMap<ElementId, Element>>,
}

impl FakePage {
    pub fn with_values(values: &[(ElementId, &str)]) -> Self {
        let page = Self::default();
        for (id, value) in values {
            page.set_value(*id, value);
        }
        page
    }

    pub fn element(&self, id: ElementId) -> Element {
        self.elements.lock().unwrap().get(&id).cloned().unwrap_or_default()
    }

    pub fn html(&self, id: ElementId) -> String {
        self.element(id).html
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.element(id).attributes.get(name).cloned()
    }

    pub fn visible(&self, id: ElementId) -> Option<bool> {
        self.element(id).visible
    }

    fn update(&self, id: ElementId, f: impl FnOnce(&mut Element)) {
        let mut elements = self.elements.lock().unwrap();
        f(elements.entry(id).or_default());
    }
}

impl Page for FakePage {
    fn value(&self, id: ElementId) -> Option<String> {
        self.elements.lock().unwrap().get(&id).map(|e| e.value.clone())
    }

    fn set_value(&self, id: ElementId, value: &str) {
        self.update(id, |e| e.value = value.to_string());
    }

    fn set_html(&self, id: ElementId, html: &str) {
        self.update(id, |e| e.html = html.to_string());
    }

    fn append_html(&self, id: ElementId, html: &str) {
        self.update(id, |e| e.html.push_str(html));
    }

    fn set_attribute(&self, id: ElementId, name: &str, value: &str) {
        self.update(id, |e| {
            e.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        self.update(id, |e| e.visible = Some(visible));
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MapState {
    pub center: LatLng,
    pub zoom: u8,
    pub bounds: BoundingBox,
    pub zoom_control: Option<ControlPosition>,
    pub tile_layers: Vec<TileLayer>,
    pub marker: Option<(LatLng, bool)>,
    pub points: Vec<PointMarker>,
    pub set_view_calls: usize,
}

#[derive(Debug)]
pub struct FakeMap {
    state: Mutex<MapState>,
}

impl Default for FakeMap {
    fn default() -> Self {
        Self::new(LatLng::new(49.3, -123.5), 11)
    }
}

impl FakeMap {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            state: Mutex::new(MapState {
                center,
                zoom,
                bounds: BoundingBox::around(center, 0.5, 1.0),
                zoom_control: None,
                tile_layers: Vec::new(),
                marker: None,
                points: Vec::new(),
                set_view_calls: 0,
            }),
        }
    }

    pub fn state(&self) -> MapState {
        self.state.lock().unwrap().clone()
    }

    pub fn set_bounds(&self, bounds: BoundingBox) {
        self.state.lock().unwrap().bounds = bounds;
    }

    pub fn popups(&self) -> Vec<String> {
        self.state().points.into_iter().map(|p| p.popup).collect()
    }
}

impl MapSurface for FakeMap {
    fn set_view(&self, center: LatLng, zoom: u8) {
        let mut state = self.state.lock().unwrap();
        state.center = center;
        state.zoom = zoom;
        state.set_view_calls += 1;
    }

    fn center(&self) -> LatLng {
        self.state.lock().unwrap().center
    }

    fn zoom(&self) -> u8 {
        self.state.lock().unwrap().zoom
    }

    fn bounds(&self) -> BoundingBox {
        self.state.lock().unwrap().bounds
    }

    fn set_zoom_control(&self, position: ControlPosition) {
        self.state.lock().unwrap().zoom_control = Some(position);
    }

    fn add_tile_layer(&self, layer: &TileLayer) {
        self.state.lock().unwrap().tile_layers.push(layer.clone());
    }

    fn place_marker(&self, at: LatLng, draggable: bool) {
        self.state.lock().unwrap().marker = Some((at, draggable));
    }

    fn set_marker_position(&self, at: LatLng) {
        let mut state = self.state.lock().unwrap();
        if let Some((position, _)) = state.marker.as_mut() {
            *position = at;
        }
    }

    fn set_marker_draggable(&self, draggable: bool) {
        let mut state = self.state.lock().unwrap();
        if let Some((_, flag)) = state.marker.as_mut() {
            *flag = draggable;
        }
    }

    fn marker_position(&self) -> Option<LatLng> {
        self.state.lock().unwrap().marker.map(|(position, _)| position)
    }

    fn add_point(&self, point: &PointMarker) {
        self.state.lock().unwrap().points.push(point.clone());
    }

    fn clear_points(&self) {
        self.state.lock().unwrap().points.clear();
    }
}

pub struct FakeMount {
    containers: HashSet<String>,
}

impl FakeMount {
    pub fn with_containers(ids: &[&str]) -> Self {
        Self {
            containers: ids.iter().map(|id| (*id).to_string()).collect(),
        }
    }
}

impl MapMount for FakeMount {
    type Map = FakeMap;

    fn mount(&self, container_id: &str) -> Option<FakeMap> {
        self.containers
            .contains(container_id)
            .then(|| FakeMap::new(LatLng::origin(), 0))
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub enum Scripted<T> {
    Ok(T),
    Reject(&'static str),
}

impl<T> Scripted<T> {
    fn into_result(self, endpoint: &str) -> Result<T, ApiError> {
        match self {
            Scripted::Ok(value) => Ok(value),
            Scripted::Reject(message) => Err(ApiError::Rejected {
                endpoint: endpoint.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct ApiState {
    conversions: VecDeque<Scripted<ConvertedCoordinates>>,
    checks: VecDeque<Scripted<CheckedCoordinates>>,
    searches: VecDeque<(Duration, Scripted<Vec<Report>>)>,
    render_failures: VecDeque<bool>,
    render_delays: VecDeque<Duration>,

    convert_calls: Vec<LatLng>,
    check_calls: Vec<CheckCoordinatesRequest>,
    search_calls: Vec<MapSearchRequest>,
    render_calls: Vec<Vec<Report>>,
}

/// Scripted server. Clones share state so a test can keep a handle after
/// moving one into a controller.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<ApiState>>,
}

impl FakeApi {
    pub fn push_conversion(&self, response: Scripted<ConvertedCoordinates>) {
        self.state.lock().unwrap().conversions.push_back(response);
    }

    pub fn push_check(&self, response: Scripted<CheckedCoordinates>) {
        self.state.lock().unwrap().checks.push_back(response);
    }

    pub fn push_search(&self, delay: Duration, response: Scripted<Vec<Report>>) {
        self.state
            .lock()
            .unwrap()
            .searches
            .push_back((delay, response));
    }

    pub fn fail_next_render(&self) {
        self.state.lock().unwrap().render_failures.push_back(true);
    }

    pub fn delay_next_render(&self, delay: Duration) {
        self.state.lock().unwrap().render_delays.push_back(delay);
    }

    pub fn convert_calls(&self) -> Vec<LatLng> {
        self.state.lock().unwrap().convert_calls.clone()
    }

    pub fn check_calls(&self) -> Vec<CheckCoordinatesRequest> {
        self.state.lock().unwrap().check_calls.clone()
    }

    pub fn search_calls(&self) -> Vec<MapSearchRequest> {
        self.state.lock().unwrap().search_calls.clone()
    }

    pub fn render_calls(&self) -> Vec<Vec<Report>> {
        self.state.lock().unwrap().render_calls.clone()
    }
}

impl SpillApi for FakeApi {
    async fn latlon_to_coords(&self, position: LatLng) -> Result<ConvertedCoordinates, ApiError> {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.convert_calls.push(position);
            state.conversions.pop_front()
        };
        scripted
            .unwrap_or(Scripted::Ok(ConvertedCoordinates::default()))
            .into_result("geo/latlon_to_coords")
    }

    async fn check_coordinates(
        &self,
        request: &CheckCoordinatesRequest,
    ) -> Result<CheckedCoordinates, ApiError> {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.check_calls.push(request.clone());
            state.checks.pop_front()
        };
        scripted
            .unwrap_or(Scripted::Reject("no scripted response"))
            .into_result("geo/chk_coordinates")
    }

    async fn map_search(&self, request: &MapSearchRequest) -> Result<Vec<Report>, ApiError> {
        let (delay, scripted) = {
            let mut state = self.state.lock().unwrap();
            state.search_calls.push(request.clone());
            state
                .searches
                .pop_front()
                .unwrap_or((Duration::ZERO, Scripted::Ok(Vec::new())))
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        scripted.into_result("report/map_search")
    }

    async fn render_map_samples(&self, reports: &[Report]) -> Result<String, ApiError> {
        let (fail, delay) = {
            let mut state = self.state.lock().unwrap();
            state.render_calls.push(reports.to_vec());
            (
                state.render_failures.pop_front().unwrap_or(false),
                state.render_delays.pop_front().unwrap_or(Duration::ZERO),
            )
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(ApiError::UnexpectedStatus {
                status: 500,
                url: "http://test/report/render_map_samples".to_string(),
            });
        }
        Ok(reports
            .iter()
            .map(|r| format!("<li>{}</li>", r.popup))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn reports(prefix: &str, n: usize) -> Vec<Report> {
    (0..n)
        .map(|i| {
            let mut extra = serde_json::Map::new();
            extra.insert("report_num".to_string(), serde_json::json!(i));
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64 / 100.0;
            Report {
                latitude: 49.2 + offset,
                longitude: -123.4,
                popup: format!("{prefix}-{i}"),
                extra,
            }
        })
        .collect()
}
