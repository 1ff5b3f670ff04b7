//! DOM seam: the element ids shared with the server-rendered templates and
//! the handful of operations the controllers perform on them.

/// Elements the controllers read or write. The string ids are the contract
/// with the report templates and must not change independently of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Coordinate text input on the report form.
    Coordinates,
    /// Coordinate notation select.
    CoordinateType,
    /// Help text under the coordinate input.
    CoordHelp,
    Latitude,
    Longitude,
    CoordError,
    /// Side list of rendered report samples.
    ReportMapSamples,
    /// Label of the "load more" affordance.
    LoadNextLink,
    LoadNextSamples,
    ApplyFilters,
    ExpandFilters,
    DateFrom,
    DateTo,
    /// Collapsible filter panel toggled by `ExpandFilters`.
    MapFilters,
    /// Error line above the search map.
    MapError,
}

impl ElementId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ElementId::Coordinates => "coordinates",
            ElementId::CoordinateType => "coordinate_type",
            ElementId::CoordHelp => "coordHelp",
            ElementId::Latitude => "latitude",
            ElementId::Longitude => "longitude",
            ElementId::CoordError => "coord_error",
            ElementId::ReportMapSamples => "report_map_samples",
            ElementId::LoadNextLink => "loadNextLink",
            ElementId::LoadNextSamples => "loadNextSamples",
            ElementId::ApplyFilters => "applyFilters",
            ElementId::ExpandFilters => "expandFilters",
            ElementId::DateFrom => "date_from",
            ElementId::DateTo => "date_to",
            ElementId::MapFilters => "map_filters",
            ElementId::MapError => "map_error",
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

/// Operations on the current page's elements.
///
/// Methods take `&self`: DOM handles are shared references, and the
/// controllers call into the page from overlapping async handlers.
pub trait Page {
    /// Current value of an input or select; `None` if the element is absent.
    fn value(&self, id: ElementId) -> Option<String>;

    fn set_value(&self, id: ElementId, value: &str);

    /// Replaces the element's inner HTML.
    fn set_html(&self, id: ElementId, html: &str);

    fn append_html(&self, id: ElementId, html: &str);

    fn set_attribute(&self, id: ElementId, name: &str, value: &str);

    fn set_visible(&self, id: ElementId, visible: bool);

    /// Removes all children.
    fn empty(&self, id: ElementId) {
        self.set_html(id, "");
    }

    /// Writes `message` into `id` and reveals it.
    fn show_error(&self, id: ElementId, message: &str) {
        self.set_html(id, message);
        self.set_visible(id, true);
    }

    fn hide_error(&self, id: ElementId) {
        self.set_visible(id, false);
    }
}
