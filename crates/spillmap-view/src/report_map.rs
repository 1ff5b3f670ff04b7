//! Bounding-box report search map with a paginated sample list.
//!
//! Every fetch issues a new request token. A search or sample response is
//! applied only while its token is still the latest one issued, so a slow
//! response for an old viewport can never overwrite the markers or samples
//! of a newer one. Issuing a token, installing a result and appending a
//! sample page all happen under the `results` lock.
//!
//! At most one sample page per result is in flight. The cursor only moves
//! past a page once its HTML has been appended, so a failed render is
//! retried by the next "load more".

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use spillmap_client::{MapSearchRequest, SpillApi};
use spillmap_core::{DateRange, Report};

use crate::dom::{ElementId, Page};
use crate::error::ViewError;
use crate::map::{MapSurface, PointMarker};
use crate::samples::SampleCursor;

pub const LOAD_MORE_LABEL: &str = "Load More...";
pub const NO_MORE_LABEL: &str = "No more reports";

/// What caused a fetch; only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Ready,
    MoveEnd,
    ApplyFilters,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Ready => write!(f, "ready"),
            Trigger::MoveEnd => write!(f, "moveend"),
            Trigger::ApplyFilters => write!(f, "apply_filters"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { reports: usize, first_page: SamplePage },
    /// A newer fetch was issued while this one was in flight.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePage {
    /// `exhausted` is set when this page reached the end of the result.
    Appended { count: usize, exhausted: bool },
    /// Nothing left to load.
    Empty,
    /// Another page of the same result is still rendering; nothing was sent.
    InFlight,
    /// The result this page belonged to was replaced while rendering.
    Superseded,
}

struct ResultSet {
    token: u64,
    cursor: SampleCursor,
    page_in_flight: bool,
}

pub struct ReportMapController<M, P, A> {
    map: M,
    page: P,
    api: A,
    page_size: usize,
    latest_token: AtomicU64,
    results: Mutex<ResultSet>,
    filters_expanded: AtomicBool,
}

impl<M, P, A> ReportMapController<M, P, A>
where
    M: MapSurface,
    P: Page,
    A: SpillApi,
{
    pub fn new(map: M, page: P, api: A, page_size: usize) -> Self {
        Self {
            map,
            page,
            api,
            page_size,
            latest_token: AtomicU64::new(0),
            results: Mutex::new(ResultSet {
                token: 0,
                cursor: SampleCursor::empty(page_size),
                page_in_flight: false,
            }),
            filters_expanded: AtomicBool::new(false),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Reports of the currently applied search.
    #[must_use]
    pub fn current_reports(&self) -> Arc<[Report]> {
        self.lock_results().cursor.reports().into()
    }

    /// Initial search once the page has loaded.
    ///
    /// # Errors
    ///
    /// See [`ReportMapController::fetch`].
    pub async fn on_ready(&self) -> Result<FetchOutcome, ViewError> {
        self.fetch(Trigger::Ready).await
    }

    /// The map was panned or zoomed.
    ///
    /// # Errors
    ///
    /// See [`ReportMapController::fetch`].
    pub async fn on_move_end(&self) -> Result<FetchOutcome, ViewError> {
        self.fetch(Trigger::MoveEnd).await
    }

    /// The filter form was submitted.
    ///
    /// # Errors
    ///
    /// See [`ReportMapController::fetch`].
    pub async fn on_apply_filters(&self) -> Result<FetchOutcome, ViewError> {
        self.fetch(Trigger::ApplyFilters).await
    }

    /// The "load more" affordance was clicked.
    ///
    /// # Errors
    ///
    /// See [`ReportMapController::load_next_samples`].
    pub async fn on_load_next_samples(&self) -> Result<SamplePage, ViewError> {
        self.load_next_samples().await
    }

    /// Shows or hides the filter panel; returns whether it is now shown.
    pub fn on_expand_filters(&self) -> bool {
        let expanded = !self.filters_expanded.fetch_xor(true, Ordering::SeqCst);
        self.page.set_visible(ElementId::MapFilters, expanded);
        expanded
    }

    /// Searches the current viewport and repopulates markers and samples.
    ///
    /// # Errors
    ///
    /// - [`ViewError::InvalidFilter`] if a date filter does not parse; no
    ///   request is made.
    /// - [`ViewError::Api`] if the search or first sample render fails.
    ///
    /// Both are also shown in `#map_error`.
    pub async fn fetch(&self, trigger: Trigger) -> Result<FetchOutcome, ViewError> {
        let dates = match self.read_filters() {
            Ok(dates) => dates,
            Err(err) => {
                tracing::warn!(%trigger, error = %err, "rejecting map search filters");
                self.page.show_error(ElementId::MapError, &err.to_string());
                return Err(err);
            }
        };
        let request = MapSearchRequest {
            bbox: self.map.bounds(),
            dates,
        };
        let token = {
            let _results = self.lock_results();
            let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
            self.map.clear_points();
            self.page.empty(ElementId::ReportMapSamples);
            self.page.set_html(ElementId::LoadNextLink, LOAD_MORE_LABEL);
            token
        };
        tracing::debug!(%trigger, token, bbox = ?request.bbox, "searching reports in viewport");

        let result = self.api.map_search(&request).await;

        let count = {
            let mut results = self.lock_results();
            if !self.is_current(token) {
                tracing::debug!(token, "discarding superseded map search");
                return Ok(FetchOutcome::Superseded);
            }
            let reports: Arc<[Report]> = match result {
                Ok(reports) => reports.into(),
                Err(err) => {
                    tracing::warn!(token, error = %err, "map search failed");
                    self.page.show_error(ElementId::MapError, &err.to_string());
                    return Err(err.into());
                }
            };

            self.map.clear_points();
            for report in &*reports {
                self.map.add_point(&PointMarker::from(report));
            }
            self.page.hide_error(ElementId::MapError);

            let count = reports.len();
            *results = ResultSet {
                token,
                cursor: SampleCursor::new(reports, self.page_size),
                page_in_flight: false,
            };
            count
        };
        tracing::info!(token, count, "added spill markers");

        let first_page = self.load_next_samples().await?;
        Ok(FetchOutcome::Applied {
            reports: count,
            first_page,
        })
    }

    /// Renders the next page of samples and appends it to the sample list.
    /// Reaching the end of the result relabels the "load more" link.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Api`] if the render request fails; the message is
    /// also shown in `#map_error` and the same page is sent again next time.
    pub async fn load_next_samples(&self) -> Result<SamplePage, ViewError> {
        let (token, slice) = {
            let mut results = self.lock_results();
            if !self.is_current(results.token) {
                return Ok(SamplePage::Superseded);
            }
            if results.page_in_flight {
                tracing::debug!(token = results.token, "sample page already loading");
                return Ok(SamplePage::InFlight);
            }
            let slice = results.cursor.peek_page().to_vec();
            if slice.is_empty() {
                tracing::debug!("no more reports to load");
                self.page.set_html(ElementId::LoadNextLink, NO_MORE_LABEL);
                return Ok(SamplePage::Empty);
            }
            results.page_in_flight = true;
            (results.token, slice)
        };

        tracing::debug!(token, count = slice.len(), "rendering report samples");
        let result = self.api.render_map_samples(&slice).await;

        let mut results = self.lock_results();
        if results.token == token {
            results.page_in_flight = false;
        }
        if results.token != token || !self.is_current(token) {
            tracing::debug!(token, "discarding samples for superseded search");
            return Ok(SamplePage::Superseded);
        }

        match result {
            Ok(html) => {
                results.cursor.advance(slice.len());
                let exhausted = results.cursor.is_exhausted();
                self.page.append_html(ElementId::ReportMapSamples, &html);
                if exhausted {
                    self.page.set_html(ElementId::LoadNextLink, NO_MORE_LABEL);
                }
                Ok(SamplePage::Appended {
                    count: slice.len(),
                    exhausted,
                })
            }
            Err(err) => {
                tracing::warn!(token, error = %err, "sample render failed");
                self.page.show_error(ElementId::MapError, &err.to_string());
                Err(err.into())
            }
        }
    }

    fn lock_results(&self) -> MutexGuard<'_, ResultSet> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest_token.load(Ordering::SeqCst) == token
    }

    fn read_filters(&self) -> Result<DateRange, ViewError> {
        let date_from = self.page.value(ElementId::DateFrom);
        let date_to = self.page.value(ElementId::DateTo);
        Ok(DateRange::from_fields(date_from.as_deref(), date_to.as_deref())?)
    }
}
