use clap::Args;

use spillmap_client::SpillClient;
use spillmap_core::{AppConfig, BoundingBox, LatLng};
use spillmap_view::report_map::NO_MORE_LABEL;
use spillmap_view::{initialize_map, ElementId, FetchOutcome, MapOptions, ReportMapController, SamplePage};

use crate::headless::{HeadlessMount, TerminalPage};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Western edge of the viewport; defaults to the report map's start view
    #[arg(long, allow_hyphen_values = true, requires_all = ["south", "east", "north"])]
    west: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["west", "east", "north"])]
    south: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["west", "south", "north"])]
    east: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["west", "south", "east"])]
    north: Option<f64>,
    /// Earliest report date (YYYY-MM-DD)
    #[arg(long)]
    date_from: Option<String>,
    /// Latest report date (YYYY-MM-DD)
    #[arg(long)]
    date_to: Option<String>,
    /// Keep loading sample pages until every report is listed
    #[arg(long)]
    all: bool,
}

impl SearchArgs {
    fn viewport(&self) -> Option<BoundingBox> {
        match (self.west, self.south, self.east, self.north) {
            (Some(west), Some(south), Some(east), Some(north)) => Some(BoundingBox::from_corners(
                LatLng::new(south, west),
                LatLng::new(north, east),
            )),
            _ => None,
        }
    }
}

pub(crate) async fn run(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let client = SpillClient::from_config(config)?;
    let map = initialize_map(&HeadlessMount, &MapOptions::report_map())?;
    if let Some(viewport) = args.viewport() {
        map.pin_bounds(viewport);
    }

    let page = TerminalPage::with_values(&[
        (ElementId::DateFrom, args.date_from.as_deref().unwrap_or_default()),
        (ElementId::DateTo, args.date_to.as_deref().unwrap_or_default()),
    ]);
    let controller = ReportMapController::new(map, page, client, config.sample_page_size);

    let FetchOutcome::Applied {
        reports,
        first_page,
    } = controller.on_ready().await?
    else {
        anyhow::bail!("search was superseded before it completed");
    };
    println!("{reports} reports in view");
    for point in controller.map().points() {
        println!("  {}  {}", point.center, point.popup);
    }

    let mut last = first_page;
    while args.all && matches!(last, SamplePage::Appended { exhausted: false, .. }) {
        last = controller.on_load_next_samples().await?;
    }

    let samples = controller.page().html(ElementId::ReportMapSamples);
    if !samples.is_empty() {
        println!();
        println!("{samples}");
    }
    let label = controller.page().html(ElementId::LoadNextLink);
    if label != NO_MORE_LABEL {
        tracing::info!("more samples available, rerun with --all to list them");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SearchArgs,
    }

    #[test]
    fn full_viewport_becomes_bounding_box() {
        let harness = Harness::parse_from([
            "search", "--west", "-124.1", "--south", "48.9", "--east", "-122.9", "--north", "49.7",
        ]);
        assert_eq!(
            harness.args.viewport(),
            Some(BoundingBox::from_corners(
                LatLng::new(48.9, -124.1),
                LatLng::new(49.7, -122.9)
            ))
        );
    }

    #[test]
    fn partial_viewport_is_rejected() {
        let result = Harness::try_parse_from(["search", "--west", "-124.1"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_viewport_uses_map_default() {
        let harness = Harness::parse_from(["search", "--date-from", "2021-01-01"]);
        assert!(harness.args.viewport().is_none());
        assert_eq!(harness.args.date_from.as_deref(), Some("2021-01-01"));
    }
}
