use std::str::FromStr;

use spillmap_client::SpillClient;
use spillmap_core::{AppConfig, CoordinateFormat, LatLng};
use spillmap_view::{initialize_map, ElementId, MapOptions, MarkerController, ViewError};

use crate::headless::{HeadlessMap, HeadlessMount, TerminalPage};

/// Notation argument: the full label or its short form.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateFormatArg(pub CoordinateFormat);

impl FromStr for CoordinateFormatArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.to_ascii_lowercase().as_str() {
            "dd" => Some(CoordinateFormat::DecimalDegrees),
            "ddm" => Some(CoordinateFormat::DegreesDecimalMinutes),
            "dms" => Some(CoordinateFormat::DegreesMinutesSeconds),
            _ => CoordinateFormat::from_label(s),
        };
        format.map(Self).ok_or_else(|| {
            let labels: Vec<&str> = CoordinateFormat::ALL.iter().map(|f| f.label()).collect();
            format!(
                "unknown coordinate format '{s}'; expected dd, ddm, dms or one of: {}",
                labels.join(", ")
            )
        })
    }
}

pub(crate) fn print_formats() {
    for format in CoordinateFormat::ALL {
        println!("{}", format.label());
        println!("  placeholder: {}", format.placeholder());
        println!("  pattern:     {}", format.pattern());
    }
}

pub(crate) fn validate(format: CoordinateFormat, coordinates: &str) -> anyhow::Result<()> {
    if format.matches(coordinates) {
        println!("ok: '{coordinates}' is valid {}", format.label());
        Ok(())
    } else {
        anyhow::bail!(
            "'{coordinates}' does not match {} (expected {})",
            format.label(),
            format.placeholder()
        )
    }
}

fn marker_controller(
    config: &AppConfig,
    page: TerminalPage,
) -> anyhow::Result<MarkerController<HeadlessMap, TerminalPage, SpillClient>> {
    let client = SpillClient::from_config(config)?;
    let map = initialize_map(&HeadlessMount, &MapOptions::coordinate_preview())?;
    Ok(MarkerController::initialize(map, page, client, None, true))
}

/// Attaches whatever the page ended up showing in `#coord_error`.
fn with_page_error(page: &TerminalPage, err: ViewError) -> anyhow::Error {
    match page.shown_error(ElementId::CoordError) {
        Some(shown) => {
            anyhow::Error::new(err).context(format!("{} shows: {shown}", ElementId::CoordError))
        }
        None => err.into(),
    }
}

/// Drops the marker at `lat`/`lng` the way a double click would and prints
/// what the form fields end up holding.
pub(crate) async fn convert(
    config: &AppConfig,
    lat: f64,
    lng: f64,
    format: CoordinateFormat,
) -> anyhow::Result<()> {
    let page = TerminalPage::with_values(&[(ElementId::CoordinateType, format.label())]);
    let controller = marker_controller(config, page)?;

    let converted = controller
        .on_double_click(LatLng::new(lat, lng))
        .await
        .map_err(|err| with_page_error(controller.page(), err))?;

    for format in CoordinateFormat::ALL {
        println!(
            "{:<24} {}",
            format.label(),
            converted.get(format).unwrap_or("-")
        );
    }
    let page = controller.page();
    println!();
    println!("coordinates: {}", page.field(ElementId::Coordinates));
    println!("latitude:    {}", page.field(ElementId::Latitude));
    println!("longitude:   {}", page.field(ElementId::Longitude));
    Ok(())
}

/// Types `coordinates` into the form and resolves them through the server.
pub(crate) async fn check(
    config: &AppConfig,
    format: CoordinateFormat,
    coordinates: &str,
) -> anyhow::Result<()> {
    let page = TerminalPage::with_values(&[
        (ElementId::CoordinateType, format.label()),
        (ElementId::Coordinates, coordinates),
    ]);
    let controller = marker_controller(config, page)?;

    let hint = controller.on_coordinate_type_changed();
    if !format.matches(coordinates) {
        tracing::warn!(
            coordinates,
            format = format.label(),
            "input does not match the field pattern, sending anyway"
        );
        println!("{}", hint.help_text());
    }

    let position = controller
        .on_coordinates_changed()
        .await
        .map_err(|err| with_page_error(controller.page(), err))?;
    println!("latitude:  {}", position.lat);
    println!("longitude: {}", position.lng);
    Ok(())
}
