use spillmap_core::FormatHint;

use crate::dom::{ElementId, Page};

/// Copies the pattern and placeholder for the selected coordinate notation
/// onto the coordinate input. Selecting no notation clears them.
pub fn apply_format_selection<P: Page + ?Sized>(page: &P) -> FormatHint {
    let selection = page.value(ElementId::CoordinateType).unwrap_or_default();
    let hint = FormatHint::for_selection(&selection);

    page.set_attribute(ElementId::Coordinates, "pattern", hint.pattern);
    page.set_attribute(ElementId::Coordinates, "placeholder", hint.placeholder);
    page.set_html(ElementId::CoordHelp, &hint.help_text());

    if hint.is_empty() {
        tracing::debug!(selection = %selection, "no coordinate format selected");
    } else {
        tracing::debug!(selection = %selection, pattern = hint.pattern, "coordinate pattern set");
    }
    hint
}
