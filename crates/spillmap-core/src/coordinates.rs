//! Coordinate notations offered by the report form.
//!
//! The `#coordinate_type` select carries the human-readable label, which is
//! also the key the conversion endpoint uses in its response. Each notation
//! has an HTML input `pattern` and a placeholder that the format selector
//! copies onto the `#coordinates` input.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DD_RE: LazyLock<Regex> = LazyLock::new(|| anchored(CoordinateFormat::DecimalDegrees));
static DDM_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(CoordinateFormat::DegreesDecimalMinutes));
static DMS_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(CoordinateFormat::DegreesMinutesSeconds));

fn anchored(format: CoordinateFormat) -> Regex {
    Regex::new(&format!("^(?:{})$", format.pattern())).expect("valid coordinate pattern")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateFormat {
    #[serde(rename = "Decimal Degrees")]
    DecimalDegrees,
    #[serde(rename = "Degrees Decimal Minutes")]
    DegreesDecimalMinutes,
    #[serde(rename = "Degrees Minutes Seconds")]
    DegreesMinutesSeconds,
}

impl CoordinateFormat {
    pub const ALL: [CoordinateFormat; 3] = [
        CoordinateFormat::DecimalDegrees,
        CoordinateFormat::DegreesDecimalMinutes,
        CoordinateFormat::DegreesMinutesSeconds,
    ];

    /// Looks up a format by its select-option label. Matching is exact.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CoordinateFormat::DecimalDegrees => "Decimal Degrees",
            CoordinateFormat::DegreesDecimalMinutes => "Degrees Decimal Minutes",
            CoordinateFormat::DegreesMinutesSeconds => "Degrees Minutes Seconds",
        }
    }

    /// HTML `pattern` attribute value for the coordinate input.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            CoordinateFormat::DecimalDegrees => r"\d{2}\.\d+,-\d{3}\.\d+",
            CoordinateFormat::DegreesDecimalMinutes => {
                r"\d{2} \d{1,2}\.\d+ [Nn] \d{2,3} \d{1,2}\.\d+ [Ww]"
            }
            CoordinateFormat::DegreesMinutesSeconds => {
                r"\d{2} \d{1,2} \d{1,2} [Nn] \d{2,3} \d{1,2} \d{1,2} [Ww]"
            }
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            CoordinateFormat::DecimalDegrees => "XX.XXX,-XXX.XXX",
            CoordinateFormat::DegreesDecimalMinutes => "XX XX.XXX N XXX XX.XXX W",
            CoordinateFormat::DegreesMinutesSeconds => "XX XX XX N XXX XX XX W",
        }
    }

    /// Checks `input` the way a browser checks an input's `pattern`
    /// attribute: the whole value must match.
    #[must_use]
    pub fn matches(self, input: &str) -> bool {
        self.anchored_regex().is_match(input)
    }

    fn anchored_regex(self) -> &'static Regex {
        match self {
            CoordinateFormat::DecimalDegrees => &DD_RE,
            CoordinateFormat::DegreesDecimalMinutes => &DDM_RE,
            CoordinateFormat::DegreesMinutesSeconds => &DMS_RE,
        }
    }
}

impl std::fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pattern and placeholder to apply to the coordinate input for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatHint {
    pub pattern: &'static str,
    pub placeholder: &'static str,
}

impl FormatHint {
    /// Hint for the raw value of the `#coordinate_type` select. Unknown
    /// values, including "no coordinates", give the empty hint.
    #[must_use]
    pub fn for_selection(selection: &str) -> Self {
        CoordinateFormat::from_label(selection).map_or_else(Self::default, Self::from)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty() && self.placeholder.is_empty()
    }

    /// Text shown under the input, e.g. `Format: XX.XXX,-XXX.XXX`.
    #[must_use]
    pub fn help_text(&self) -> String {
        if self.placeholder.is_empty() {
            String::new()
        } else {
            format!("Format: {}", self.placeholder)
        }
    }
}

impl From<CoordinateFormat> for FormatHint {
    fn from(format: CoordinateFormat) -> Self {
        Self {
            pattern: format.pattern(),
            placeholder: format.placeholder(),
        }
    }
}
