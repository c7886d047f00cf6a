//! Rendering numbers into display text

/// Decimal places kept for non-integral results
pub const RESULT_DECIMALS: usize = 10;

/// Formats an evaluation result for the display
///
/// Whole numbers render without a decimal point. Anything else is rounded
/// to [`RESULT_DECIMALS`] places and printed in shortest round-trip form;
/// a value that only becomes whole through rounding keeps a `.0` suffix.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        // -0.0 collapses to "0"
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{value:.0}");
    }

    let rounded = round_to_places(value, RESULT_DECIMALS);
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        rounded.to_string()
    }
}

/// Formats the memory register as recalled into the display
///
/// Whole values keep one fractional digit (`4.0`). Exponent notation is
/// never produced, so the text stays within the input alphabet.
#[must_use]
pub fn format_memory(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Rounds through a correctly rounded decimal rendering
fn round_to_places(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
