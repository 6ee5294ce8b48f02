//! Numeric word formatting.

/// Formats a coordinate or feed value for command output.
///
/// * `decimal_places` — number of digits after the decimal point.
/// * `strip_trailing_zeros` — remove trailing zeros in the fractional part
///   (and the decimal point itself if no fractional digits remain).
///
/// Word-change suppression elsewhere always compares the full-precision
/// stored value, never this rounded text, so emitting only deltas cannot
/// accumulate rounding error.
pub fn format_coord(value: f64, decimal_places: u32, strip_trailing_zeros: bool) -> String {
    let mut s = format!("{:.prec$}", value, prec = decimal_places as usize);

    if strip_trailing_zeros && s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    s
}
