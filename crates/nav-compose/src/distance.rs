//! Distance labels.
//!
//! | Distance    | Label          |
//! |-------------|----------------|
//! | `< 1000 m`  | `"412 m"`      |
//! | `≥ 1000 m`  | `"1.3 km"`     |
//!
//! [`parse_distance`] reads these labels back; route totals are summed from
//! the parsed labels so they agree with what each leg displays.

/// Format metres as a kiosk label.  Values that round to 1000 m or more
/// switch to kilometres, so no label reads `"1000 m"`.
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{} m", rounded as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Metres represented by a label produced by [`format_distance`].
pub fn parse_distance(label: &str) -> Option<f64> {
    let label = label.trim();
    if let Some(km) = label.strip_suffix("km") {
        return km.trim().parse::<f64>().ok().map(|v| v * 1000.0);
    }
    label.strip_suffix('m')?.trim().parse::<f64>().ok()
}
