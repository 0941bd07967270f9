//! Month arithmetic for timeline dates.

use chrono::{Months, NaiveDate};

/// Shift `anchor` by a signed number of calendar months.
///
/// Day-of-month clamps to the end of shorter months (Jan 31 + 1 = Feb 29/28).
/// Dates outside chrono's range saturate to the anchor.
pub fn shift_months(anchor: NaiveDate, months: i64) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs().min(u64::from(u32::MAX)) as u32);
    let shifted = if months >= 0 {
        anchor.checked_add_months(magnitude)
    } else {
        anchor.checked_sub_months(magnitude)
    };
    shifted.unwrap_or(anchor)
}

/// Round to two decimals, as shown on charts.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal, used for year counts.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
