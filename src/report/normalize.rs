// Pure per-cell logic: daily average query text and normalization.

use crate::models::{Cell, Direction};

/// Decimal places kept in a utilization value.
pub const PRECISION: usize = 4;

/// Average of the direction column for one interface over a time window.
/// Binds: interface, window start, window end. The cast keeps MySQL from
/// returning DECIMAL.
pub fn average_sql(table: &str, direction: Direction) -> String {
    format!(
        "SELECT CAST(AVG({}) AS DOUBLE) FROM {} WHERE interface = ? AND time BETWEEN ? AND ?",
        direction.column(),
        table
    )
}

/// `avg / max_bw` rounded to [`PRECISION`] places. No average, no capacity, or
/// a non-positive capacity gives [`Cell::NO_DATA`].
pub fn normalize(avg: Option<f64>, max_bw: Option<f64>) -> Cell {
    match (avg, max_bw) {
        (Some(avg), Some(max)) if max > 0.0 && avg.is_finite() => {
            Cell::value(round_to(avg / max, PRECISION))
        }
        _ => Cell::NO_DATA,
    }
}

/// Round from the exact binary value (ties to even), not from `v * 10^places`,
/// which picks up error from the multiply.
pub fn round_to(v: f64, places: usize) -> f64 {
    format!("{:.*}", places, v).parse().unwrap_or(v)
}
