// Report builder: dates × interfaces, one query per cell, sequential.
// Query failures degrade to "None" cells, so a report always covers the full range.

pub mod max_bandwidth;
pub mod normalize;
pub mod writer;

use crate::config::ReportConfig;
use crate::dates::{self, DATE_FORMAT};
use crate::db::Database;
use crate::models::{Cell, Direction, InterfaceTarget, Report, ReportRow};
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, instrument, warn};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Build the whole report. Never fails: missing data shows up as `None` cells.
#[instrument(skip_all, fields(operation = "build_report"))]
pub async fn build_report(config: &ReportConfig, db: &Database) -> Report {
    let range = config.time_range();
    let dates = dates::date_range(range.start, range.end, range.skip_weekend);
    if dates.is_empty() {
        warn!(
            start = %range.start,
            end = %range.end,
            skip_weekend = range.skip_weekend,
            "date range is empty; report will have no rows"
        );
    }

    let targets = max_bandwidth::resolve_targets(
        config.interfaces(),
        config.max_bandwidth_source(),
        db,
    )
    .await;
    let direction = config.direction();
    let window = config.window();
    info!(
        direction = %direction,
        interfaces = targets.len(),
        days = dates.len(),
        "building report"
    );

    let mut rows = Vec::with_capacity(dates.len());
    for date in &dates {
        info!(date = %date, "calculating data");
        let mut cells = Vec::with_capacity(targets.len());
        for target in &targets {
            debug!(
                table = %target.table,
                interface = %target.interface,
                max_bw = ?target.max_bw,
                "querying interface"
            );
            cells.push(daily_cell(db, target, direction, *date, window).await);
        }
        let missing = cells.iter().filter(|c| c.is_no_data()).count();
        if missing > 0 {
            warn!(date = %date, missing, "no data for some interfaces");
        }
        rows.push(ReportRow { date: *date, cells });
    }

    // An empty sequence still needs a file name: fall back to the configured bounds.
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => (range.start, range.end),
    };
    Report { first, last, rows }
}

/// Normalized average for one interface on one date.
pub async fn daily_cell(
    db: &Database,
    target: &InterfaceTarget,
    direction: Direction,
    date: NaiveDate,
    (window_start, window_end): (NaiveTime, NaiveTime),
) -> Cell {
    if target.max_bw.is_none() {
        return Cell::NO_DATA;
    }
    let sql = normalize::average_sql(&target.table, direction);
    let from = window_bound(date, window_start);
    let to = window_bound(date, window_end);
    let avg = db
        .query_scalar(&sql, &[target.interface.as_str(), from.as_str(), to.as_str()])
        .await;
    normalize::normalize(avg, target.max_bw)
}

/// `YYYY-MM-DD HH:MM:SS`, comparable against DATETIME columns and ISO text.
fn window_bound(date: NaiveDate, time: NaiveTime) -> String {
    format!("{} {}", date.format(DATE_FORMAT), time.format(TIME_FORMAT))
}
