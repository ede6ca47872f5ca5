// Cell normalization, query text and row layout

use bwreport::models::{Cell, Direction, Report, ReportRow};
use bwreport::report::max_bandwidth::lookup_sql;
use bwreport::report::normalize::{average_sql, normalize, round_to};
use chrono::NaiveDate;

#[test]
fn normalize_divides_by_max_bandwidth() {
    assert_eq!(normalize(Some(50.0), Some(200.0)).to_string(), "0.25");
    assert_eq!(normalize(Some(25.0), Some(100.0)).to_string(), "0.25");
    assert_eq!(normalize(Some(50.0), Some(100.0)).to_string(), "0.5");
}

#[test]
fn normalize_keeps_trailing_zero_on_integral_values() {
    assert_eq!(normalize(Some(100.0), Some(100.0)).to_string(), "1.0");
    assert_eq!(normalize(Some(0.0), Some(100.0)).to_string(), "0.0");
}

#[test]
fn normalize_rounds_to_four_places() {
    assert_eq!(normalize(Some(1.0), Some(3.0)).to_string(), "0.3333");
    assert_eq!(normalize(Some(2.0), Some(3.0)).to_string(), "0.6667");
    assert_eq!(round_to(0.123_456, 4), 0.1235);
}

#[test]
fn normalize_rounds_from_exact_quotient() {
    // 439.07 / 8 is stored just below 54.88375; scaling by 10^4 first would
    // round it up to 54.8838.
    assert_eq!(normalize(Some(439.07), Some(8.0)).to_string(), "54.8837");
    assert_eq!(round_to(439.07 / 8.0, 4), 54.8837);
}

#[test]
fn normalize_without_average_is_none() {
    let cell = normalize(None, Some(100.0));
    assert!(cell.is_no_data());
    assert_eq!(cell.to_string(), "None");
}

#[test]
fn normalize_without_usable_capacity_is_none() {
    assert_eq!(normalize(Some(50.0), None), Cell::NO_DATA);
    assert_eq!(normalize(Some(50.0), Some(0.0)), Cell::NO_DATA);
}

#[test]
fn average_sql_uses_direction_column() {
    let sql = average_sql("core_sw1", Direction::In);
    assert!(sql.contains("AVG(inbw)"));
    assert!(sql.contains("FROM core_sw1"));
    assert_eq!(sql.matches('?').count(), 3);
    assert!(average_sql("core_sw1", Direction::Out).contains("AVG(outbw)"));
}

#[test]
fn lookup_sql_targets_table() {
    let sql = lookup_sql("circuit_info");
    assert!(sql.contains("FROM circuit_info"));
    assert_eq!(sql.matches('?').count(), 2);
}

#[test]
fn report_row_has_date_plus_one_field_per_interface() {
    let row = ReportRow {
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        cells: vec![Cell::value(0.25), Cell::NO_DATA, Cell::value(1.0)],
    };
    assert_eq!(row.fields().len(), 4);
    assert_eq!(row.to_string(), "2024-01-01,0.25,None,1.0");
}

#[test]
fn report_file_name_uses_span() {
    let report = Report {
        first: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        last: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        rows: vec![],
    };
    assert_eq!(report.file_name(), "2024-01-01to2024-01-03.csv");
}
