// Report rows: one per date, one cell per configured interface

use chrono::NaiveDate;
use std::fmt;

/// Normalized utilization for one (date, interface), or no data.
/// Displays as the value in shortest form (`0.25`, `1.0`) or the literal `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell(Option<f64>);

impl Cell {
    pub const NO_DATA: Cell = Cell(None);

    pub fn value(v: f64) -> Self {
        Cell(Some(v))
    }

    pub fn is_no_data(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            // Debug keeps the trailing ".0" on integral values.
            Some(v) => write!(f, "{:?}", v),
            None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub cells: Vec<Cell>,
}

impl ReportRow {
    /// Date followed by one field per cell, in interface order.
    pub fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(1 + self.cells.len());
        out.push(self.date.to_string());
        out.extend(self.cells.iter().map(Cell::to_string));
        out
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(","))
    }
}

/// All rows for an inclusive date span.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// `{first}to{last}.csv`
    pub fn file_name(&self) -> String {
        format!("{}to{}.csv", self.first, self.last)
    }
}
