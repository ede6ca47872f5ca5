// Monitored interfaces and bandwidth direction

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which bandwidth column is averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Telemetry column holding readings for this direction.
    pub fn column(self) -> &'static str {
        match self {
            Direction::In => "inbw",
            Direction::Out => "outbw",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(format!("bw_direction must be \"in\" or \"out\", got {:?}", other)),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => f.write_str("in"),
            Direction::Out => f.write_str("out"),
        }
    }
}

/// A configured (table, interface) pair, before capacity is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSpec {
    /// Telemetry table (one per device / interface group).
    pub table: String,
    /// Value of the `interface` column identifying the port.
    pub interface: String,
}

/// An interface with its resolved max bandwidth. `None` means the capacity
/// could not be determined and every cell for it reports no data.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceTarget {
    pub table: String,
    pub interface: String,
    pub max_bw: Option<f64>,
}

impl InterfaceTarget {
    pub fn new(spec: &InterfaceSpec, max_bw: Option<f64>) -> Self {
        Self {
            table: spec.table.clone(),
            interface: spec.interface.clone(),
            max_bw,
        }
    }
}
