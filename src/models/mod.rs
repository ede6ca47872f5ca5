// Domain models: interface targets and report rows

mod interface;
mod report;

pub use interface::{Direction, InterfaceSpec, InterfaceTarget};
pub use report::{Cell, Report, ReportRow};
