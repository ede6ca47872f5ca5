// Per-interface capacity: fixed from config, or looked up live in a table
// with columns (dev, interface, bw).

use crate::db::Database;
use crate::models::{InterfaceSpec, InterfaceTarget};
use tracing::{instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum MaxBandwidthSource {
    /// One capacity per configured interface, same order.
    Fixed(Vec<f64>),
    /// `SELECT bw FROM {table} WHERE dev = <table> AND interface = <interface>`
    Lookup { table: String },
}

impl Default for MaxBandwidthSource {
    fn default() -> Self {
        MaxBandwidthSource::Fixed(Vec::new())
    }
}

pub fn lookup_sql(table: &str) -> String {
    format!(
        "SELECT CAST(bw AS DOUBLE) FROM {} WHERE dev = ? AND interface = ?",
        table
    )
}

/// Attach a capacity to every interface, preserving order. Lookups share one
/// connection; an interface whose capacity is missing, non-positive or failed
/// to load gets `None`.
#[instrument(skip_all, fields(operation = "resolve_max_bandwidth", interfaces = specs.len()))]
pub async fn resolve_targets(
    specs: &[InterfaceSpec],
    source: &MaxBandwidthSource,
    db: &Database,
) -> Vec<InterfaceTarget> {
    let table = match source {
        MaxBandwidthSource::Fixed(values) => {
            return specs
                .iter()
                .enumerate()
                .map(|(i, spec)| InterfaceTarget::new(spec, values.get(i).copied()))
                .collect();
        }
        MaxBandwidthSource::Lookup { table } => table,
    };

    let Ok(mut session) = db.connect().await else {
        warn!("max bandwidth lookup unavailable; all interfaces will report no data");
        return specs
            .iter()
            .map(|spec| InterfaceTarget::new(spec, None))
            .collect();
    };

    let sql = lookup_sql(table);
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        let bw = match session
            .fetch_scalar(&sql, &[spec.table.as_str(), spec.interface.as_str()])
            .await
        {
            Ok(Some(bw)) if bw > 0.0 => Some(bw),
            Ok(Some(bw)) => {
                warn!(
                    table = %spec.table,
                    interface = %spec.interface,
                    bw,
                    "non-positive max bandwidth ignored"
                );
                None
            }
            Ok(None) => {
                warn!(
                    table = %spec.table,
                    interface = %spec.interface,
                    "no max bandwidth recorded"
                );
                None
            }
            Err(e) => {
                warn!(
                    table = %spec.table,
                    interface = %spec.interface,
                    error = %e,
                    "max bandwidth lookup failed"
                );
                None
            }
        };
        out.push(InterfaceTarget::new(spec, bw));
    }
    session.close().await;
    out
}
