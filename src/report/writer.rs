// CSV output: one line per date, no header.

use crate::models::Report;
use anyhow::Context;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `report` to `dir/{first}to{last}.csv`, replacing any previous file.
pub fn write_csv(report: &Report, dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(report.file_name());
    let file = std::fs::File::create(&path)
        .with_context(|| format!("create report file {}", path.display()))?;
    write_rows(report, file).with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), rows = report.rows.len(), "report written");
    Ok(path)
}

/// Final line shown to the operator. Only an interactive run waits for Enter;
/// with stdin redirected the process exits right after printing.
pub fn closing_message(path: &Path, interactive: bool) -> String {
    if interactive {
        format!("Find report at {} (press Enter to exit)", path.display())
    } else {
        format!("Find report at {}", path.display())
    }
}

pub fn write_rows<W: io::Write>(report: &Report, out: W) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    for row in &report.rows {
        wtr.write_record(row.fields())?;
    }
    wtr.flush()?;
    Ok(())
}
