use anyhow::Result;
use bwreport::config::ReportConfig;
use bwreport::db::Database;
use bwreport::{report, version};
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

// Single-threaded: one query at a time, in date × interface order.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();
    tracing::info!("{}", version::banner());

    let dir = std::env::current_dir()?;
    let app_config = ReportConfig::load(&dir)?;
    let db = Database::new(app_config.db_info().clone());

    let report = report::build_report(&app_config, &db).await;
    let path = report::writer::write_csv(&report, &dir)?;

    wait_for_ack(&path)?;
    Ok(())
}

/// Print where the report went and, when stdin is a terminal, block until Enter.
fn wait_for_ack(path: &Path) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let msg = report::writer::closing_message(path, interactive);
    if !interactive {
        println!("{}", msg);
        return Ok(());
    }
    print!("{}", msg);
    std::io::stdout().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(())
}
