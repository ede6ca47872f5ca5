// Shared test helpers: seeded SQLite telemetry databases and config text.

#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;

/// Create (or open) a SQLite file for seeding.
pub async fn open_seed_db(path: &Path) -> SqliteConnection {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete)
        .connect()
        .await
        .expect("open seed db")
}

pub async fn create_telemetry_table(conn: &mut SqliteConnection, table: &str) {
    sqlx::query(&format!(
        "CREATE TABLE {} (interface TEXT NOT NULL, time TEXT NOT NULL, inbw REAL, outbw REAL)",
        table
    ))
    .execute(&mut *conn)
    .await
    .expect("create telemetry table");
}

pub async fn insert_reading(
    conn: &mut SqliteConnection,
    table: &str,
    interface: &str,
    time: &str,
    inbw: f64,
    outbw: f64,
) {
    sqlx::query(&format!(
        "INSERT INTO {} (interface, time, inbw, outbw) VALUES (?, ?, ?, ?)",
        table
    ))
    .bind(interface)
    .bind(time)
    .bind(inbw)
    .bind(outbw)
    .execute(&mut *conn)
    .await
    .expect("insert reading");
}

pub async fn create_circuit_info(conn: &mut SqliteConnection) {
    sqlx::query(
        "CREATE TABLE circuit_info (dev TEXT NOT NULL, interface TEXT NOT NULL, bw INTEGER)",
    )
    .execute(&mut *conn)
    .await
    .expect("create circuit_info");
}

pub async fn insert_circuit(conn: &mut SqliteConnection, dev: &str, interface: &str, bw: i64) {
    sqlx::query("INSERT INTO circuit_info (dev, interface, bw) VALUES (?, ?, ?)")
        .bind(dev)
        .bind(interface)
        .bind(bw)
        .execute(&mut *conn)
        .await
        .expect("insert circuit");
}

pub async fn close(conn: SqliteConnection) {
    conn.close().await.expect("close seed db");
}

/// INI config for a SQLite telemetry file. `sql_info` holds the body of the
/// [sql_info] section.
pub fn sqlite_config(
    db_path: &Path,
    start: &str,
    end: &str,
    skip_weekend: bool,
    sql_info: &str,
) -> String {
    format!(
        "[db_info]\n\
         driver = sqlite\n\
         database = {}\n\
         connect_timeout_secs = 2\n\
         \n\
         [time_range]\n\
         start = {}\n\
         end = {}\n\
         skip_weekend = {}\n\
         \n\
         [sql_info]\n\
         {}\n",
        db_path.display(),
        start,
        end,
        if skip_weekend { "True" } else { "False" },
        sql_info.trim()
    )
}
