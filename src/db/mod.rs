// Telemetry database access. One connection per query, no pooling:
// connect, run one statement, close. Failures never abort the caller; they are
// logged here and surface as "no data".

mod error;

pub use error::DbError;

use crate::config::{DbInfo, Driver};
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub struct Database {
    info: DbInfo,
    connect_timeout: Duration,
}

enum Conn {
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

/// An open connection. Release it with [`DbSession::close`]; dropping the
/// session also closes the underlying socket or file handle.
pub struct DbSession {
    conn: Conn,
}

impl Database {
    pub fn new(info: DbInfo) -> Self {
        let connect_timeout = Duration::from_secs(info.connect_timeout_secs);
        Self {
            info,
            connect_timeout,
        }
    }

    /// Open one connection within the connect timeout. Failures are classified
    /// and logged before being returned.
    #[instrument(skip(self), fields(db = %self.info.database, operation = "connect"))]
    pub async fn connect(&self) -> Result<DbSession, DbError> {
        let result = match tokio::time::timeout(self.connect_timeout, self.open()).await {
            Ok(Ok(conn)) => Ok(DbSession { conn }),
            Ok(Err(e)) => Err(DbError::from_connect(e, &self.info)),
            Err(_elapsed) => Err(DbError::timed_out(&self.info)),
        };
        if let Err(e) = &result {
            log_connect_error(e);
        }
        result
    }

    async fn open(&self) -> Result<Conn, sqlx::Error> {
        match self.info.driver {
            Driver::MySql => {
                let opts = MySqlConnectOptions::new()
                    .host(&self.info.host)
                    .port(self.info.port)
                    .username(&self.info.user)
                    .password(&self.info.password)
                    .database(&self.info.database);
                Ok(Conn::MySql(opts.connect().await?))
            }
            Driver::Sqlite => {
                let opts = SqliteConnectOptions::new()
                    .filename(&self.info.database)
                    .create_if_missing(false)
                    .read_only(true);
                Ok(Conn::Sqlite(opts.connect().await?))
            }
        }
    }

    /// Acquire, run `sql` with string `args`, release. Returns the first
    /// column of the first row; any connect or query failure yields `None`.
    pub async fn query_scalar(&self, sql: &str, args: &[&str]) -> Option<f64> {
        let mut session = self.connect().await.ok()?;
        let result = session.fetch_scalar(sql, args).await;
        session.close().await;
        match result {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, sql, "query failed; treating as no data");
                None
            }
        }
    }
}

impl DbSession {
    /// First column of every row, decoded as a nullable float.
    pub async fn fetch_column(
        &mut self,
        sql: &str,
        args: &[&str],
    ) -> Result<Vec<Option<f64>>, DbError> {
        let rows = match &mut self.conn {
            Conn::MySql(c) => {
                let mut q = sqlx::query_scalar::<MySql, Option<f64>>(sql);
                for a in args {
                    q = q.bind(*a);
                }
                q.fetch_all(&mut *c).await
            }
            Conn::Sqlite(c) => {
                let mut q = sqlx::query_scalar::<Sqlite, Option<f64>>(sql);
                for a in args {
                    q = q.bind(*a);
                }
                q.fetch_all(&mut *c).await
            }
        };
        rows.map_err(|source| DbError::Query { source })
    }

    /// First row's value; `None` for no rows or SQL NULL.
    pub async fn fetch_scalar(
        &mut self,
        sql: &str,
        args: &[&str],
    ) -> Result<Option<f64>, DbError> {
        let rows = self.fetch_column(sql, args).await?;
        Ok(rows.into_iter().next().flatten())
    }

    pub async fn close(self) {
        let result = match self.conn {
            Conn::MySql(c) => c.close().await,
            Conn::Sqlite(c) => c.close().await,
        };
        if let Err(e) = result {
            debug!(error = %e, "closing connection failed");
        }
    }
}

fn log_connect_error(e: &DbError) {
    match e {
        DbError::AccessDenied { user } => {
            warn!(user = %user, "DB connect error: wrong username or password")
        }
        DbError::UnknownDatabase { database } => {
            warn!(database = %database, "DB connect error: database does not exist")
        }
        DbError::HostUnreachable { host, .. } => {
            warn!(host = %host, "DB connect error: can't connect to server on host")
        }
        other => warn!(error = %other, "DB connect error"),
    }
}
