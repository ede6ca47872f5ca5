// Connection and query failures, classified so each is logged distinctly.

use crate::config::DbInfo;
use sqlx::mysql::MySqlDatabaseError;

/// MySQL server error numbers we classify.
const ER_ACCESS_DENIED_ERROR: u16 = 1045;
const ER_BAD_DB_ERROR: u16 = 1049;
/// SQLite primary result code for "unable to open database file".
const SQLITE_CANTOPEN: &str = "14";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("wrong username or password for user {user:?}")]
    AccessDenied { user: String },
    #[error("database {database:?} does not exist")]
    UnknownDatabase { database: String },
    #[error("can't connect to database server on {host}")]
    HostUnreachable {
        host: String,
        #[source]
        source: Option<sqlx::Error>,
    },
    #[error("query failed: {source}")]
    Query {
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Other(sqlx::Error),
}

impl DbError {
    /// Classify a failure to open a connection.
    pub fn from_connect(err: sqlx::Error, info: &DbInfo) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(mysql) = db_err.try_downcast_ref::<MySqlDatabaseError>() {
                match mysql.number() {
                    ER_ACCESS_DENIED_ERROR => {
                        return DbError::AccessDenied {
                            user: info.user.clone(),
                        };
                    }
                    ER_BAD_DB_ERROR => {
                        return DbError::UnknownDatabase {
                            database: info.database.clone(),
                        };
                    }
                    _ => {}
                }
            } else if db_err.code().as_deref() == Some(SQLITE_CANTOPEN) {
                return DbError::UnknownDatabase {
                    database: info.database.clone(),
                };
            }
        }
        match err {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => DbError::HostUnreachable {
                host: host_label(info),
                source: Some(err),
            },
            other => DbError::Other(other),
        }
    }

    /// The connect timeout elapsed before the server answered.
    pub fn timed_out(info: &DbInfo) -> Self {
        DbError::HostUnreachable {
            host: host_label(info),
            source: None,
        }
    }
}

fn host_label(info: &DbInfo) -> String {
    format!("{}:{}", info.host, info.port)
}
