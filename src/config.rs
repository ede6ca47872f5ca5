// Report configuration: INI file named `config` in the working directory.
// Sections: [db_info], [time_range], [sql_info]. Loaded once, read-only afterwards.

use crate::models::{Direction, InterfaceSpec};
use crate::report::max_bandwidth::MaxBandwidthSource;
use chrono::{NaiveDate, NaiveTime};
use config::{Config, Map, Source, Value, ValueKind};
use ini::{Ini, ParseOption};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up inside the directory passed to [`ReportConfig::load`].
pub const CONFIG_FILE_NAME: &str = "config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "can't find config file at \"{}\", config file should be in the working directory",
        .0.display()
    )]
    NotFound(PathBuf),
    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Syntax(#[from] ini::ParseError),
    #[error("parse config: {0}")]
    Parse(#[from] config::ConfigError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub db_info: DbInfo,
    pub time_range: TimeRange,
    pub sql_info: SqlInfo,
    #[serde(skip)]
    interfaces: Vec<InterfaceSpec>,
    #[serde(skip)]
    max_bandwidth: MaxBandwidthSource,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Driver {
    #[default]
    MySql,
    /// `database` is a file path; user/password/host are ignored.
    Sqlite,
}

impl TryFrom<String> for Driver {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Driver::MySql),
            "sqlite" => Ok(Driver::Sqlite),
            other => Err(format!(
                "db_info.driver must be \"mysql\" or \"sqlite\", got {:?}",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbInfo {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub host: String,
    pub database: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub driver: Driver,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_port() -> u16 {
    3306
}

fn default_connect_timeout_secs() -> u64 {
    4
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Accepts True/False, yes/no, on/off, 1/0.
    #[serde(default)]
    pub skip_weekend: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqlInfo {
    /// Comma-separated telemetry tables, one per interface.
    pub tables: String,
    /// Comma-separated interface identifiers, paired with `tables` by position.
    pub column: String,
    pub bw_direction: Direction,
    /// Comma-separated capacities. Absent or empty: look them up in `max_bw_table`.
    #[serde(default)]
    pub max_bw: Option<String>,
    #[serde(default = "default_max_bw_table")]
    pub max_bw_table: String,
    #[serde(default)]
    pub window_start: Option<NaiveTime>,
    #[serde(default)]
    pub window_end: Option<NaiveTime>,
}

fn default_max_bw_table() -> String {
    "circuit_info".into()
}

impl ReportConfig {
    /// Read `dir/config`. A missing file is reported as [`ConfigError::NotFound`].
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Err(ConfigError::NotFound(dir.to_path_buf()));
        }
        let s = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from INI text (e.g. for tests).
    pub fn load_from_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: ReportConfig = Config::builder()
            .add_source(VerbatimIni::parse(s)?)
            .build()?
            .try_deserialize()?;
        config.resolve()?;
        Ok(config)
    }

    pub fn db_info(&self) -> &DbInfo {
        &self.db_info
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    /// Configured interfaces in report column order.
    pub fn interfaces(&self) -> &[InterfaceSpec] {
        &self.interfaces
    }

    pub fn direction(&self) -> Direction {
        self.sql_info.bw_direction
    }

    pub fn max_bandwidth_source(&self) -> &MaxBandwidthSource {
        &self.max_bandwidth
    }

    /// Daily query window, 09:00:00 to 16:00:00 unless configured.
    pub fn window(&self) -> (NaiveTime, NaiveTime) {
        let start = self
            .sql_info
            .window_start
            .unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default());
        let end = self
            .sql_info
            .window_end
            .unwrap_or_else(|| NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default());
        (start, end)
    }

    fn resolve(&mut self) -> Result<(), ConfigError> {
        let tables = split_list(&self.sql_info.tables);
        let columns = split_list(&self.sql_info.column);
        ensure(
            !tables.is_empty(),
            "sql_info.tables must name at least one table",
        )?;
        ensure(
            tables.len() == columns.len(),
            format!(
                "sql_info.tables has {} entries but sql_info.column has {}",
                tables.len(),
                columns.len()
            ),
        )?;
        for t in &tables {
            ensure(
                is_sql_identifier(t),
                format!("sql_info.tables entry {:?} is not a valid table name", t),
            )?;
        }
        for c in &columns {
            ensure(
                !c.is_empty(),
                "sql_info.column must not contain empty entries",
            )?;
        }

        self.max_bandwidth = match self.sql_info.max_bw.as_deref().map(str::trim) {
            Some(list) if !list.is_empty() => {
                let values = split_list(list)
                    .into_iter()
                    .map(|v| match v.parse::<f64>() {
                        Ok(bw) if bw.is_finite() && bw > 0.0 => Ok(bw),
                        _ => Err(ConfigError::Invalid(format!(
                            "sql_info.max_bw entry {:?} must be a positive number",
                            v
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                ensure(
                    values.len() == tables.len(),
                    format!(
                        "sql_info.max_bw has {} entries but {} interfaces are configured",
                        values.len(),
                        tables.len()
                    ),
                )?;
                MaxBandwidthSource::Fixed(values)
            }
            _ => {
                ensure(
                    is_sql_identifier(&self.sql_info.max_bw_table),
                    format!(
                        "sql_info.max_bw_table {:?} is not a valid table name",
                        self.sql_info.max_bw_table
                    ),
                )?;
                MaxBandwidthSource::Lookup {
                    table: self.sql_info.max_bw_table.clone(),
                }
            }
        };

        self.interfaces = tables
            .into_iter()
            .zip(columns)
            .map(|(table, interface)| InterfaceSpec { table, interface })
            .collect();

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.db_info.database.trim().is_empty(),
            "db_info.database must be non-empty",
        )?;
        if self.db_info.driver == Driver::MySql {
            ensure(
                !self.db_info.host.trim().is_empty(),
                "db_info.host must be non-empty",
            )?;
            ensure(
                self.db_info.port > 0,
                format!(
                    "db_info.port must be between 1 and 65535, got {}",
                    self.db_info.port
                ),
            )?;
        }
        ensure(
            self.db_info.connect_timeout_secs > 0,
            format!(
                "db_info.connect_timeout_secs must be > 0, got {}",
                self.db_info.connect_timeout_secs
            ),
        )?;
        let (start, end) = self.window();
        ensure(
            start < end,
            format!(
                "sql_info.window_start ({}) must be before sql_info.window_end ({})",
                start, end
            ),
        )?;
        Ok(())
    }
}

/// INI sections with values kept exactly as written: no escape or quote
/// processing, so passwords containing `\` or `"` reach the driver unchanged.
#[derive(Debug, Clone)]
struct VerbatimIni {
    map: Map<String, Value>,
}

impl VerbatimIni {
    fn parse(s: &str) -> Result<Self, ini::ParseError> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(s, opt)?;
        let mut map = Map::new();
        for (section, props) in ini.iter() {
            let entries: Map<String, Value> = props
                .iter()
                .map(|(k, v)| {
                    let value = Value::new(None, ValueKind::String(v.to_string()));
                    (k.to_string(), value)
                })
                .collect();
            match section {
                Some(name) => {
                    map.insert(name.to_string(), Value::new(None, ValueKind::Table(entries)));
                }
                None => map.extend(entries),
            }
        }
        Ok(Self { map })
    }
}

impl Source for VerbatimIni {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
        Ok(self.map.clone())
    }
}

fn ensure(cond: bool, msg: impl Into<String>) -> Result<(), ConfigError> {
    if cond {
        Ok(())
    } else {
        Err(ConfigError::Invalid(msg.into()))
    }
}

fn split_list(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(',').map(|v| v.trim().to_string()).collect()
}

/// Table names are interpolated into SQL, so only plain identifiers
/// (optionally `schema.table`) are accepted.
fn is_sql_identifier(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('.')
        && !s.ends_with('.')
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}
