//! Database connection setup and query execution
//!
//! Two connection types are configured the same way: a JDBC-style driver
//! (identified by its driver class) and a Postgres-compatible service on the
//! native wire protocol. Only the latter is connected to natively; the JDBC
//! kind still gets URL rendering and password resolution so the config can be
//! handed to external tooling.

use crate::error::{FyqError, Result};
use postgres::{Client, NoTls};
use serde::Deserialize;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// Environment variable consulted when the config carries no password and no
/// explicit variable name. The value is hex-obscured.
pub const DEFAULT_PASSWORD_ENV: &str = "FYQ_DB_PASSWORD";

fn default_scheme() -> String {
    "postgresql".to_string()
}

fn default_port() -> u16 {
    5432
}

/// Connection protocol family, branched on the driver class identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverKind {
    /// A JDBC driver class, e.g. "org.postgresql.Driver"
    Jdbc(String),
    /// Native Postgres wire protocol
    Postgres,
}

/// Database connection configuration, loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Option<String>,
    /// Driver class identifier; absent means native Postgres wire
    pub driver: Option<String>,
    pub user: String,
    pub password: Option<String>,
    /// Name of the hex-obscured environment variable holding the password
    pub password_env: Option<String>,
}

impl DbConfig {
    /// Load a connection config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Classify the configured driver
    ///
    /// Anything that looks like a Java driver class (mentions "jdbc" or is a
    /// dotted class path) is JDBC-style; everything else, including no driver
    /// at all, is the Postgres wire.
    pub fn driver_kind(&self) -> DriverKind {
        match &self.driver {
            Some(driver) if driver.to_lowercase().contains("jdbc") || driver.contains('.') => {
                DriverKind::Jdbc(driver.clone())
            }
            _ => DriverKind::Postgres,
        }
    }

    /// Render the connection URL for this config
    pub fn url(&self) -> String {
        let database = self
            .database
            .as_deref()
            .map(|db| format!("/{}", db))
            .unwrap_or_default();
        match self.driver_kind() {
            DriverKind::Jdbc(_) => {
                format!("jdbc:{}://{}:{}{}", self.scheme, self.host, self.port, database)
            }
            DriverKind::Postgres => format!(
                "postgresql://{}@{}:{}{}",
                self.user, self.host, self.port, database
            ),
        }
    }

    /// Resolve the password: config value, obscured environment variable,
    /// interactive prompt, in that priority order
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        let var = self.password_env.as_deref().unwrap_or(DEFAULT_PASSWORD_ENV);
        if let Ok(obscured) = std::env::var(var) {
            let bytes = hex::decode(obscured.trim())
                .map_err(|e| FyqError::Config(format!("{} is not valid hex: {}", var, e)))?;
            return String::from_utf8(bytes)
                .map_err(|_| FyqError::Config(format!("{} does not decode to UTF-8", var)));
        }

        prompt_password(&self.user, &self.host)
    }

    /// Open a connection for the Postgres kind; fail with the rendered URL
    /// for JDBC-style drivers
    pub fn connect(&self) -> Result<DbClient> {
        match self.driver_kind() {
            DriverKind::Jdbc(class) => Err(FyqError::UnsupportedDriver(format!(
                "{} ({})",
                class,
                self.url()
            ))),
            DriverKind::Postgres => {
                let password = self.resolve_password()?;
                let mut config = postgres::Config::new();
                config
                    .host(&self.host)
                    .port(self.port)
                    .user(&self.user)
                    .password(password);
                if let Some(database) = &self.database {
                    config.dbname(database);
                }
                let client = config.connect(NoTls)?;
                Ok(DbClient { client })
            }
        }
    }
}

fn prompt_password(user: &str, host: &str) -> Result<String> {
    eprint!("Password for {}@{}: ", user, host);
    std::io::stderr().flush()?;

    let mut line = String::new();
    let bytes = std::io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Err(FyqError::Config(format!(
            "No password available for {}@{}",
            user, host
        )));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// A uniform in-memory result table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Execution seam for named queries; implemented by the live connection and
/// by test doubles
pub trait QueryRunner {
    fn run(&mut self, sql: &str) -> Result<Table>;
}

/// An open Postgres connection
pub struct DbClient {
    client: Client,
}

impl std::fmt::Debug for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbClient").finish_non_exhaustive()
    }
}

impl QueryRunner for DbClient {
    fn run(&mut self, sql: &str) -> Result<Table> {
        // Prepare first so column names are known even for empty results
        let statement = self.client.prepare(sql)?;
        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut table = Table::new(columns);
        for row in self.client.query(&statement, &[])? {
            let mut rendered = Vec::with_capacity(row.len());
            for index in 0..row.len() {
                rendered.push(render_value(&row, index)?);
            }
            table.push_row(rendered);
        }
        Ok(table)
    }
}

/// Render one cell as text; NULL and unsupported types render blank
fn render_value(row: &postgres::Row, index: usize) -> Result<String> {
    fn text<T: std::fmt::Display>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    let rendered = match row.columns()[index].type_().name() {
        "int2" => text(row.try_get::<_, Option<i16>>(index)?),
        "int4" => text(row.try_get::<_, Option<i32>>(index)?),
        "int8" => text(row.try_get::<_, Option<i64>>(index)?),
        "float4" => text(row.try_get::<_, Option<f32>>(index)?),
        "float8" => text(row.try_get::<_, Option<f64>>(index)?),
        "bool" => text(row.try_get::<_, Option<bool>>(index)?),
        "date" => text(row.try_get::<_, Option<chrono::NaiveDate>>(index)?),
        "timestamp" => text(row.try_get::<_, Option<chrono::NaiveDateTime>>(index)?),
        "timestamptz" => text(row.try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(index)?),
        "text" | "varchar" | "bpchar" | "name" => text(row.try_get::<_, Option<String>>(index)?),
        _ => row
            .try_get::<_, Option<String>>(index)
            .ok()
            .flatten()
            .unwrap_or_default(),
    };
    Ok(rendered)
}
