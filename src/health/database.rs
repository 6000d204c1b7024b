//! PostgreSQL liveness probe.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tokio::time::timeout;

use super::{DatastoreProbe, ProbeError};
use crate::config::DatabaseConfig;

/// Opens one connection, runs `SELECT 1` and closes it again.
///
/// Nothing is pooled, so a refused or unreachable database fails the probe
/// straight away with the driver's own error. The connection is dropped if
/// the probe future is cancelled.
#[derive(Debug, Clone)]
pub struct PostgresProbe {
    options: PgConnectOptions,
    timeout: Duration,
}

impl PostgresProbe {
    /// Parses the configured URL up front so a malformed URL fails at startup.
    pub fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        Ok(Self {
            options: PgConnectOptions::from_str(&config.url)?,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    async fn select_one(&self) -> Result<i32, sqlx::Error> {
        let mut conn = PgConnection::connect_with(&self.options).await?;
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(one)
    }
}

#[async_trait]
impl DatastoreProbe for PostgresProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        let one = timeout(self.timeout, self.select_one())
            .await
            .map_err(|_| {
                ProbeError::Timeout(format!(
                    "database did not answer SELECT 1 within {}s",
                    self.timeout.as_secs()
                ))
            })??;

        if one != 1 {
            return Err(ProbeError::Protocol(format!(
                "SELECT 1 returned {}",
                one
            )));
        }
        Ok(())
    }
}

impl From<sqlx::Error> for ProbeError {
    fn from(err: sqlx::Error) -> Self {
        let message = err.to_string();
        match err {
            sqlx::Error::PoolTimedOut => ProbeError::Timeout(message),
            sqlx::Error::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
                ProbeError::Timeout(message)
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => ProbeError::Connection(message),
            _ => ProbeError::Protocol(message),
        }
    }
}
