//! Dependency health aggregation.
//!
//! Probes the relational datastore and then the key-value store, and folds
//! both results into a single [`HealthReport`]. Only the datastore decides
//! overall health: a failed key-value probe is reported as `redis: error`
//! while `status` stays `healthy`. When the datastore probe fails the
//! key-value store is never contacted.
//!
//! Probes sit behind the [`DatastoreProbe`] and [`KeyValueProbe`] traits so
//! the aggregator can be exercised without live backends.

mod broker;
mod database;

pub use broker::RedisProbe;
pub use database::PostgresProbe;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;

/// Classification of a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// The backend could not be reached or dropped the connection
    Connection,
    /// The backend did not answer within the client timeout
    Timeout,
    /// The backend answered, but with an error or an unexpected reply
    Protocol,
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeErrorKind::Connection => "connection",
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::Protocol => "protocol",
        })
    }
}

/// A failed liveness probe. Displays as the underlying client message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Protocol(String),
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Connection(_) => ProbeErrorKind::Connection,
            ProbeError::Timeout(_) => ProbeErrorKind::Timeout,
            ProbeError::Protocol(_) => ProbeErrorKind::Protocol,
        }
    }
}

/// Liveness check against the relational datastore.
#[async_trait]
pub trait DatastoreProbe: Send + Sync {
    async fn probe(&self) -> Result<(), ProbeError>;
}

/// Liveness check against the key-value store.
#[async_trait]
pub trait KeyValueProbe: Send + Sync {
    async fn probe(&self) -> Result<(), ProbeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Error,
}

/// Composite health of this instance, built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    fn healthy(redis: ComponentStatus) -> Self {
        Self {
            status: HealthStatus::Healthy,
            database: Some(ComponentStatus::Ok),
            redis: Some(redis),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            database: None,
            redis: None,
            error: Some(error),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    /// HTTP status code the report is served with.
    pub fn status_code(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Runs the datastore and key-value probes and builds a [`HealthReport`].
///
/// Cloning is cheap; probes are shared behind `Arc`.
#[derive(Clone)]
pub struct HealthAggregator {
    datastore: Arc<dyn DatastoreProbe>,
    key_value: Arc<dyn KeyValueProbe>,
    expose_errors: bool,
}

impl HealthAggregator {
    pub fn new(
        datastore: Arc<dyn DatastoreProbe>,
        key_value: Arc<dyn KeyValueProbe>,
        expose_errors: bool,
    ) -> Self {
        Self {
            datastore,
            key_value,
            expose_errors,
        }
    }

    /// Probe both backends in order and report the combined result.
    pub async fn check(&self) -> HealthReport {
        if let Err(e) = self.datastore.probe().await {
            tracing::error!(error = %e, kind = %e.kind(), "Database health probe failed");
            return HealthReport::unhealthy(self.error_message(&e));
        }

        let redis = match self.key_value.probe().await {
            Ok(()) => ComponentStatus::Ok,
            Err(e) => {
                tracing::warn!(error = %e, kind = %e.kind(), "Redis health probe failed");
                ComponentStatus::Error
            }
        };

        tracing::debug!(redis = ?redis, "Health check passed");
        HealthReport::healthy(redis)
    }

    fn error_message(&self, error: &ProbeError) -> String {
        if self.expose_errors {
            return error.to_string();
        }
        match error.kind() {
            ProbeErrorKind::Connection => "database connection failed",
            ProbeErrorKind::Timeout => "database timed out",
            ProbeErrorKind::Protocol => "database query failed",
        }
        .to_string()
    }
}
