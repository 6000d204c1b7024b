//! Redis liveness probe for the task-queue broker.

use std::time::Duration;

use async_trait::async_trait;
use redis::RedisError;
use tokio::time::timeout;

use super::{KeyValueProbe, ProbeError};
use crate::config::BrokerConfig;

/// Connects to the configured broker URL and sends `PING`.
///
/// A fresh client is built on every probe so the result always reflects the
/// URL currently held in configuration and no connection outlives the check.
#[derive(Debug, Clone)]
pub struct RedisProbe {
    url: String,
    timeout: Duration,
}

impl RedisProbe {
    pub fn new(config: &BrokerConfig) -> Self {
        Self {
            url: config.url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    async fn ping(&self) -> Result<String, RedisError> {
        let client = redis::Client::open(self.url.as_str())?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async(&mut conn).await
    }
}

#[async_trait]
impl KeyValueProbe for RedisProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        let reply = timeout(self.timeout, self.ping()).await.map_err(|_| {
            ProbeError::Timeout(format!(
                "Redis did not answer PING within {}s",
                self.timeout.as_secs()
            ))
        })??;

        if reply != "PONG" {
            return Err(ProbeError::Protocol(format!(
                "unexpected PING reply: {}",
                reply
            )));
        }
        Ok(())
    }
}

impl From<RedisError> for ProbeError {
    fn from(err: RedisError) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            ProbeError::Timeout(message)
        } else if err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_io_error()
        {
            ProbeError::Connection(message)
        } else {
            ProbeError::Protocol(message)
        }
    }
}
