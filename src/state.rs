//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::AppConfig;
use crate::health::HealthAggregator;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub health: HealthAggregator,
}

impl AppState {
    pub fn new(config: AppConfig, tera: Tera, health: HealthAggregator) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            health,
        }
    }
}
