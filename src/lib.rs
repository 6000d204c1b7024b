//! Infobus web service.
//!
//! Serves the index page, a hot-reload demo endpoint and a `/health/`
//! endpoint that reports whether the PostgreSQL database and the Redis
//! task-queue broker are reachable.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;
