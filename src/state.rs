use std::time::Duration;

use chrono::TimeDelta;
use dashmap::DashMap;
use uuid::Uuid;

use crate::config::{AdminCredentials, Config, DEFAULT_SESSION_TTL_SECS};
use crate::error::AppError;
use crate::models::session::Session;
use crate::observability::metrics::Metrics;
use crate::remote::{RemoteClient, RemoteEndpoints};

pub struct AppState {
    pub remote: RemoteClient,
    pub sessions: DashMap<Uuid, Session>,
    pub session_ttl: TimeDelta,
    pub admin: AdminCredentials,
    pub static_dir: String,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        endpoints: RemoteEndpoints,
        upstream_timeout: Option<Duration>,
        admin: AdminCredentials,
        static_dir: impl Into<String>,
    ) -> Result<Self, AppError> {
        let metrics = Metrics::new();
        let remote = RemoteClient::new(endpoints, upstream_timeout, metrics.clone())?;

        Ok(Self {
            remote,
            sessions: DashMap::new(),
            session_ttl: TimeDelta::seconds(DEFAULT_SESSION_TTL_SECS),
            admin,
            static_dir: static_dir.into(),
            metrics,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(
            config.endpoints.clone(),
            config.upstream_timeout,
            config.admin.clone(),
            config.static_dir.clone(),
        )?
        .with_session_ttl(config.session_ttl))
    }

    pub fn with_session_ttl(mut self, ttl: TimeDelta) -> Self {
        self.session_ttl = ttl;
        self
    }
}
