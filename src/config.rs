use std::env;
use std::time::Duration;

use chrono::TimeDelta;

use crate::error::AppError;
use crate::remote::RemoteEndpoints;

pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub static_dir: String,
    pub endpoints: RemoteEndpoints,
    pub upstream_timeout: Option<Duration>,
    pub admin: AdminCredentials,
    pub session_ttl: TimeDelta,
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: "admin@beribox.ru".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let defaults = RemoteEndpoints::default();
        let upstream_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|err| {
                AppError::Internal(format!("invalid UPSTREAM_TIMEOUT_SECS: {err}"))
            })?)),
            Err(_) => None,
        };

        let session_ttl_secs: i64 = parse_or_default("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        let session_ttl = TimeDelta::try_seconds(session_ttl_secs)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| {
                AppError::Internal(format!("invalid SESSION_TTL_SECS: {session_ttl_secs}"))
            })?;

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            endpoints: RemoteEndpoints {
                pickup_points: string_or("PICKUP_POINTS_URL", defaults.pickup_points),
                orders: string_or("ORDERS_URL", defaults.orders),
                settings: string_or("SETTINGS_URL", defaults.settings),
                qr: string_or("QR_URL", defaults.qr),
                auth: string_or("AUTH_URL", defaults.auth),
            },
            upstream_timeout,
            admin: AdminCredentials {
                email: string_or("ADMIN_EMAIL", AdminCredentials::default().email),
                password: string_or("ADMIN_PASSWORD", AdminCredentials::default().password),
            },
            session_ttl,
        })
    }
}

fn string_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
