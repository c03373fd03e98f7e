pub mod client;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::RemoteClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEndpoints {
    pub pickup_points: String,
    pub orders: String,
    pub settings: String,
    pub qr: String,
    pub auth: String,
}

impl Default for RemoteEndpoints {
    fn default() -> Self {
        Self {
            pickup_points: "http://127.0.0.1:9000/pickup-points".to_string(),
            orders: "http://127.0.0.1:9000/orders".to_string(),
            settings: "http://127.0.0.1:9000/settings".to_string(),
            qr: "http://127.0.0.1:9000/qr".to_string(),
            auth: "http://127.0.0.1:9000/auth".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{resource} request failed: {source}")]
    Network {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{resource} responded with {status}: {message}")]
    Status {
        resource: &'static str,
        status: u16,
        message: String,
    },

    #[error("{resource} returned an unreadable body: {reason}")]
    Decode {
        resource: &'static str,
        reason: String,
    },
}

impl RemoteError {
    pub fn resource(&self) -> &'static str {
        match self {
            RemoteError::Network { resource, .. }
            | RemoteError::Status { resource, .. }
            | RemoteError::Decode { resource, .. } => resource,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Status { message, .. } if !message.is_empty() => message.clone(),
            RemoteError::Network { .. } => "network error, please try again".to_string(),
            _ => "the service returned an unexpected response".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCode {
    pub qr_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}
