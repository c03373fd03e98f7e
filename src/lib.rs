pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod models;
pub mod observability;
pub mod pricing;
pub mod remote;
pub mod state;
