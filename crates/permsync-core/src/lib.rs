//! permsync core library
//!
//! Shared functionality for migrating Frontegg permission definitions
//! between vendor environments:
//! - Settings loading (base URL + per-environment vendor credentials)
//! - Frontegg identity REST client (vendor auth, categories, permissions)
//! - Category re-keying across environments
//! - The plan/apply migration pipeline

pub mod client;
pub mod config;
pub mod error;
pub mod mapping;
pub mod migrate;
pub mod types;

pub use client::FronteggClient;
pub use config::Settings;
pub use error::{Error, Result};
pub use migrate::MigrationPlan;
