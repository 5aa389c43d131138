//! Core E2T registry functionality
//!
//! This library provides:
//! - Store boundary traits for E2T instance records and the address list
//! - A retrying data service and an in-memory store behind that boundary
//! - The E2T instances manager and its least-loaded selection policy

pub mod config;
pub mod data_service;
pub mod error;
pub mod manager;
pub mod memory;
pub mod selection;
pub mod store;

pub use config::Configuration;
pub use data_service::{RetryConfig, RnibDataService};
pub use error::{CoreError, Result, StoreError, StoreResult};
pub use manager::E2TInstancesManager;
pub use memory::InMemoryStore;
pub use store::{InstanceReader, InstanceWriter, RegistryStore};
