//! Boundary with the persisted registry
//!
//! The manager reads and writes E2T records only through these traits, so any
//! key/value data service (or an in-memory fake) can sit behind it.

use crate::StoreResult;
use async_trait::async_trait;
use e2t_api::E2TInstance;

#[async_trait]
pub trait InstanceReader: Send + Sync {
    /// Get the instance stored under `address`
    async fn get_e2t_instance(&self, address: &str) -> StoreResult<E2TInstance>;

    /// Get every instance that exists for `addresses`, in request order.
    /// Addresses without a record are skipped.
    async fn get_e2t_instances(&self, addresses: &[String]) -> StoreResult<Vec<E2TInstance>>;

    /// Get the ordered list of all known instance addresses
    async fn get_e2t_addresses(&self) -> StoreResult<Vec<String>>;
}

#[async_trait]
pub trait InstanceWriter: Send + Sync {
    /// Create or overwrite the record keyed by `instance.address`
    async fn save_e2t_instance(&self, instance: &E2TInstance) -> StoreResult<()>;

    /// Replace the address list
    async fn save_e2t_addresses(&self, addresses: &[String]) -> StoreResult<()>;
}

/// Full read/write access to the registry
pub trait RegistryStore: InstanceReader + InstanceWriter {}

impl<T: InstanceReader + InstanceWriter + ?Sized> RegistryStore for T {}
