//! In-memory registry store
//!
//! Mirrors the key layout of the remote data service: every record is kept as
//! a JSON document under its own key.

use crate::store::{InstanceReader, InstanceWriter};
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use e2t_api::E2TInstance;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

const E2T_ADDRESSES_KEY: &str = "E2TAddresses";

fn instance_key(address: &str) -> String {
    format!("E2TInstance:{}", address)
}

/// InMemoryStore keeps registry records in a process-local key/value map
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<T> {
        let entries = self.entries.read().await;
        let raw = entries
            .get(key)
            .ok_or_else(|| StoreError::ResourceNotFound(key.to_string()))?;
        serde_json::from_str(raw)
            .map_err(|e| StoreError::Internal(format!("failed to decode {}: {}", key, e)))
    }

    async fn set<T: Serialize + ?Sized>(&self, key: String, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StoreError::Internal(format!("failed to encode {}: {}", key, e)))?;
        self.entries.write().await.insert(key, raw);
        Ok(())
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InstanceReader for InMemoryStore {
    async fn get_e2t_instance(&self, address: &str) -> StoreResult<E2TInstance> {
        self.get(&instance_key(address)).await
    }

    async fn get_e2t_instances(&self, addresses: &[String]) -> StoreResult<Vec<E2TInstance>> {
        let mut instances = Vec::with_capacity(addresses.len());
        for address in addresses {
            match self.get::<E2TInstance>(&instance_key(address)).await {
                Ok(instance) => instances.push(instance),
                Err(StoreError::ResourceNotFound(_)) => {
                    debug!("No E2T instance record for address {}", address);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(instances)
    }

    async fn get_e2t_addresses(&self) -> StoreResult<Vec<String>> {
        self.get(E2T_ADDRESSES_KEY).await
    }
}

#[async_trait]
impl InstanceWriter for InMemoryStore {
    async fn save_e2t_instance(&self, instance: &E2TInstance) -> StoreResult<()> {
        self.set(instance_key(&instance.address), instance).await
    }

    async fn save_e2t_addresses(&self, addresses: &[String]) -> StoreResult<()> {
        self.set(E2T_ADDRESSES_KEY.to_string(), addresses).await
    }
}
