//! E2T instance manager
//!
//! Keeps the E2T registry (instance records plus the address list that indexes
//! them) and decides which instance a newly connecting RAN node is routed to.
//!
//! The manager holds no state of its own. Every operation is a read-modify-write
//! against the store, and concurrent updates to the same instance are
//! last-write-wins.

use crate::selection::select_least_loaded;
use crate::store::{InstanceReader, InstanceWriter, RegistryStore};
use crate::{CoreError, Result};
use e2t_api::E2TInstance;
use std::sync::Arc;
use tracing::{debug, error, warn};

const ADDRESS_LIST: &str = "E2T address list";

/// E2TInstancesManager owns registration, lookup, RAN association and selection of E2T instances
pub struct E2TInstancesManager {
    store: Arc<dyn RegistryStore>,
}

impl E2TInstancesManager {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// Register a new E2T instance and index its address.
    ///
    /// The instance record is written first. If the address list cannot be
    /// read or written afterwards the record stays in place unindexed.
    pub async fn add_e2t_instance(&self, address: &str) -> Result<()> {
        let instance = E2TInstance::new(address);

        if let Err(e) = self.store.save_e2t_instance(&instance).await {
            error!("Failed saving E2T instance {}: {}", address, e);
            return Err(CoreError::store("save E2T instance", address, e));
        }

        let mut addresses = match self.store.get_e2t_addresses().await {
            Ok(addresses) => addresses,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => {
                error!("Failed retrieving E2T addresses while adding {}: {}", address, e);
                return Err(CoreError::store("get E2T addresses", ADDRESS_LIST, e));
            }
        };

        if addresses.iter().any(|a| a == address) {
            debug!("E2T address {} already registered", address);
            return Ok(());
        }

        addresses.push(address.to_string());

        if let Err(e) = self.store.save_e2t_addresses(&addresses).await {
            error!("Failed saving E2T addresses while adding {}: {}", address, e);
            return Err(CoreError::store("save E2T addresses", ADDRESS_LIST, e));
        }

        debug!("Added E2T instance {}", address);
        Ok(())
    }

    /// Get the stored E2T instance for an address
    pub async fn get_e2t_instance(&self, address: &str) -> Result<E2TInstance> {
        self.store.get_e2t_instance(address).await.map_err(|e| {
            error!("Failed retrieving E2T instance {}: {}", address, e);
            CoreError::store("get E2T instance", address, e)
        })
    }

    /// Bind a RAN node to an E2T instance.
    ///
    /// The name is appended as is; associating the same RAN twice records it twice.
    pub async fn associate_ran(&self, ran_name: &str, address: &str) -> Result<()> {
        let mut instance = self.get_e2t_instance(address).await?;

        instance.associated_ran_list.push(ran_name.to_string());

        self.save_instance("associate RAN", &instance).await?;

        debug!("Associated RAN {} with E2T instance {}", ran_name, address);
        Ok(())
    }

    /// Unbind a RAN node from an E2T instance.
    ///
    /// Only the first occurrence is removed. An unknown RAN name leaves the list as is.
    pub async fn dissociate_ran(&self, ran_name: &str, address: &str) -> Result<()> {
        let mut instance = self.get_e2t_instance(address).await?;

        match instance.associated_ran_list.iter().position(|r| r == ran_name) {
            Some(index) => {
                instance.associated_ran_list.remove(index);
            }
            None => {
                debug!("RAN {} is not associated with E2T instance {}", ran_name, address);
            }
        }

        self.save_instance("dissociate RAN", &instance).await?;

        debug!("Dissociated RAN {} from E2T instance {}", ran_name, address);
        Ok(())
    }

    /// Choose the E2T instance a new RAN node should connect through.
    ///
    /// Returns the address of the least-loaded active instance, ties going to the
    /// instance the store returned first.
    pub async fn select_e2t_instance(&self) -> Result<String> {
        let addresses = match self.store.get_e2t_addresses().await {
            Ok(addresses) if !addresses.is_empty() => addresses,
            Ok(_) => {
                warn!("E2T address list is empty");
                return Err(CoreError::NoInstancesAvailable(
                    "E2T address list is empty".to_string(),
                ));
            }
            Err(e) if e.is_not_found() => {
                warn!("E2T address list not found");
                return Err(CoreError::NoInstancesAvailable(
                    "E2T address list not found".to_string(),
                ));
            }
            Err(e) => {
                error!("Failed retrieving E2T addresses for selection: {}", e);
                return Err(CoreError::store("get E2T addresses", ADDRESS_LIST, e));
            }
        };

        let instances = self.store.get_e2t_instances(&addresses).await.map_err(|e| {
            error!("Failed retrieving E2T instances for {:?}: {}", addresses, e);
            CoreError::store("get E2T instances", addresses.join(","), e)
        })?;

        if instances.is_empty() {
            warn!("No E2T instance records found for {:?}", addresses);
            return Err(CoreError::NoInstancesAvailable(format!(
                "no E2T instance records found for {}",
                addresses.join(",")
            )));
        }

        match select_least_loaded(&instances) {
            Some(instance) => {
                debug!(
                    "Selected E2T instance {} with {} associated RANs",
                    instance.address,
                    instance.load()
                );
                Ok(instance.address.clone())
            }
            None => {
                warn!("No active E2T instance among {} candidates", instances.len());
                Err(CoreError::NoInstancesAvailable(
                    "no active E2T instance".to_string(),
                ))
            }
        }
    }

    /// Decommission hook. Currently leaves the registry untouched.
    pub async fn remove_e2t_instance(&self, instance: &E2TInstance) -> Result<()> {
        debug!("Remove requested for E2T instance {}", instance.address);
        Ok(())
    }

    async fn save_instance(&self, operation: &'static str, instance: &E2TInstance) -> Result<()> {
        self.store.save_e2t_instance(instance).await.map_err(|e| {
            error!("Failed saving E2T instance {} ({}): {}", instance.address, operation, e);
            CoreError::store(operation, instance.address.as_str(), e)
        })
    }
}
