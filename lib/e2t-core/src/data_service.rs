//! Retrying access to the registry store
//!
//! Wraps a reader and a writer and applies the configured connection retry
//! policy. Only internal (transport/store) failures are retried; a missing key
//! is an answer, not a failure.

use crate::store::{InstanceReader, InstanceWriter};
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use e2t_api::E2TInstance;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Retry policy for store calls
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Delay between two attempts
    pub retry_interval: Duration,
    /// Total attempts per call, including the first one
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_millis(10),
            max_attempts: 3,
        }
    }
}

/// RnibDataService is the store adapter handed to the instance manager
pub struct RnibDataService {
    reader: Arc<dyn InstanceReader>,
    writer: Arc<dyn InstanceWriter>,
    retry: RetryConfig,
}

impl RnibDataService {
    pub fn new(
        retry: RetryConfig,
        reader: Arc<dyn InstanceReader>,
        writer: Arc<dyn InstanceWriter>,
    ) -> Self {
        Self {
            reader,
            writer,
            retry,
        }
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    async fn with_retries<T, F, Fut>(&self, operation: &'static str, mut call: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = StoreResult<T>> + Send,
        T: Send,
    {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(StoreError::Internal(reason)) if attempt < max_attempts => {
                    warn!(
                        "Store call {} failed (attempt {}/{}): {}",
                        operation, attempt, max_attempts, reason
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry.retry_interval).await;
                }
                Err(err) => {
                    if !err.is_not_found() {
                        error!(
                            "Store call {} failed after {} attempts: {}",
                            operation, attempt, err
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}

#[async_trait]
impl InstanceReader for RnibDataService {
    async fn get_e2t_instance(&self, address: &str) -> StoreResult<E2TInstance> {
        self.with_retries("get_e2t_instance", || self.reader.get_e2t_instance(address))
            .await
    }

    async fn get_e2t_instances(&self, addresses: &[String]) -> StoreResult<Vec<E2TInstance>> {
        self.with_retries("get_e2t_instances", || {
            self.reader.get_e2t_instances(addresses)
        })
        .await
    }

    async fn get_e2t_addresses(&self) -> StoreResult<Vec<String>> {
        self.with_retries("get_e2t_addresses", || self.reader.get_e2t_addresses())
            .await
    }
}

#[async_trait]
impl InstanceWriter for RnibDataService {
    async fn save_e2t_instance(&self, instance: &E2TInstance) -> StoreResult<()> {
        self.with_retries("save_e2t_instance", || self.writer.save_e2t_instance(instance))
            .await
    }

    async fn save_e2t_addresses(&self, addresses: &[String]) -> StoreResult<()> {
        self.with_retries("save_e2t_addresses", || {
            self.writer.save_e2t_addresses(addresses)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Reader that fails a fixed number of times before answering
    struct FlakyReader {
        failures: u32,
        calls: AtomicU32,
        not_found: bool,
    }

    impl FlakyReader {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
                not_found: false,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InstanceReader for FlakyReader {
        async fn get_e2t_instance(&self, address: &str) -> StoreResult<E2TInstance> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.not_found {
                return Err(StoreError::ResourceNotFound(address.to_string()));
            }
            if call <= self.failures {
                return Err(StoreError::Internal("connection refused".to_string()));
            }
            Ok(E2TInstance::new(address))
        }

        async fn get_e2t_instances(&self, _addresses: &[String]) -> StoreResult<Vec<E2TInstance>> {
            Ok(Vec::new())
        }

        async fn get_e2t_addresses(&self) -> StoreResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl InstanceWriter for FlakyReader {
        async fn save_e2t_instance(&self, _instance: &E2TInstance) -> StoreResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Internal("write refused".to_string()))
        }

        async fn save_e2t_addresses(&self, _addresses: &[String]) -> StoreResult<()> {
            Ok(())
        }
    }

    fn service(store: Arc<FlakyReader>, max_attempts: u32) -> RnibDataService {
        let retry = RetryConfig {
            retry_interval: Duration::from_millis(1),
            max_attempts,
        };
        RnibDataService::new(retry, store.clone(), store)
    }

    #[test]
    fn test_default_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.retry_interval, Duration::from_millis(10));
        assert_eq!(config.max_attempts, 3);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let store = Arc::new(FlakyReader::new(2));
        let service = service(store.clone(), 3);

        let instance = service.get_e2t_instance("10.10.2.15:9800").await.unwrap();
        assert_eq!(instance.address, "10.10.2.15:9800");
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let store = Arc::new(FlakyReader::new(5));
        let service = service(store.clone(), 3);

        let err = service.get_e2t_instance("10.10.2.15:9800").await.unwrap_err();
        assert_eq!(err, StoreError::Internal("connection refused".to_string()));
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let mut reader = FlakyReader::new(0);
        reader.not_found = true;
        let store = Arc::new(reader);
        let service = service(store.clone(), 3);

        let err = service.get_e2t_instance("10.10.2.15:9800").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let store = Arc::new(FlakyReader::new(0));
        let service = service(store.clone(), 0);

        let err = service
            .save_e2t_instance(&E2TInstance::new("10.10.2.15:9800"))
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(store.calls(), 1);
    }
}
