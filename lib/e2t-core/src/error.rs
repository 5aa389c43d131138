use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by the registry store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::ResourceNotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{operation} failed for {target}: {source}")]
    Store {
        operation: &'static str,
        target: String,
        #[source]
        source: StoreError,
    },

    #[error("No E2T instances available: {0}")]
    NoInstancesAvailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn store(operation: &'static str, target: impl Into<String>, source: StoreError) -> Self {
        CoreError::Store {
            operation,
            target: target.into(),
            source,
        }
    }

    /// True when the underlying store reported a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::Store { source, .. } if source.is_not_found())
    }

    /// True when the underlying store failed for any other reason
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CoreError::Store {
                source: StoreError::Internal(_),
                ..
            }
        )
    }

    pub fn is_no_instances_available(&self) -> bool {
        matches!(self, CoreError::NoInstancesAvailable(_))
    }
}
