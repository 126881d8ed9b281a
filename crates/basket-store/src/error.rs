//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / quota / lock ──► SlotError                           │
//! │                                        │                                │
//! │  serde_json::Error ────────────────────┼──► StoreError                 │
//! │  toml errors, bad settings ────────────┘        │                       │
//! │                                                 ▼                       │
//! │                      CartStore: logged + kept in last_storage_error     │
//! │                      (cart operations never return it)                 │
//! │                                                 │                       │
//! │                      StoreConfig::load: returned to the caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Failures of the storage medium itself.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The medium is disabled or cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the payload would exceed the medium's quota.
    #[error("Storage quota exceeded: payload {needed} bytes, quota {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Filesystem error from a file-backed slot.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for slot operations.
pub type SlotResult<T> = Result<T, SlotError>;

/// Errors surfaced by basket-store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing the slot failed.
    #[error("Storage slot error: {0}")]
    Slot(#[from] SlotError),

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The slot holds something other than a valid cart.
    #[error("Malformed cart slot: {0}")]
    MalformedSlot(String),

    /// A configuration value is out of range.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),

    /// The config file could not be written.
    #[error("Failed to save configuration: {0}")]
    ConfigSaveFailed(String),
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SlotError::QuotaExceeded {
            needed: 120,
            quota: 64,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: payload 120 bytes, quota 64 bytes"
        );

        let err: StoreError = SlotError::Unavailable("disabled".into()).into();
        assert_eq!(
            err.to_string(),
            "Storage slot error: Storage unavailable: disabled"
        );
    }

    #[test]
    fn test_toml_error_converts_to_load_failure() {
        let err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let store_err: StoreError = err.into();
        assert!(matches!(store_err, StoreError::ConfigLoadFailed(_)));
    }
}
