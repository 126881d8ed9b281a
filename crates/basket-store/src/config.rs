//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_SLOT_KEY=cart                                               │
//! │     BASKET_TAX_BASE=total_with_shipping                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/basket/basket.toml (Linux)                               │
//! │     ~/Library/Application Support/com.basket.basket/basket.toml        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     slot "cart", free shipping at $50.00 else $5.99, 8% on subtotal    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! slot_key = "cart"
//! data_dir = "/var/lib/basket"
//!
//! [shipping]
//! free_threshold = 50.0
//! flat_fee = 5.99
//!
//! [tax]
//! rate_bps = 800
//! base = "subtotal"   # subtotal | total_with_shipping
//! ```

use std::path::PathBuf;

use basket_core::validation::validate_tax_rate_bps;
use basket_core::{Money, ShippingPolicy, TaxConfig, TaxRate};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::DEFAULT_SLOT_KEY;

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart slot lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Slot name; the file slot stores `<data_dir>/<slot_key>.json`.
    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    /// Directory for file slots. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            slot_key: default_slot_key(),
            data_dir: None,
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub shipping: ShippingPolicy,

    /// Used by the checkout layer only; the store never applies tax.
    #[serde(default)]
    pub tax: TaxConfig,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`basket.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    StoreError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let key = &self.storage.slot_key;
        if key.trim().is_empty() {
            return Err(StoreError::InvalidConfig("slot_key must not be empty".into()));
        }
        if key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(StoreError::InvalidConfig(format!(
                "slot_key must be a plain name, got: {}",
                key
            )));
        }

        if self.shipping.free_threshold.is_negative() {
            return Err(StoreError::InvalidConfig(
                "free_threshold must not be negative".into(),
            ));
        }
        if self.shipping.flat_fee.is_negative() {
            return Err(StoreError::InvalidConfig("flat_fee must not be negative".into()));
        }

        validate_tax_rate_bps(self.tax.rate.bps())
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Applies `BASKET_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("BASKET_SLOT_KEY") {
            debug!(slot_key = %key, "Overriding slot key from environment");
            self.storage.slot_key = key;
        }

        if let Some(dir) = lookup("BASKET_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("BASKET_FREE_SHIPPING_THRESHOLD") {
            match raw.parse::<Money>() {
                Ok(threshold) => self.shipping.free_threshold = threshold,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring BASKET_FREE_SHIPPING_THRESHOLD"),
            }
        }

        if let Some(raw) = lookup("BASKET_SHIPPING_FEE") {
            match raw.parse::<Money>() {
                Ok(fee) => self.shipping.flat_fee = fee,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring BASKET_SHIPPING_FEE"),
            }
        }

        if let Some(raw) = lookup("BASKET_TAX_RATE_BPS") {
            match raw.parse::<u32>() {
                Ok(bps) => self.tax.rate = TaxRate::from_bps(bps),
                Err(_) => warn!(value = %raw, "Ignoring BASKET_TAX_RATE_BPS"),
            }
        }

        if let Some(raw) = lookup("BASKET_TAX_BASE") {
            match raw.parse() {
                Ok(base) => self.tax.base = base,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring BASKET_TAX_BASE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("basket.toml"))
    }

    /// Directory holding file slots: configured, else the platform data dir.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn slot_key(&self) -> &str {
        &self.storage.slot_key
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "basket", "basket")
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_core::TaxBase;
    use std::collections::HashMap;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("basket-config-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.slot_key(), "cart");
        assert_eq!(config.shipping, ShippingPolicy::default());
        assert_eq!(config.tax.rate.bps(), 800);
        assert_eq!(config.tax.base, TaxBase::Subtotal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config: StoreConfig = toml::from_str(
            r#"
            [storage]
            slot_key = "guest-cart"

            [shipping]
            free_threshold = 75
            flat_fee = 4.5

            [tax]
            rate_bps = 925
            base = "total_with_shipping"
            "#,
        )
        .unwrap();

        assert_eq!(config.slot_key(), "guest-cart");
        assert_eq!(config.shipping.free_threshold.cents(), 7500);
        assert_eq!(config.shipping.flat_fee.cents(), 450);
        assert_eq!(config.tax.rate.bps(), 925);
        assert_eq!(config.tax.base, TaxBase::TotalWithShipping);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StoreConfig = toml::from_str("[shipping]\nflat_fee = 7.0\n").unwrap();
        assert_eq!(config.shipping.flat_fee.cents(), 700);
        assert_eq!(config.shipping.free_threshold.cents(), 5000);
        assert_eq!(config.slot_key(), "cart");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BASKET_SLOT_KEY", "kiosk"),
            ("BASKET_DATA_DIR", "/tmp/basket-data"),
            ("BASKET_FREE_SHIPPING_THRESHOLD", "100"),
            ("BASKET_SHIPPING_FEE", "9.99"),
            ("BASKET_TAX_RATE_BPS", "0"),
            ("BASKET_TAX_BASE", "total"),
        ]
        .into_iter()
        .collect();

        let mut config = StoreConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.slot_key(), "kiosk");
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/basket-data")));
        assert_eq!(config.shipping.free_threshold.cents(), 10000);
        assert_eq!(config.shipping.flat_fee.cents(), 999);
        assert_eq!(config.tax.rate.bps(), 0);
        assert_eq!(config.tax.base, TaxBase::TotalWithShipping);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = StoreConfig::default();
        config.apply_overrides(|name| match name {
            "BASKET_SHIPPING_FEE" => Some("cheap".to_string()),
            "BASKET_TAX_RATE_BPS" => Some("-3".to_string()),
            "BASKET_TAX_BASE" => Some("gross".to_string()),
            _ => None,
        });

        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();

        config.storage.slot_key = "  ".into();
        assert!(config.validate().is_err());

        config.storage.slot_key = "../escape".into();
        assert!(config.validate().is_err());

        config.storage.slot_key = "cart".into();
        config.shipping.flat_fee = Money::from_cents(-1);
        assert!(config.validate().is_err());

        config.shipping = ShippingPolicy::default();
        config.tax.rate = TaxRate::from_bps(10001);
        assert!(config.validate().is_err());

        config.tax.rate = TaxRate::from_bps(800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = scratch_file("basket.toml");
        let mut config = StoreConfig::default();
        config.storage.slot_key = "saved".into();
        config.tax.base = TaxBase::TotalWithShipping;

        config.save(Some(path.clone())).unwrap();
        let loaded = StoreConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.slot_key(), "saved");
        assert_eq!(loaded.tax.base, TaxBase::TotalWithShipping);
        assert_eq!(loaded.shipping, ShippingPolicy::default());

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).unwrap();
        }
    }

    #[test]
    fn test_unreadable_config_is_load_failure() {
        // A directory exists but cannot be read as a file.
        let dir = scratch_file("basket.toml");
        std::fs::create_dir_all(&dir).unwrap();

        match StoreConfig::load(Some(dir.clone())) {
            Err(StoreError::ConfigLoadFailed(msg)) => assert!(msg.contains("basket.toml")),
            other => panic!("expected ConfigLoadFailed, got {:?}", other),
        }

        std::fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = scratch_file("basket.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[tax]\nrate_bps = 20000\n").unwrap();

        assert!(matches!(
            StoreConfig::load(Some(path.clone())),
            Err(StoreError::InvalidConfig(_))
        ));
        assert_eq!(StoreConfig::load_or_default(Some(path.clone())), StoreConfig::default());

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
