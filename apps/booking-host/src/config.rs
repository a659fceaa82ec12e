//! # Host Configuration
//!
//! What the host page supplies to every booking: the currency label and the
//! display name and base price of each service.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SANA_CURRENCY=SAR                                                  │
//! │     SANA_SHRINK_BASE_PRICE=175.50                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/booking/booking.toml (Linux)                             │
//! │     ~/Library/Application Support/com.sana.booking/booking.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Shrink Services 150.00, Trimming Services 100.00, SAR              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [currency]
//! code = "SAR"
//!
//! [services.shrink]
//! name = "Shrink Services"
//! base_price = "150.00"
//!
//! [services.trimming]
//! name = "Trimming Services"
//! base_price = 100
//!
//! [logging]
//! filter = "info,sana=debug"
//! ```

use rust_decimal::Decimal;
use sana_core::{BookingConfiguration, Money, ServiceKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{HostError, HostResult};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,sana=debug";

// =============================================================================
// Currency
// =============================================================================

/// Currency shown next to every price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code, printed after the amount (`150.00 SAR`).
    #[serde(default = "default_currency_code")]
    pub code: String,
}

fn default_currency_code() -> String {
    "SAR".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
        }
    }
}

impl CurrencySettings {
    /// `Money(15000)` → `150.00 SAR`
    pub fn format(&self, amount: Money) -> String {
        format!("{} {}", amount, self.code)
    }
}

// =============================================================================
// Services
// =============================================================================

/// Display name and base price of one service page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    pub name: String,

    /// Price per horse before markups and discounts, in major units.
    pub base_price: Decimal,
}

impl ServiceSettings {
    fn new(name: &str, base_price: i64) -> Self {
        ServiceSettings {
            name: name.to_string(),
            base_price: Decimal::from(base_price),
        }
    }
}

/// Both bookable services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesSettings {
    #[serde(default = "default_shrink")]
    pub shrink: ServiceSettings,

    #[serde(default = "default_trimming")]
    pub trimming: ServiceSettings,
}

fn default_shrink() -> ServiceSettings {
    ServiceSettings::new("Shrink Services", 150)
}

fn default_trimming() -> ServiceSettings {
    ServiceSettings::new("Trimming Services", 100)
}

impl Default for ServicesSettings {
    fn default() -> Self {
        ServicesSettings {
            shrink: default_shrink(),
            trimming: default_trimming(),
        }
    }
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins over it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Host Configuration
// =============================================================================

/// Complete host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub services: ServicesSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl HostConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (booking.toml)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> HostResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading booking config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> HostResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(HostError::NoConfigPath("booking config"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Booking config saved");
        Ok(path)
    }

    /// Checks that every service can open a booking.
    pub fn validate(&self) -> HostResult<()> {
        let code = self.currency.code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(HostError::Config(format!(
                "currency code must be three uppercase letters, got: '{}'",
                self.currency.code
            )));
        }

        for kind in [ServiceKind::Shrink, ServiceKind::Trimming] {
            self.booking_configuration(kind)?;
        }

        Ok(())
    }

    /// Settings of one service.
    pub fn service(&self, kind: ServiceKind) -> &ServiceSettings {
        match kind {
            ServiceKind::Shrink => &self.services.shrink,
            ServiceKind::Trimming => &self.services.trimming,
        }
    }

    /// Builds the immutable configuration a booking session starts from.
    pub fn booking_configuration(&self, kind: ServiceKind) -> HostResult<BookingConfiguration> {
        let service = self.service(kind);
        let base_price = Money::try_from(service.base_price)?;
        Ok(BookingConfiguration::new(kind, base_price, service.name.as_str())?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable prices are skipped
    /// with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("SANA_CURRENCY") {
            debug!(currency = %code, "Overriding currency from environment");
            self.currency.code = code.trim().to_uppercase();
        }

        if let Some(name) = lookup("SANA_SHRINK_NAME") {
            self.services.shrink.name = name;
        }

        if let Some(name) = lookup("SANA_TRIMMING_NAME") {
            self.services.trimming.name = name;
        }

        let prices = [
            ("SANA_SHRINK_BASE_PRICE", ServiceKind::Shrink),
            ("SANA_TRIMMING_BASE_PRICE", ServiceKind::Trimming),
        ];
        for (key, kind) in prices {
            let Some(raw) = lookup(key) else { continue };
            match raw.trim().parse::<Decimal>() {
                Ok(price) => {
                    debug!(service = %kind, %price, "Overriding base price from environment");
                    self.service_mut(kind).base_price = price;
                }
                Err(e) => warn!(key, value = %raw, "Ignoring unparseable base price: {}", e),
            }
        }
    }

    fn service_mut(&mut self, kind: ServiceKind) -> &mut ServiceSettings {
        match kind {
            ServiceKind::Shrink => &mut self.services.shrink,
            ServiceKind::Trimming => &mut self.services.trimming,
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sana", "booking")
            .map(|dirs| dirs.config_dir().join("booking.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.currency.code, "SAR");
        assert_eq!(config.services.shrink.name, "Shrink Services");
        assert_eq!(config.services.shrink.base_price, Decimal::from(150));
        assert_eq!(config.services.trimming.base_price, Decimal::from(100));
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: HostConfig = toml::from_str(
            r#"
            [services.trimming]
            name = "Hoof Trimming"
            base_price = "95.50"
            "#,
        )
        .unwrap();

        assert_eq!(config.currency.code, "SAR");
        assert_eq!(config.services.shrink, default_shrink());
        assert_eq!(config.services.trimming.name, "Hoof Trimming");

        let booking = config.booking_configuration(ServiceKind::Trimming).unwrap();
        assert_eq!(booking.base_price(), Money::from_minor(9550));
    }

    #[test]
    fn test_config_validation() {
        let mut config = HostConfig::default();

        config.currency.code = "riyal".to_string();
        assert!(config.validate().is_err());

        config.currency.code = "SAR".to_string();
        config.services.shrink.base_price = Decimal::ZERO;
        assert!(config.validate().is_err());

        config.services.shrink.base_price = Decimal::new(150_001, 3);
        assert!(config.validate().is_err());

        config.services.shrink.base_price = Decimal::from(150);
        config.services.trimming.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = HostConfig::default();
        config.apply_overrides(lookup_from(&[
            ("SANA_CURRENCY", " usd "),
            ("SANA_SHRINK_BASE_PRICE", "175.25"),
            ("SANA_TRIMMING_BASE_PRICE", "not a price"),
            ("SANA_TRIMMING_NAME", "Trim"),
        ]));

        assert_eq!(config.currency.code, "USD");
        assert_eq!(config.services.shrink.base_price, Decimal::new(17525, 2));
        assert_eq!(config.services.trimming.base_price, Decimal::from(100));
        assert_eq!(config.services.trimming.name, "Trim");
    }

    #[test]
    fn test_currency_format() {
        let currency = CurrencySettings::default();
        assert_eq!(currency.format(Money::from_minor(81000)), "810.00 SAR");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("sana-booking-{}", uuid::Uuid::new_v4()))
            .join("booking.toml");

        let mut config = HostConfig::default();
        config.services.shrink.base_price = Decimal::new(16000, 2);
        let saved = config.save(Some(path.clone())).unwrap();
        assert_eq!(saved, path);

        let loaded = HostConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.services.shrink.base_price, Decimal::from(160));
        assert!(toml::to_string_pretty(&loaded).unwrap().contains("[services.shrink]"));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
