//! billy-doc configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! Command line flags are applied on top by `main`.

use std::env;

use billy_core::{
    validate_phone, validate_tax_id, CompanySnapshot, CoreError, TaxPolicy, ValidationError,
    DEFAULT_VAT_RATE, THAI_BAHT_CURRENCY,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocConfig {
    /// VAT rate as a fraction (0.07 = 7%)
    pub tax_rate: Decimal,

    /// Item prices already include VAT
    pub tax_inclusive: bool,

    /// ISO 4217 code; only THB is issued
    pub currency: String,

    /// Issuing company printed on every document
    pub company: CompanySnapshot,
}

impl Default for DocConfig {
    fn default() -> Self {
        DocConfig {
            tax_rate: DEFAULT_VAT_RATE,
            tax_inclusive: false,
            currency: THAI_BAHT_CURRENCY.to_string(),
            company: CompanySnapshot::default(),
        }
    }
}

impl DocConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// ## Variables
    /// | Variable               | Default                 |
    /// |------------------------|-------------------------|
    /// | `BILLY_TAX_RATE`       | `0.07`                  |
    /// | `BILLY_TAX_INCLUSIVE`  | `false`                 |
    /// | `BILLY_CURRENCY`       | `THB`                   |
    /// | `BILLY_COMPANY_NAME`   | demo company            |
    /// | `BILLY_COMPANY_TAX_ID` | demo company            |
    /// | `BILLY_COMPANY_TEL`    | demo company            |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DocConfig::default();

        let tax_rate = match lookup("BILLY_TAX_RATE") {
            Some(raw) => raw
                .trim()
                .parse::<Decimal>()
                .map_err(|_| ConfigError::InvalidValue("BILLY_TAX_RATE".to_string()))?,
            None => defaults.tax_rate,
        };

        let tax_inclusive = match lookup("BILLY_TAX_INCLUSIVE") {
            Some(raw) => raw
                .trim()
                .to_ascii_lowercase()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BILLY_TAX_INCLUSIVE".to_string()))?,
            None => defaults.tax_inclusive,
        };

        let currency = lookup("BILLY_CURRENCY")
            .map(|c| c.trim().to_ascii_uppercase())
            .unwrap_or(defaults.currency);
        if currency != THAI_BAHT_CURRENCY {
            return Err(ConfigError::UnsupportedCurrency(currency));
        }

        let mut company = defaults.company;
        if let Some(name) = lookup("BILLY_COMPANY_NAME") {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue("BILLY_COMPANY_NAME".to_string()));
            }
            company.name = name;
        }
        if let Some(tax_id) = lookup("BILLY_COMPANY_TAX_ID") {
            validate_tax_id(&tax_id).map_err(|source| ConfigError::InvalidCompany {
                var: "BILLY_COMPANY_TAX_ID",
                source,
            })?;
            company.tax_id = tax_id;
        }
        if let Some(tel) = lookup("BILLY_COMPANY_TEL") {
            validate_phone(&tel).map_err(|source| ConfigError::InvalidCompany {
                var: "BILLY_COMPANY_TEL",
                source,
            })?;
            company.tel = tel;
        }

        let config = DocConfig {
            tax_rate,
            tax_inclusive,
            currency,
            company,
        };

        // Reject a negative rate at startup rather than per document
        config.tax_policy()?;

        Ok(config)
    }

    /// The tax policy documents are assembled with.
    pub fn tax_policy(&self) -> Result<TaxPolicy, ConfigError> {
        TaxPolicy::new(Some(self.tax_rate), self.tax_inclusive).map_err(ConfigError::Tax)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Unsupported currency {0}, documents are issued in THB")]
    UnsupportedCurrency(String),

    #[error("Invalid value for {var}: {source}")]
    InvalidCompany {
        var: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid tax configuration: {0}")]
    Tax(#[source] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn load_from(vars: &[(&str, &str)]) -> Result<DocConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DocConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();
        assert_eq!(config, DocConfig::default());
        assert_eq!(config.tax_rate, dec!(0.07));
        assert!(!config.tax_policy().unwrap().is_inclusive());
    }

    #[test]
    fn test_overrides() {
        let config = load_from(&[
            ("BILLY_TAX_RATE", "0.10"),
            ("BILLY_TAX_INCLUSIVE", "TRUE"),
            ("BILLY_CURRENCY", "thb"),
            ("BILLY_COMPANY_NAME", "บริษัท ทดสอบ จำกัด"),
            ("BILLY_COMPANY_TAX_ID", "1234567890120"),
            ("BILLY_COMPANY_TEL", "02-987-6543"),
        ])
        .unwrap();

        assert_eq!(config.tax_rate, dec!(0.10));
        assert!(config.tax_inclusive);
        assert_eq!(config.currency, "THB");
        assert_eq!(config.company.name, "บริษัท ทดสอบ จำกัด");
        assert_eq!(config.company.tax_id, "1234567890120");
        assert_eq!(config.company.tel, "02-987-6543");
        // untouched fields keep the demo values
        assert_eq!(config.company.bank_account, "123-4-56789-0");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load_from(&[("BILLY_TAX_RATE", "seven")]),
            Err(ConfigError::InvalidValue(var)) if var == "BILLY_TAX_RATE"
        ));
        assert!(matches!(
            load_from(&[("BILLY_TAX_INCLUSIVE", "yes")]),
            Err(ConfigError::InvalidValue(var)) if var == "BILLY_TAX_INCLUSIVE"
        ));
        assert!(matches!(
            load_from(&[("BILLY_TAX_RATE", "-0.07")]),
            Err(ConfigError::Tax(CoreError::NegativeTaxRate))
        ));
        assert!(matches!(
            load_from(&[("BILLY_CURRENCY", "USD")]),
            Err(ConfigError::UnsupportedCurrency(c)) if c == "USD"
        ));
    }

    #[test]
    fn test_company_fields_are_validated() {
        let err = load_from(&[("BILLY_COMPANY_TAX_ID", "1234567890123")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for BILLY_COMPANY_TAX_ID: Invalid tax ID checksum"
        );

        let err = load_from(&[("BILLY_COMPANY_TEL", "12345")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for BILLY_COMPANY_TEL: Invalid Thai phone number format"
        );
    }
}
