// Front desk configuration
use crate::pricing::FREQUENT_TRAVELER_DISCOUNT_PCT;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelConfig {
    // Directory holding the seven collection files
    pub data_dir: PathBuf,
    pub frequent_traveler_discount_pct: Decimal,
    pub payment_confirmation_length: usize,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            frequent_traveler_discount_pct: FREQUENT_TRAVELER_DISCOUNT_PCT,
            payment_confirmation_length: 30,
        }
    }
}

impl HotelConfig {
    /// Reads a JSON config file; fields left out keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: HotelConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.frequent_traveler_discount_pct < Decimal::ZERO
            || self.frequent_traveler_discount_pct > Decimal::ONE_HUNDRED
        {
            anyhow::bail!(
                "frequent_traveler_discount_pct must be within 0..=100, got {}",
                self.frequent_traveler_discount_pct
            );
        }
        if self.payment_confirmation_length == 0 {
            anyhow::bail!("payment_confirmation_length must be positive");
        }
        Ok(())
    }
}
