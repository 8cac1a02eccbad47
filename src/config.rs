use crate::domain::coin::{CoinPool, Denomination};
use crate::domain::money::Cents;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Coins stocked for any denomination a configured vault leaves out.
pub const DEFAULT_VAULT_COUNT: u32 = 5;

pub const DEFAULT_ADMIN_PASSWORD: &str = "pass";

/// A product the machine is stocked with at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
}

impl ProductSeed {
    pub fn new(name: impl Into<String>, unit_price: Cents, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }
}

/// Initial machine state, loaded from JSON.
///
/// Every field is optional; missing ones fall back to the factory defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub admin_password: String,
    pub products: Vec<ProductSeed>,
    /// Face value to coin count. Kept as raw numbers so unknown denominations
    /// are reported when the machine is built, not as a JSON error.
    pub vault: BTreeMap<u32, u32>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            products: vec![
                ProductSeed::new("Chips", Cents(150), 2),
                ProductSeed::new("Chocolate", Cents(120), 1),
                ProductSeed::new("Water", Cents(90), 5),
            ],
            vault: BTreeMap::from([(100, 5), (50, 5), (10, 10), (5, 10), (2, 10), (1, 50)]),
        }
    }
}

impl MachineConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// The starting vault. Denominations absent from the map get
    /// [`DEFAULT_VAULT_COUNT`] coins.
    pub fn vault_pool(&self) -> Result<CoinPool> {
        let mut pool = CoinPool::uniform(DEFAULT_VAULT_COUNT);
        for (&value, &count) in &self.vault {
            pool.set(Denomination::try_from(value)?, count);
        }
        Ok(pool)
    }
}
