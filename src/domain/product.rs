use super::money::Cents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product slot in the machine.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Product {
    /// Unique, monotonically assigned identifier. Never reused.
    pub id: u32,
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, unit_price: Cents, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Copy of this product with a different stock level.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Case-insensitive exact name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Formats as `#1 Chips 1.50 (2 left)`.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.id, self.name, self.unit_price)?;
        if self.in_stock() {
            write!(f, " ({} left)", self.quantity)
        } else {
            write!(f, " (out of stock)")
        }
    }
}
