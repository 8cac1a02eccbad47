use crate::config::MachineConfig;
use crate::domain::change::make_change;
use crate::domain::coin::{CoinPool, Denomination};
use crate::domain::money::Cents;
use crate::domain::ports::ProductStore;
use crate::domain::product::Product;
use crate::error::{Result, VendingError};
use crate::infrastructure::in_memory::InMemoryProductStore;
use tracing::{debug, info};

/// Outcome of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub product_id: u32,
    pub product_name: String,
    pub unit_price: Cents,
    /// Coins handed back to the customer. Empty when nothing was owed.
    pub change: CoinPool,
}

impl PurchaseReceipt {
    pub fn change_total(&self) -> Cents {
        self.change.total()
    }
}

/// The vending machine aggregate.
///
/// Owns the product list, the coin vault, the coins inserted in the current
/// session and the revenue not yet collected. Every mutating operation either
/// applies completely or returns an error without touching any of them.
pub struct VendingMachine<S: ProductStore = InMemoryProductStore> {
    products: S,
    vault: CoinPool,
    inserted: CoinPool,
    revenue: Cents,
    admin_password: String,
}

impl VendingMachine {
    /// Creates a machine with an empty in-memory product list.
    pub fn new(admin_password: impl Into<String>, vault: CoinPool) -> Self {
        Self::with_store(InMemoryProductStore::new(), admin_password, vault)
    }

    /// Builds a machine stocked as described by `config`.
    pub fn from_config(config: &MachineConfig) -> Result<Self> {
        let mut machine = Self::new(config.admin_password.clone(), config.vault_pool()?);
        for seed in &config.products {
            machine.add_product(&seed.name, seed.unit_price, seed.quantity)?;
        }
        Ok(machine)
    }
}

impl<S: ProductStore> VendingMachine<S> {
    pub fn with_store(products: S, admin_password: impl Into<String>, vault: CoinPool) -> Self {
        Self {
            products,
            vault,
            inserted: CoinPool::new(),
            revenue: Cents::ZERO,
            admin_password: admin_password.into(),
        }
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.products.all()
    }

    /// Adds a product under a fresh id and returns it.
    ///
    /// The name is trimmed; price and quantity must be positive.
    pub fn add_product(&mut self, name: &str, unit_price: Cents, quantity: u32) -> Result<Product> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VendingError::InvalidArgument(
                "product name must not be empty".to_string(),
            ));
        }
        if unit_price.is_zero() {
            return Err(VendingError::InvalidArgument(
                "product price must be positive".to_string(),
            ));
        }
        if quantity == 0 {
            return Err(VendingError::InvalidArgument(
                "product quantity must be positive".to_string(),
            ));
        }
        let id = match self.products.max_id() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                VendingError::InvalidArgument("product ids exhausted".to_string())
            })?,
            None => 1,
        };

        let product = Product::new(id, name, unit_price, quantity);
        self.products.insert(product.clone());
        info!(product_id = id, name, price = %unit_price, quantity, "Product added");
        Ok(product)
    }

    pub fn remove_product_by_name(&mut self, name: &str) -> bool {
        match self.products.remove_by_name(name.trim()) {
            Some(product) => {
                info!(product_id = product.id, name = %product.name, "Product removed");
                true
            }
            None => {
                debug!(name, "No product to remove");
                false
            }
        }
    }

    /// Adds coins to the current session. The vault is untouched until a
    /// purchase completes.
    pub fn insert_coin(&mut self, denomination: u32, count: u32) -> Result<()> {
        let denomination = Self::validate_coins(denomination, count)?;
        self.inserted = self
            .inserted
            .checked_add(denomination, count)
            .ok_or_else(|| Self::too_many_coins(denomination))?;
        debug!(
            denomination = %denomination,
            count,
            inserted = %self.inserted_total(),
            "Coins inserted"
        );
        Ok(())
    }

    pub fn inserted_total(&self) -> Cents {
        self.inserted.total()
    }

    pub fn inserted_coins(&self) -> CoinPool {
        self.inserted
    }

    /// Hands back every inserted coin and clears the session.
    pub fn cancel_and_return(&mut self) -> CoinPool {
        let returned = self.inserted.take();
        debug!(returned = %returned.total(), "Session cancelled");
        returned
    }

    /// Sells one unit of `product_id` against the inserted coins.
    ///
    /// Change is paid from the vault together with the coins the customer
    /// just inserted. On any error the machine is left exactly as it was and
    /// the inserted coins stay available for a top-up or a cancel.
    pub fn buy_product(&mut self, product_id: u32) -> Result<PurchaseReceipt> {
        let result = self.settle(product_id);
        if let Err(e) = &result {
            debug!(product_id, error = %e, "Purchase rejected");
        }
        result
    }

    fn settle(&mut self, product_id: u32) -> Result<PurchaseReceipt> {
        if product_id == 0 {
            return Err(VendingError::InvalidArgument(
                "product id must be positive".to_string(),
            ));
        }
        let product = self
            .products
            .get(product_id)
            .ok_or(VendingError::ProductNotFound(product_id))?;
        if !product.in_stock() {
            return Err(VendingError::OutOfStock(product.name.clone()));
        }

        let inserted = self.inserted_total();
        let change_due =
            inserted
                .checked_sub(product.unit_price)
                .ok_or(VendingError::InsufficientFunds {
                    required: product.unit_price,
                    inserted,
                })?;

        let candidates = self.vault.checked_merge(&self.inserted).ok_or_else(|| {
            VendingError::InvalidArgument("vault cannot hold the inserted coins".to_string())
        })?;
        let change = make_change(change_due, &candidates)
            .ok_or(VendingError::ExactChangeUnavailable { change_due })?;
        let vault = candidates
            .checked_sub(&change)
            .ok_or(VendingError::ExactChangeUnavailable { change_due })?;

        // Everything is validated; apply.
        let sold = product.with_quantity(product.quantity - 1);
        let receipt = PurchaseReceipt {
            product_id,
            product_name: sold.name.clone(),
            unit_price: sold.unit_price,
            change,
        };
        self.products.replace(sold);
        self.vault = vault;
        self.revenue += receipt.unit_price;
        self.inserted = CoinPool::new();

        info!(
            product_id,
            product = %receipt.product_name,
            price = %receipt.unit_price,
            change = %receipt.change_total(),
            "Product dispensed"
        );
        Ok(receipt)
    }

    pub fn check_admin_password(&self, candidate: &str) -> bool {
        self.admin_password == candidate
    }

    /// Returns the revenue collected since the last call and resets it.
    pub fn collect_earnings(&mut self) -> Cents {
        let earnings = std::mem::take(&mut self.revenue);
        info!(amount = %earnings, "Earnings collected");
        earnings
    }

    /// Empties the vault and returns the value of every coin removed.
    /// Revenue bookkeeping is not affected.
    pub fn collect_all_vault_coins(&mut self) -> Cents {
        let drained = self.vault.take();
        info!(amount = %drained.total(), coins = %drained, "Vault emptied");
        drained.total()
    }

    pub fn add_coins(&mut self, denomination: u32, count: u32) -> Result<()> {
        let denomination = Self::validate_coins(denomination, count)?;
        self.vault = self
            .vault
            .checked_add(denomination, count)
            .ok_or_else(|| Self::too_many_coins(denomination))?;
        info!(denomination = %denomination, count, "Vault restocked");
        Ok(())
    }

    pub fn is_vault_empty(&self) -> bool {
        self.vault.is_empty()
    }

    pub fn vault_snapshot(&self) -> CoinPool {
        self.vault
    }

    pub fn accumulated_revenue(&self) -> Cents {
        self.revenue
    }

    fn validate_coins(denomination: u32, count: u32) -> Result<Denomination> {
        let denomination = Denomination::try_from(denomination)?;
        if count == 0 {
            return Err(VendingError::InvalidArgument(
                "coin count must be positive".to_string(),
            ));
        }
        Ok(denomination)
    }

    fn too_many_coins(denomination: Denomination) -> VendingError {
        VendingError::InvalidArgument(format!(
            "coin count overflows for denomination {denomination}"
        ))
    }
}
