use super::command::{Command, Role};
use super::machine::VendingMachine;
use crate::domain::ports::ProductStore;
use crate::error::{Result, VendingError};
use tracing::{debug, info};

/// Runs commands against a machine on behalf of one operator at a time.
///
/// Starts in the customer role; `login` with the admin password unlocks the
/// operator commands until `logout`.
pub struct Session<'a, S: ProductStore> {
    machine: &'a mut VendingMachine<S>,
    role: Role,
}

impl<'a, S: ProductStore> Session<'a, S> {
    pub fn new(machine: &'a mut VendingMachine<S>) -> Self {
        Self {
            machine,
            role: Role::Customer,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn machine(&self) -> &VendingMachine<S> {
        &*self.machine
    }

    /// Executes `command` and describes what happened.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        if command.requires_admin() && self.role != Role::Admin {
            debug!(?command, "Admin command refused");
            return Err(VendingError::AuthenticationFailure);
        }

        let machine = &mut *self.machine;
        let detail = match command {
            Command::ListProducts => {
                let products = machine.list_products();
                if products.is_empty() {
                    "no products".to_string()
                } else {
                    products
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                }
            }
            Command::Status => {
                let mut status = format!("inserted {}", machine.inserted_total());
                if machine.is_vault_empty() {
                    status.push_str("; vault is empty, purchases needing change may be rejected");
                }
                status
            }
            Command::InsertCoin {
                denomination,
                count,
            } => {
                machine.insert_coin(denomination, count)?;
                format!("inserted {}", machine.inserted_total())
            }
            Command::Buy { product_id } => {
                let receipt = machine.buy_product(product_id)?;
                if receipt.change.is_empty() {
                    format!("dispensed {}; no change", receipt.product_name)
                } else {
                    format!(
                        "dispensed {}; change {} ({})",
                        receipt.product_name,
                        receipt.change_total(),
                        receipt.change
                    )
                }
            }
            Command::Cancel => {
                let returned = machine.cancel_and_return();
                format!("returned {} ({})", returned.total(), returned)
            }
            Command::Login { password } => {
                if !machine.check_admin_password(&password) {
                    info!("Admin login failed");
                    return Err(VendingError::AuthenticationFailure);
                }
                self.role = Role::Admin;
                info!("Admin logged in");
                "admin mode".to_string()
            }
            Command::Logout => {
                self.role = Role::Customer;
                "customer mode".to_string()
            }
            Command::ShowVault => {
                let vault = machine.vault_snapshot();
                format!(
                    "vault {} ({}); revenue {}",
                    vault.total(),
                    vault,
                    machine.accumulated_revenue()
                )
            }
            Command::CollectEarnings => format!("collected {}", machine.collect_earnings()),
            Command::CollectAll => {
                format!("collected {} from vault", machine.collect_all_vault_coins())
            }
            Command::AddProduct {
                name,
                unit_price,
                quantity,
            } => {
                let product = machine.add_product(&name, unit_price, quantity)?;
                format!("added {product}")
            }
            Command::RemoveProduct { name } => {
                if machine.remove_product_by_name(&name) {
                    format!("removed {}", name.trim())
                } else {
                    format!("no product named {}", name.trim())
                }
            }
            Command::AddCoins {
                denomination,
                count,
            } => {
                machine.add_coins(denomination, count)?;
                format!("vault now {}", machine.vault_snapshot().total())
            }
        };
        Ok(detail)
    }
}
