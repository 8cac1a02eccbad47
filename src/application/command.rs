use crate::domain::money::Cents;

/// Who is operating the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// A single request against the machine, as issued by a customer or an
/// operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListProducts,
    Status,
    InsertCoin { denomination: u32, count: u32 },
    Buy { product_id: u32 },
    Cancel,
    Login { password: String },
    Logout,
    ShowVault,
    CollectEarnings,
    CollectAll,
    AddProduct {
        name: String,
        unit_price: Cents,
        quantity: u32,
    },
    RemoveProduct { name: String },
    AddCoins { denomination: u32, count: u32 },
}

impl Command {
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::Logout
                | Self::ShowVault
                | Self::CollectEarnings
                | Self::CollectAll
                | Self::AddProduct { .. }
                | Self::RemoveProduct { .. }
                | Self::AddCoins { .. }
        )
    }
}
