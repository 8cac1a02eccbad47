use crate::application::command::Command;
use crate::domain::money::Cents;
use crate::error::{Result, VendingError};
use serde::Deserialize;
use std::io::Read;

/// Script keywords understood by the reader.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Status,
    Insert,
    Buy,
    Cancel,
    Login,
    Logout,
    Vault,
    Collect,
    CollectAll,
    AddProduct,
    RemoveProduct,
    AddCoins,
}

impl Action {
    /// The script keyword for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Status => "status",
            Self::Insert => "insert",
            Self::Buy => "buy",
            Self::Cancel => "cancel",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Vault => "vault",
            Self::Collect => "collect",
            Self::CollectAll => "collect_all",
            Self::AddProduct => "add_product",
            Self::RemoveProduct => "remove_product",
            Self::AddCoins => "add_coins",
        }
    }
}

/// One raw script row: `action, arg, value, count`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub action: Action,
    #[serde(default)]
    pub arg: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub count: Option<i64>,
}

impl CommandRecord {
    fn arg(&self, what: &str) -> Result<&str> {
        self.arg
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VendingError::InvalidArgument(format!("missing {what}")))
    }

    fn number_arg(&self, what: &str) -> Result<u32> {
        let raw = self.arg(what)?;
        raw.parse()
            .map_err(|_| VendingError::InvalidArgument(format!("invalid {what}: {raw}")))
    }

    fn count(&self, what: &str) -> Result<u32> {
        let count = self
            .count
            .ok_or_else(|| VendingError::InvalidArgument(format!("missing {what}")))?;
        u32::try_from(count)
            .map_err(|_| VendingError::InvalidArgument(format!("{what} must be positive: {count}")))
    }
}

impl TryFrom<CommandRecord> for Command {
    type Error = VendingError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let command = match record.action {
            Action::List => Command::ListProducts,
            Action::Status => Command::Status,
            Action::Insert => Command::InsertCoin {
                denomination: record.number_arg("denomination")?,
                count: record.count("coin count")?,
            },
            Action::Buy => Command::Buy {
                product_id: record.number_arg("product id")?,
            },
            Action::Cancel => Command::Cancel,
            Action::Login => Command::Login {
                password: record.arg.clone().unwrap_or_default(),
            },
            Action::Logout => Command::Logout,
            Action::Vault => Command::ShowVault,
            Action::Collect => Command::CollectEarnings,
            Action::CollectAll => Command::CollectAll,
            Action::AddProduct => {
                let price = record
                    .value
                    .as_deref()
                    .ok_or_else(|| VendingError::InvalidArgument("missing price".to_string()))?;
                Command::AddProduct {
                    name: record.arg("product name")?.to_string(),
                    unit_price: Cents::parse(price)?,
                    quantity: record.count("quantity")?,
                }
            }
            Action::RemoveProduct => Command::RemoveProduct {
                name: record.arg("product name")?.to_string(),
            },
            Action::AddCoins => Command::AddCoins {
                denomination: record.number_arg("denomination")?,
                count: record.count("coin count")?,
            },
        };
        Ok(command)
    }
}

/// Reads command rows from a CSV script.
///
/// Whitespace is trimmed and rows may omit trailing columns.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily decodes the script, one record per row.
    pub fn records(self) -> impl Iterator<Item = Result<CommandRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }
}
