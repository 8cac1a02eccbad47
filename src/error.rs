use crate::domain::money::Cents;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("Unsupported coin denomination: {0}")]
    InvalidDenomination(u32),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Product not found: {0}")]
    ProductNotFound(u32),
    #[error("Product out of stock: {0}")]
    OutOfStock(String),
    #[error("Insufficient funds: required {required}, inserted {inserted}")]
    InsufficientFunds { required: Cents, inserted: Cents },
    #[error("Cannot dispense exact change of {change_due}, purchase cancelled")]
    ExactChangeUnavailable { change_due: Cents },
    #[error("Authentication failed")]
    AuthenticationFailure,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

impl VendingError {
    /// Returns true for errors raised by the machine itself, which never leave
    /// it partially mutated and can be reported back to the user.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::CsvError(_) | Self::IoError(_) | Self::ConfigError(_)
        )
    }
}

pub type Result<T, E = VendingError> = std::result::Result<T, E>;
