//! # Error Module
//!
//! Domain errors raised by the ledger, defined with thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

/// Fixed text of an insufficient-funds failure.
pub const INSUFFICIENT_FUNDS: &str = "Insufficient Funds";

/// Ledger domain errors.
///
/// Every variant is recoverable: the operation that raised it left the
/// accounts untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A debit asked for more than the account holds.
    ///
    /// The display text is always [`INSUFFICIENT_FUNDS`]; the amounts are
    /// kept as fields for callers that want them.
    #[error("Insufficient Funds")]
    InsufficientFunds { requested: Decimal, available: Decimal },

    #[error("Balance overflow on account: {owner}")]
    BalanceOverflow { owner: String },

    /// The new balance would need more significant digits than a decimal holds.
    #[error("Balance cannot be held exactly on account: {owner}")]
    PrecisionLoss { owner: String },

    #[error("Account already registered: {0}")]
    DuplicateAccount(String),
}

/// Result type alias with LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, LedgerError::InsufficientFunds { .. })
    }
}
