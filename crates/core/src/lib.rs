//! Minibank Core - ledger domain
//!
//! This crate contains the ledger types:
//! - `Amount`: strictly positive decimal moved by debits, credits and transfers
//! - `Account`: owner + exact decimal balance, debit/credit
//! - `Bank`: named collection of accounts, transfer between accounts
//! - `BankConfig`: TOML configuration of a bank
//!
//! Handles are `Rc`-based and meant for single-threaded use.

pub mod account;
pub mod amount;
pub mod bank;
pub mod config;
pub mod error;

pub use account::{Account, AccountSnapshot};
pub use amount::{decimal_from_f64, Amount, AmountError};
pub use bank::Bank;
pub use config::{AccountsConfig, BankConfig, ConfigError, DuplicatePolicy};
pub use error::{LedgerError, LedgerResult, INSUFFICIENT_FUNDS};
