//! # Minibank Demos
//!
//! Example scenarios driving the ledger as an external caller would.
//!
//! ## Available Examples
//!
//! 1. **01_transfer** - Debit, credit and a transfer between two accounts
//! 2. **02_bank_relation** - Register accounts with a configured bank, transfer, report
//!
//! ## Running Examples
//!
//! ```bash
//! RUST_LOG=debug cargo run -p minibank-demos --example 01_transfer
//! cargo run -p minibank-demos --example 02_bank_relation
//! ```

use tracing_subscriber::EnvFilter;

/// Install a compact subscriber; `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
