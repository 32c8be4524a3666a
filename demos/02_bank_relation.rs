//! # Example 02: Bank Relation
//!
//! Builds a bank from `bank.toml`, registers two accounts, transfers
//! between them and prints the statement.
//!
//! Run with: `cargo run -p minibank-demos --example 02_bank_relation`

use minibank_core::{Account, Amount, Bank, BankConfig};
use minibank_demos::init_logging;
use rust_decimal_macros::dec;

fn main() -> anyhow::Result<()> {
    let config = BankConfig::load_str(include_str!("bank.toml"))?;
    init_logging(&config.log_level);

    println!("=== Example 02: Bank Relation ===\n");

    let bank = Bank::with_config(config);
    let john = Account::new("John Doe", dec!(2500));
    let andres = Account::new("Andrés", dec!(1500.8989));

    bank.add_account(&john)?;
    bank.add_account(&andres)?;

    // duplicates = "reject" in bank.toml
    if let Err(err) = bank.add_account(&john) {
        println!("Second registration refused: {}", err);
    }

    bank.transfer(&andres, &john, Amount::from_units(500)?)?;

    if let Some(owning) = john.bank() {
        println!("{} banks with {}", john.owner(), owning.name());
    }

    println!("\nStatement of {} ({} accounts):", bank.name(), bank.len());
    for line in bank.statement() {
        println!("  {:<10} {:>12}", line.owner, line.balance);
    }

    Ok(())
}
