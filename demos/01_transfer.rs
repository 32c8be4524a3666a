//! # Example 01: Transfer
//!
//! 1. Debit and credit a single account
//! 2. A rejected debit (insufficient funds)
//! 3. Transfer between two accounts through a bank
//!
//! Run with: `cargo run -p minibank-demos --example 01_transfer`

use minibank_core::{Account, Amount, Bank};
use minibank_demos::init_logging;
use rust_decimal_macros::dec;

fn main() -> anyhow::Result<()> {
    init_logging("info");

    println!("=== Example 01: Transfer ===\n");

    let andres = Account::new("Andrés", dec!(1000.12345));
    andres.debit(Amount::from_units(100)?)?;
    println!("After debit of 100:    {}", andres);

    andres.credit("0.87655".parse()?)?;
    println!("After credit of 0.87655: {}", andres);

    match andres.debit(Amount::from_units(5000)?) {
        Ok(()) => println!("Unexpected: debit of 5000 went through"),
        Err(err) => println!("Debit of 5000 rejected: {}", err),
    }
    println!();

    let john = Account::new("John Doe", dec!(2500));
    let bank = Bank::new();
    bank.set_name("Banco del Estado");

    bank.transfer(&andres, &john, Amount::from_units(500)?)?;
    println!("Transfer of 500 from {} to {}:", andres.owner(), john.owner());
    println!("  {}", andres);
    println!("  {}", john);

    Ok(())
}
