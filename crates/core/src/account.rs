//! # Account Module
//!
//! An `Account` is an owner name plus an exact decimal balance.
//! It is a shared handle: clones point at the same ledger entry, so a
//! transfer made through a `Bank` is visible through every handle.

use crate::amount::{decimal_from_f64, Amount, AmountError};
use crate::bank::{Bank, BankInner};
use crate::error::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

struct AccountInner {
    owner: String,
    balance: Cell<Decimal>,
    /// Set by `Bank::add_account`; never keeps the bank alive.
    bank: RefCell<Weak<BankInner>>,
}

/// A ledger account.
///
/// Equality is by value: two accounts are equal when both the owner and
/// the balance match, even if they are separate instances. Use
/// [`Account::same_account`] to ask whether two handles are the same entry.
///
/// # Examples
/// ```
/// use minibank_core::{Account, Amount};
/// use rust_decimal_macros::dec;
///
/// let account = Account::new("Andrés", dec!(1000.12345));
/// account.debit(Amount::from_units(100).unwrap()).unwrap();
/// assert_eq!(account.balance().to_string(), "900.12345");
/// ```
#[derive(Clone)]
pub struct Account {
    inner: Rc<AccountInner>,
}

impl Account {
    /// Open an account with an initial balance.
    ///
    /// The balance may be zero or negative; only debits are checked.
    pub fn new(owner: impl Into<String>, balance: Decimal) -> Self {
        Self {
            inner: Rc::new(AccountInner {
                owner: owner.into(),
                balance: Cell::new(balance),
                bank: RefCell::new(Weak::new()),
            }),
        }
    }

    /// Open an account from a binary float balance.
    ///
    /// The float is converted to its nearest short decimal; NaN and
    /// infinities are rejected.
    pub fn from_f64(owner: impl Into<String>, balance: f64) -> Result<Self, AmountError> {
        Ok(Self::new(owner, decimal_from_f64(balance)?))
    }

    pub fn owner(&self) -> &str {
        &self.inner.owner
    }

    pub fn balance(&self) -> Decimal {
        self.inner.balance.get()
    }

    /// The bank this account was last registered with, if it is still alive.
    pub fn bank(&self) -> Option<Bank> {
        self.inner.bank.borrow().upgrade().map(Bank::from_inner)
    }

    /// Point the back-reference at `bank`, returning the previous one.
    pub(crate) fn attach(&self, bank: Weak<BankInner>) -> Weak<BankInner> {
        self.inner.bank.replace(bank)
    }

    /// Subtract `amount` from the balance.
    ///
    /// Fails with [`LedgerError::InsufficientFunds`] when the balance would
    /// go below zero, and with [`LedgerError::PrecisionLoss`] when the result
    /// cannot be held exactly; the balance is then left unchanged.
    pub fn debit(&self, amount: Amount) -> LedgerResult<()> {
        let remaining = self.debited(amount)?;

        self.inner.balance.set(remaining);
        tracing::debug!(owner = %self.inner.owner, %amount, balance = %remaining, "Debit applied");
        Ok(())
    }

    /// Add `amount` to the balance.
    ///
    /// Fails with [`LedgerError::BalanceOverflow`] when the sum leaves the
    /// decimal range, and with [`LedgerError::PrecisionLoss`] when it would
    /// have to be rounded; the balance is then left unchanged.
    pub fn credit(&self, amount: Amount) -> LedgerResult<()> {
        let balance = self.credited(amount)?;

        self.inner.balance.set(balance);
        tracing::debug!(owner = %self.inner.owner, %amount, %balance, "Credit applied");
        Ok(())
    }

    /// Balance after debiting `amount`, without applying it.
    pub(crate) fn debited(&self, amount: Amount) -> LedgerResult<Decimal> {
        let available = self.balance();

        if available < amount.value() {
            tracing::warn!(
                owner = %self.inner.owner,
                requested = %amount,
                available = %available,
                "Debit rejected: insufficient funds"
            );
            return Err(LedgerError::InsufficientFunds {
                requested: amount.value(),
                available,
            });
        }

        exact_add(available, -amount.value()).map_err(|err| self.refused(err, "Debit", amount))
    }

    /// Balance after crediting `amount`, without applying it.
    pub(crate) fn credited(&self, amount: Amount) -> LedgerResult<Decimal> {
        exact_add(self.balance(), amount.value()).map_err(|err| self.refused(err, "Credit", amount))
    }

    fn refused(&self, err: Inexact, operation: &str, amount: Amount) -> LedgerError {
        let owner = self.inner.owner.clone();
        tracing::warn!(
            owner = %owner,
            %amount,
            balance = %self.balance(),
            reason = ?err,
            "{operation} rejected: result not exactly representable"
        );
        match err {
            Inexact::Overflow => LedgerError::BalanceOverflow { owner },
            Inexact::Rounded => LedgerError::PrecisionLoss { owner },
        }
    }

    /// Whether both handles refer to the same ledger entry.
    pub fn same_account(&self, other: &Account) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            owner: self.inner.owner.clone(),
            balance: self.balance(),
        }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.owner() == other.owner() && self.balance() == other.balance()
    }
}

impl Eq for Account {}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("owner", &self.inner.owner)
            .field("balance", &self.balance())
            .field("bank", &self.bank().map(|bank| bank.name()))
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.inner.owner, self.balance())
    }
}

/// Point-in-time copy of an account, for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub owner: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inexact {
    Overflow,
    Rounded,
}

/// `lhs + rhs` without rounding.
///
/// `Decimal` keeps the larger operand scale when the sum fits and sheds
/// fractional digits (rounding) when it does not, so a result with a smaller
/// scale than its operands is refused. Trailing zeros are stripped and the sum
/// retried before giving up, which keeps `1e25 (scale 3) + 0.0010` exact. A sum
/// that would only fit after dropping a zero produced by the addition itself
/// is still refused.
fn exact_add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, Inexact> {
    fn keeps_scale(lhs: Decimal, rhs: Decimal) -> Option<Option<Decimal>> {
        let sum = lhs.checked_add(rhs)?;
        Some((sum.scale() >= lhs.scale().max(rhs.scale())).then_some(sum))
    }

    if let Some(Some(sum)) = keeps_scale(lhs, rhs) {
        return Ok(sum);
    }
    keeps_scale(lhs.normalize(), rhs.normalize())
        .ok_or(Inexact::Overflow)?
        .ok_or(Inexact::Rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fixture() -> Account {
        Account::new("Andrés", dec!(123))
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_account_owner() {
        let account = fixture();
        assert_eq!(account.owner(), "Andrés");
    }

    #[test]
    fn test_account_balance() {
        let account = fixture();
        assert_eq!(account.balance(), dec!(123));
        assert!(account.balance() > Decimal::ZERO);
        assert!(account.bank().is_none());
    }

    #[test]
    fn test_value_equality() {
        let a = Account::new("John Doe", dec!(8900.9997));
        let b = Account::new("John Doe", dec!(8900.9997));

        assert_eq!(a, b);
        assert!(!a.same_account(&b));

        let c = Account::new("John Doe", dec!(8900.9998));
        assert_ne!(a, c);
        let d = Account::new("Jane Doe", dec!(8900.9997));
        assert_ne!(a, d);
    }

    #[test]
    fn test_clone_aliases_same_entry() {
        let account = fixture();
        let alias = account.clone();

        alias.credit(amount(dec!(7))).unwrap();

        assert!(account.same_account(&alias));
        assert_eq!(account.balance(), dec!(130));
    }

    #[test]
    fn test_debit() {
        let account = Account::new("Andrés", dec!(1000.12345));
        account.debit(amount(dec!(100))).unwrap();

        assert_eq!(account.balance(), dec!(900.12345));
        assert_eq!(account.balance().to_string(), "900.12345");
    }

    #[test]
    fn test_credit() {
        let account = fixture();
        account.credit(amount(dec!(100))).unwrap();

        assert_eq!(account.balance().to_string(), "223");
    }

    #[test]
    fn test_debit_whole_balance() {
        let account = fixture();
        account.debit(amount(dec!(123))).unwrap();
        assert!(account.balance().is_zero());
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let account = fixture();
        let err = account.debit(amount(dec!(1500))).unwrap_err();

        assert_eq!(err.to_string(), "Insufficient Funds");
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                requested: dec!(1500),
                available: dec!(123),
            }
        );
        assert_eq!(account.balance(), dec!(123));
    }

    #[test]
    fn test_debit_from_negative_balance() {
        let account = Account::new("Andrés", dec!(-10));
        assert!(account.debit(amount(dec!(1))).unwrap_err().is_insufficient_funds());
        assert_eq!(account.balance(), dec!(-10));
    }

    #[test]
    fn test_repeated_debit_on_fresh_fixture() {
        for _ in 0..5 {
            let account = fixture();
            account.debit(amount(dec!(100))).unwrap();
            assert_eq!(account.balance().to_string(), "23");
        }
    }

    #[test]
    fn test_credit_overflow_leaves_balance() {
        let account = Account::new("Andrés", Decimal::MAX);
        let err = account.credit(amount(dec!(1))).unwrap_err();

        assert!(matches!(err, LedgerError::BalanceOverflow { .. }));
        assert_eq!(account.balance(), Decimal::MAX);
        assert!(account.credited(amount(dec!(1))).is_err());
    }

    fn large() -> Decimal {
        // 26 integer digits leave room for only two fractional digits
        dec!(10000000000000000000000000)
    }

    #[test]
    fn test_credit_refuses_rounding() {
        let account = Account::new("Andrés", large());
        let err = account.credit(amount(dec!(0.0001))).unwrap_err();

        assert_eq!(
            err,
            LedgerError::PrecisionLoss {
                owner: "Andrés".to_string()
            }
        );
        assert_eq!(account.balance(), large());
        assert_eq!(account.balance().to_string(), "10000000000000000000000000");
    }

    #[test]
    fn test_debit_refuses_rounding() {
        let account = Account::new("Andrés", large());
        let err = account.debit(amount(dec!(0.0001))).unwrap_err();

        assert!(matches!(err, LedgerError::PrecisionLoss { .. }));
        assert_eq!(account.balance(), large());
    }

    #[test]
    fn test_large_balance_takes_representable_amounts() {
        let account = Account::new("Andrés", large());

        account.credit(amount(dec!(0.01))).unwrap();
        assert_eq!(account.balance(), dec!(10000000000000000000000000.01));

        account.debit(amount(dec!(0.01))).unwrap();
        assert_eq!(account.balance(), large());
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_rounding() {
        // 10^25 carried at scale 3: the mantissa is already 29 digits
        let balance = Decimal::from_i128_with_scale(10i128.pow(28), 3);
        let account = Account::new("Andrés", balance);

        account.credit(amount(dec!(0.0010))).unwrap();

        assert_eq!(account.balance(), dec!(10000000000000000000000000.001));
    }

    #[test]
    fn test_exact_add() {
        assert_eq!(exact_add(dec!(1000.12345), dec!(-100)), Ok(dec!(900.12345)));
        assert_eq!(exact_add(Decimal::MAX, dec!(1)), Err(Inexact::Overflow));
        assert_eq!(exact_add(large(), dec!(0.0001)), Err(Inexact::Rounded));
        assert_eq!(exact_add(large(), dec!(-0.0001)), Err(Inexact::Rounded));
    }

    #[test]
    fn test_from_f64() {
        let account = Account::from_f64("Andrés", 123.0).unwrap();
        assert_eq!(account, fixture());

        assert!(Account::from_f64("Andrés", f64::NAN).is_err());
    }

    #[test]
    fn test_display_and_snapshot() {
        let account = Account::new("John Doe", dec!(2500));
        assert_eq!(account.to_string(), "John Doe: 2500");

        let snapshot = account.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"owner":"John Doe","balance":"2500"}"#);
    }
}
