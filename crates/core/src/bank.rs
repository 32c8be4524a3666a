//! # Bank Module
//!
//! A `Bank` is a named, insertion-ordered collection of accounts that
//! mediates transfers between them.
//!
//! The bank holds strong handles to its accounts; each account points back
//! with a weak reference, so there is no reference cycle.

use crate::account::{Account, AccountSnapshot};
use crate::amount::Amount;
use crate::config::{BankConfig, DuplicatePolicy};
use crate::error::{LedgerError, LedgerResult};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub(crate) struct BankInner {
    name: RefCell<String>,
    accounts: RefCell<Vec<Account>>,
    duplicates: DuplicatePolicy,
}

/// Shared handle to a bank.
///
/// # Examples
/// ```
/// use minibank_core::{Account, Amount, Bank};
/// use rust_decimal_macros::dec;
///
/// let john = Account::new("John Doe", dec!(2500));
/// let andres = Account::new("Andrés", dec!(1500.8989));
///
/// let bank = Bank::new();
/// bank.add_account(&john).unwrap();
/// bank.add_account(&andres).unwrap();
/// bank.set_name("Banco del Estado");
///
/// bank.transfer(&andres, &john, Amount::from_units(500).unwrap()).unwrap();
///
/// assert_eq!(andres.balance().to_string(), "1000.8989");
/// assert_eq!(john.balance().to_string(), "3000");
/// assert_eq!(john.bank().unwrap().name(), "Banco del Estado");
/// ```
#[derive(Clone)]
pub struct Bank {
    inner: Rc<BankInner>,
}

impl Bank {
    /// Create an unnamed bank with the default configuration
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    pub fn with_config(config: BankConfig) -> Self {
        Self {
            inner: Rc::new(BankInner {
                name: RefCell::new(config.name),
                accounts: RefCell::new(Vec::new()),
                duplicates: config.accounts.duplicates,
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<BankInner>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> String {
        self.inner.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.inner.name.borrow_mut() = name.into();
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.inner.duplicates
    }

    /// Register an account and point its back-reference at this bank.
    ///
    /// With [`DuplicatePolicy::Reject`], registering the same handle twice
    /// fails with [`LedgerError::DuplicateAccount`] and changes nothing.
    /// Duplicates are detected by identity, not by value.
    pub fn add_account(&self, account: &Account) -> LedgerResult<()> {
        if self.inner.duplicates == DuplicatePolicy::Reject && self.contains(account) {
            tracing::warn!(
                bank = %self.inner.name.borrow(),
                owner = account.owner(),
                "Account already registered"
            );
            return Err(LedgerError::DuplicateAccount(account.owner().to_string()));
        }

        self.inner.accounts.borrow_mut().push(account.clone());

        let previous = account.attach(Rc::downgrade(&self.inner));
        if let Some(previous) = previous.upgrade() {
            if !Rc::ptr_eq(&previous, &self.inner) {
                tracing::warn!(
                    owner = account.owner(),
                    from = %previous.name.borrow(),
                    to = %self.inner.name.borrow(),
                    "Account moved to another bank"
                );
            }
        }

        tracing::debug!(
            bank = %self.inner.name.borrow(),
            owner = account.owner(),
            accounts = self.len(),
            "Account registered"
        );
        Ok(())
    }

    /// Registered accounts in insertion order
    pub fn accounts(&self) -> Vec<Account> {
        self.inner.accounts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.accounts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.accounts.borrow().is_empty()
    }

    /// Whether this exact handle is registered
    pub fn contains(&self, account: &Account) -> bool {
        self.inner
            .accounts
            .borrow()
            .iter()
            .any(|registered| registered.same_account(account))
    }

    /// First registered account owned by `owner`
    pub fn find_account(&self, owner: &str) -> Option<Account> {
        self.inner
            .accounts
            .borrow()
            .iter()
            .find(|account| account.owner() == owner)
            .cloned()
    }

    /// Snapshot of every registered account, in insertion order
    pub fn statement(&self) -> Vec<AccountSnapshot> {
        self.inner
            .accounts
            .borrow()
            .iter()
            .map(Account::snapshot)
            .collect()
    }

    /// Whether both handles refer to the same bank
    pub fn same_bank(&self, other: &Bank) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Move `amount` from one account to another: debit `from`, then credit `to`.
    ///
    /// A failed debit propagates unchanged and `to` is never touched. Both
    /// legs are checked before anything moves: funds first, then whether `to`
    /// can hold the credit exactly. Neither account has to be registered with
    /// this bank.
    pub fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> LedgerResult<()> {
        let span = tracing::info_span!(
            "transfer",
            bank = %self.inner.name.borrow(),
            from = from.owner(),
            to = to.owner(),
            %amount
        );
        let _enter = span.enter();

        from.debited(amount)?;
        if !from.same_account(to) {
            to.credited(amount)?;
        }

        from.debit(amount)?;
        to.credit(amount)?;

        tracing::info!("Transfer completed");
        Ok(())
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bank")
            .field("name", &self.inner.name.borrow())
            .field("accounts", &self.statement())
            .field("duplicates", &self.inner.duplicates)
            .finish()
    }
}
