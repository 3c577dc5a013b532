//! Transaction model
//!
//! One ledger row: an income or expense entry with a non-negative amount.
//! The sign of an entry is never stored; it comes from its kind when
//! balances are computed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, Kind};
use super::money::Money;

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Income or expense
    pub kind: Kind,

    /// Free-text description, never empty
    pub description: String,

    /// Amount, always non-negative
    pub amount: Money,

    /// Category from the vocabulary of `kind`
    pub category: Category,

    /// Date the entry applies to
    pub date: NaiveDate,

    /// Whether the entry repeats every month
    #[serde(default)]
    pub recurring: bool,

    /// Whether the entry was paid or received on credit
    #[serde(default)]
    pub credit: bool,
}

impl Transaction {
    /// Create a validated transaction
    pub fn new(
        kind: Kind,
        description: impl Into<String>,
        amount: Money,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, TransactionValidationError> {
        let txn = Self {
            kind,
            description: description.into().trim().to_string(),
            amount,
            category,
            date,
            recurring: false,
            credit: false,
        };
        txn.validate()?;
        Ok(txn)
    }

    /// Mark the entry as recurring
    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Mark the entry as credit
    pub fn with_credit(mut self, credit: bool) -> Self {
        self.credit = credit;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }

    /// Amount with the sign implied by the kind (income positive, expense negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.amount > Money::MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        if !self.category.belongs_to(self.kind) {
            return Err(TransactionValidationError::CategoryKindMismatch {
                kind: self.kind,
                category: self.category,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount(),
            self.category
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    NegativeAmount(Money),
    AmountTooLarge(Money),
    CategoryKindMismatch { kind: Kind, category: Category },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative: {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, Money::MAX_AMOUNT)
            }
            Self::CategoryKindMismatch { kind, category } => {
                write!(f, "Category '{}' is not valid for {} entries", category, kind)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
