//! Draft entry state machine
//!
//! Holds an entry while it is being composed one field at a time, then
//! commits it to the ledger store or discards it.
//!
//! ```text
//! Empty --set_field--> Editing --commit (complete)--> Empty
//!                        |  ^
//!                        |  +-- commit (description or amount missing): no-op
//!                        +----- clear --> Empty
//! ```
//!
//! Field values are checked as they are set (an amount cannot be negative);
//! whether the category belongs to the chosen kind is only checked on
//! commit, since the kind may still change.

use chrono::{Local, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Kind, Ledger, Money, Transaction};
use crate::storage::dates::normalize_date;
use crate::storage::LedgerStore;

/// Lifecycle of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    /// Nothing entered since the last commit or clear
    #[default]
    Empty,
    /// At least one field has been set
    Editing,
}

/// A single field assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Kind(Kind),
    Description(Option<String>),
    Amount(Option<Money>),
    Category(Option<Category>),
    Date(NaiveDate),
    Recurring(bool),
    Credit(bool),
}

impl FieldUpdate {
    /// Build an update from a field name and its textual value
    ///
    /// Blank values clear the optional fields. Category labels are resolved
    /// against `kind` first and then against the other vocabulary, so a
    /// mismatch is reported by `commit` rather than here.
    pub fn parse(name: &str, raw: &str, kind: Kind) -> LedgerResult<Self> {
        let value = raw.trim();
        let invalid = |what: &str| {
            LedgerError::Validation(format!("Invalid {} for field '{}': '{}'", what, name, raw))
        };

        let update = match name.trim().to_lowercase().as_str() {
            "kind" => Self::Kind(value.parse().map_err(|_| invalid("kind"))?),
            "description" => Self::Description(non_blank(value)),
            "amount" => Self::Amount(match non_blank(value) {
                Some(v) => Some(Money::parse(&v).map_err(|_| invalid("amount"))?),
                None => None,
            }),
            "category" => Self::Category(match non_blank(value) {
                Some(v) => Some(Category::parse_any(&v, kind).map_err(|_| invalid("category"))?),
                None => None,
            }),
            "date" => Self::Date(normalize_date(value).ok_or_else(|| invalid("date"))?),
            "recurring" => Self::Recurring(parse_bool(value).ok_or_else(|| invalid("flag"))?),
            "credit" => Self::Credit(parse_bool(value).ok_or_else(|| invalid("flag"))?),
            other => {
                return Err(LedgerError::Validation(format!("Unknown field: '{}'", other)));
            }
        };

        Ok(update)
    }
}

/// Result of a commit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The entry was appended; holds the ledger after the append
    Committed(Ledger),
    /// Description or amount is missing; nothing was written
    Incomplete,
}

/// The entry being composed
#[derive(Debug, Clone)]
pub struct DraftEntry {
    kind: Kind,
    description: Option<String>,
    amount: Option<Money>,
    category: Option<Category>,
    date: NaiveDate,
    recurring: bool,
    credit: bool,
    state: DraftState,
    today: fn() -> NaiveDate,
}

impl Default for DraftEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftEntry {
    /// Create an empty draft dated today (local time)
    pub fn new() -> Self {
        Self::with_clock(local_today)
    }

    /// Create an empty draft whose notion of "today" comes from `today`
    pub fn with_clock(today: fn() -> NaiveDate) -> Self {
        Self {
            kind: Kind::default(),
            description: None,
            amount: None,
            category: None,
            date: today(),
            recurring: false,
            credit: false,
            state: DraftState::Empty,
            today,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    /// Whether any field was set since the last commit or clear
    pub fn is_touched(&self) -> bool {
        self.state == DraftState::Editing
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn recurring(&self) -> bool {
        self.recurring
    }

    pub fn credit(&self) -> bool {
        self.credit
    }

    /// Whether both required fields (description and amount) are set
    pub fn is_complete(&self) -> bool {
        self.description.is_some() && self.amount.is_some()
    }

    /// The category a commit would use: the chosen one, or the kind's default
    pub fn resolved_category(&self) -> Category {
        self.category
            .unwrap_or_else(|| self.kind.default_category())
    }

    /// Set one field and move to `Editing`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a negative amount; the draft is left
    /// unchanged in that case.
    pub fn set_field(&mut self, update: FieldUpdate) -> LedgerResult<()> {
        match update {
            FieldUpdate::Kind(kind) => self.kind = kind,
            FieldUpdate::Description(description) => {
                self.description = description.as_deref().and_then(non_blank);
            }
            FieldUpdate::Amount(Some(amount)) if amount.is_negative() => {
                return Err(LedgerError::Validation(format!(
                    "Amount cannot be negative: {}",
                    amount
                )));
            }
            FieldUpdate::Amount(amount) => self.amount = amount,
            FieldUpdate::Category(category) => self.category = category,
            FieldUpdate::Date(date) => self.date = date,
            FieldUpdate::Recurring(recurring) => self.recurring = recurring,
            FieldUpdate::Credit(credit) => self.credit = credit,
        }

        self.state = DraftState::Editing;
        Ok(())
    }

    /// Reset every field to its default and return to `Empty`
    ///
    /// The ledger is not touched.
    pub fn clear(&mut self) {
        *self = Self::with_clock(self.today);
    }

    /// Append the draft to the ledger if it is complete
    ///
    /// A draft missing its description or amount is left as it is and
    /// nothing is written. Otherwise the category is checked against the
    /// kind, the entry is appended (and persisted) through `store`, and the
    /// draft is cleared.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCategory` when the category belongs to the other kind,
    /// or the store's error if the append fails. The draft stays editable
    /// in both cases.
    pub fn commit(&mut self, store: &LedgerStore) -> LedgerResult<CommitOutcome> {
        let (Some(description), Some(amount)) = (self.description.clone(), self.amount) else {
            tracing::debug!(
                has_description = self.description.is_some(),
                has_amount = self.amount.is_some(),
                "draft incomplete, nothing committed"
            );
            return Ok(CommitOutcome::Incomplete);
        };

        let category = self.resolved_category();
        if !category.belongs_to(self.kind) {
            return Err(LedgerError::InvalidCategory {
                kind: self.kind,
                category,
            });
        }

        let txn = Transaction::new(self.kind, description, amount, category, self.date)
            .map_err(|e| LedgerError::Validation(e.to_string()))?
            .with_recurring(self.recurring)
            .with_credit(self.credit);

        let ledger = store.append(txn)?;
        self.clear();
        Ok(CommitOutcome::Committed(ledger))
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Some(false),
        "1" | "true" | "yes" | "y" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeCategory};
    use tempfile::TempDir;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn create_test_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("ledger.csv"));
        (temp_dir, store)
    }

    fn filled_draft() -> DraftEntry {
        let mut draft = DraftEntry::with_clock(fixed_today);
        draft.set_field(FieldUpdate::Kind(Kind::Expense)).unwrap();
        draft
            .set_field(FieldUpdate::Description(Some("Market".into())))
            .unwrap();
        draft
            .set_field(FieldUpdate::Amount(Some(Money::from_cents(30000))))
            .unwrap();
        draft
            .set_field(FieldUpdate::Category(Some(Category::Expense(
                ExpenseCategory::Food,
            ))))
            .unwrap();
        draft
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = DraftEntry::with_clock(fixed_today);

        assert_eq!(draft.state(), DraftState::Empty);
        assert!(!draft.is_touched());
        assert_eq!(draft.kind(), Kind::Income);
        assert_eq!(draft.description(), None);
        assert_eq!(draft.amount(), None);
        assert_eq!(draft.date(), fixed_today());
        assert!(!draft.recurring());
        assert!(!draft.credit());
    }

    #[test]
    fn test_set_field_moves_to_editing() {
        let mut draft = DraftEntry::with_clock(fixed_today);
        draft.set_field(FieldUpdate::Credit(true)).unwrap();

        assert_eq!(draft.state(), DraftState::Editing);
        assert!(draft.credit());
    }

    #[test]
    fn test_negative_amount_rejected_immediately() {
        let mut draft = DraftEntry::with_clock(fixed_today);
        let err = draft
            .set_field(FieldUpdate::Amount(Some(Money::from_cents(-1))))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(draft.amount(), None);
        assert_eq!(draft.state(), DraftState::Empty);
    }

    #[test]
    fn test_blank_description_is_null() {
        let mut draft = DraftEntry::with_clock(fixed_today);
        draft
            .set_field(FieldUpdate::Description(Some("   ".into())))
            .unwrap();

        assert_eq!(draft.description(), None);
    }

    #[test]
    fn test_commit_appends_and_clears() {
        let (_temp, store) = create_test_store();
        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::Recurring(true)).unwrap();

        let outcome = draft.commit(&store).unwrap();

        let CommitOutcome::Committed(ledger) = outcome else {
            panic!("expected a committed entry");
        };
        assert_eq!(ledger.len(), 1);
        let txn = ledger.get(0).unwrap();
        assert_eq!(txn.description, "Market");
        assert_eq!(txn.amount, Money::from_cents(30000));
        assert_eq!(txn.date, fixed_today());
        assert!(txn.recurring);

        assert_eq!(draft.state(), DraftState::Empty);
        assert_eq!(draft.description(), None);
        assert!(!draft.recurring());

        // Durable before commit returned
        let reloaded = LedgerStore::new(store.path().to_path_buf()).load().unwrap();
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn test_commit_without_amount_is_noop() {
        let (_temp, store) = create_test_store();
        let before = store.load().unwrap();
        let mut draft = DraftEntry::with_clock(fixed_today);
        draft
            .set_field(FieldUpdate::Description(Some("Salary".into())))
            .unwrap();

        let outcome = draft.commit(&store).unwrap();

        assert_eq!(outcome, CommitOutcome::Incomplete);
        assert_eq!(draft.state(), DraftState::Editing);
        assert_eq!(draft.description(), Some("Salary"));
        assert_eq!(store.load().unwrap().len(), before.len());
    }

    #[test]
    fn test_commit_without_description_writes_nothing() {
        let (_temp, store) = create_test_store();
        let mut draft = DraftEntry::with_clock(fixed_today);
        draft
            .set_field(FieldUpdate::Amount(Some(Money::from_cents(100))))
            .unwrap();

        assert_eq!(draft.commit(&store).unwrap(), CommitOutcome::Incomplete);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_commit_rejects_category_of_other_kind() {
        let (_temp, store) = create_test_store();
        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::Kind(Kind::Income)).unwrap();

        let err = draft.commit(&store).unwrap_err();

        assert!(matches!(
            err,
            LedgerError::InvalidCategory {
                kind: Kind::Income,
                category: Category::Expense(ExpenseCategory::Food),
            }
        ));
        assert_eq!(draft.state(), DraftState::Editing);
        assert_eq!(draft.description(), Some("Market"));
        assert!(!store.path().exists());

        // Fixing the category lets the same draft go through
        draft
            .set_field(FieldUpdate::Category(Some(Category::Income(
                IncomeCategory::Commission,
            ))))
            .unwrap();
        assert!(matches!(
            draft.commit(&store).unwrap(),
            CommitOutcome::Committed(_)
        ));
    }

    #[test]
    fn test_missing_category_uses_kind_default() {
        let (_temp, store) = create_test_store();
        let mut draft = DraftEntry::with_clock(fixed_today);
        draft
            .set_field(FieldUpdate::Description(Some("Paycheck".into())))
            .unwrap();
        draft
            .set_field(FieldUpdate::Amount(Some(Money::from_cents(100000))))
            .unwrap();

        let CommitOutcome::Committed(ledger) = draft.commit(&store).unwrap() else {
            panic!("expected a committed entry");
        };
        assert_eq!(
            ledger.get(0).unwrap().category,
            Category::Income(IncomeCategory::Salary)
        );
    }

    #[test]
    fn test_clear_resets_without_touching_ledger() {
        let (_temp, store) = create_test_store();
        let mut draft = filled_draft();
        draft
            .set_field(FieldUpdate::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()))
            .unwrap();

        draft.clear();

        assert_eq!(draft.state(), DraftState::Empty);
        assert_eq!(draft.amount(), None);
        assert_eq!(draft.category(), None);
        assert_eq!(draft.date(), fixed_today());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_parse_updates() {
        assert_eq!(
            FieldUpdate::parse("kind", "despesa", Kind::Income).unwrap(),
            FieldUpdate::Kind(Kind::Expense)
        );
        assert_eq!(
            FieldUpdate::parse("amount", "12,50", Kind::Income).unwrap(),
            FieldUpdate::Amount(Some(Money::from_cents(1250)))
        );
        assert_eq!(
            FieldUpdate::parse("amount", "", Kind::Income).unwrap(),
            FieldUpdate::Amount(None)
        );
        assert_eq!(
            FieldUpdate::parse("category", "Transport", Kind::Expense).unwrap(),
            FieldUpdate::Category(Some(Category::Expense(ExpenseCategory::Transport)))
        );
        assert_eq!(
            FieldUpdate::parse("date", "05/01/2024", Kind::Income).unwrap(),
            FieldUpdate::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(
            FieldUpdate::parse("Credit", "yes", Kind::Income).unwrap(),
            FieldUpdate::Credit(true)
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(FieldUpdate::parse("amount", "lots", Kind::Income).is_err());
        assert!(FieldUpdate::parse("category", "Rent", Kind::Income).is_err());
        assert!(FieldUpdate::parse("date", "someday", Kind::Income).is_err());
        assert!(FieldUpdate::parse("payee", "x", Kind::Income).is_err());
    }
}
