//! Ledger store
//!
//! Owns the ledger table on disk and the in-memory copy of it. The copy is
//! read on first access and replaced by every append; an append is written
//! to disk before it returns, so the store never holds unpersisted changes.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, Transaction, TransactionValidationError};

use super::file_io::write_atomic;
use super::table::{read_ledger, write_ledger};

/// Durable, cached ledger backed by a single table file
pub struct LedgerStore {
    path: PathBuf,
    audit: Option<AuditLogger>,
    cache: RwLock<Option<Ledger>>,
}

impl LedgerStore {
    /// Create a store for the table at `path`; nothing is read until first use
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            audit: None,
            cache: RwLock::new(None),
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Path of the backing table
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table from disk, replacing the cached copy
    ///
    /// A missing table is created empty and persisted right away.
    pub fn load(&self) -> LedgerResult<Ledger> {
        let mut cache = self.cache.write().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let ledger = self.read_or_bootstrap()?;
        *cache = Some(ledger.clone());
        Ok(ledger)
    }

    /// The cached ledger, loading it on first access
    pub fn ledger(&self) -> LedgerResult<Ledger> {
        {
            let cache = self.cache.read().map_err(|e| {
                LedgerError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(ledger) = cache.as_ref() {
                return Ok(ledger.clone());
            }
        }

        self.load()
    }

    /// Append an entry, persist the whole ledger and return the new state
    ///
    /// The write lock is held across the append and the write, so appends
    /// from several handles to the same store are serialized.
    pub fn append(&self, txn: Transaction) -> LedgerResult<Ledger> {
        validate_entry(&txn)?;

        let mut cache = self.cache.write().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let current = match cache.as_ref() {
            Some(ledger) => ledger.clone(),
            None => self.read_or_bootstrap()?,
        };

        let updated = current.with_appended(txn.clone());
        self.write_table(&updated)?;
        *cache = Some(updated.clone());

        tracing::info!(
            kind = %txn.kind,
            category = %txn.category,
            date = %txn.date,
            entries = updated.len(),
            "appended ledger entry"
        );
        self.audit(&AuditEntry::create(&txn, updated.len()));

        Ok(updated)
    }

    /// Atomically overwrite the table with `ledger` and make it the cached copy
    ///
    /// Every entry is validated first; a ledger that could not be read back
    /// is rejected without touching the file.
    pub fn persist(&self, ledger: &Ledger) -> LedgerResult<()> {
        for txn in ledger {
            validate_entry(txn)?;
        }

        let mut cache = self.cache.write().map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut sorted = ledger.clone();
        sorted.sort();
        self.write_table(&sorted)?;
        *cache = Some(sorted);
        Ok(())
    }

    fn read_or_bootstrap(&self) -> LedgerResult<Ledger> {
        if !self.path.exists() {
            let ledger = Ledger::new();
            self.write_table(&ledger)?;
            tracing::info!(path = %self.path.display(), "created empty ledger table");
            self.audit(&AuditEntry::initialize());
            return Ok(ledger);
        }

        let file = File::open(&self.path).map_err(|e| {
            LedgerError::StorageUnavailable(format!(
                "Failed to open {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let ledger = read_ledger(BufReader::new(file))?;
        tracing::debug!(
            path = %self.path.display(),
            entries = ledger.len(),
            "loaded ledger table"
        );
        Ok(ledger)
    }

    fn write_table(&self, ledger: &Ledger) -> LedgerResult<()> {
        write_atomic(&self.path, |writer| write_ledger(writer, ledger))?;
        tracing::debug!(
            path = %self.path.display(),
            entries = ledger.len(),
            "persisted ledger table"
        );
        Ok(())
    }

    // Runs after the table is written; failures are logged, never returned.
    fn audit(&self, entry: &AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(entry) {
                tracing::warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}

fn validate_entry(txn: &Transaction) -> LedgerResult<()> {
    txn.validate().map_err(|e| match e {
        TransactionValidationError::CategoryKindMismatch { kind, category } => {
            LedgerError::InvalidCategory { kind, category }
        }
        other => LedgerError::Validation(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Category, ExpenseCategory, IncomeCategory, Kind, Money};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("data").join("ledger.csv"))
            .with_audit(AuditLogger::new(temp_dir.path().join("audit.log")));
        (temp_dir, store)
    }

    fn expense(description: &str, cents: i64, when: NaiveDate) -> Transaction {
        Transaction::new(
            Kind::Expense,
            description,
            Money::from_cents(cents),
            Category::Expense(ExpenseCategory::Food),
            when,
        )
        .unwrap()
    }

    #[test]
    fn test_load_bootstraps_missing_table() {
        let (temp_dir, store) = create_test_store();

        let ledger = store.load().unwrap();

        assert!(ledger.is_empty());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "index;Ordem;Descrição;Valor;Categoria;Data;Fixo;Credito\n"
        );
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        assert_eq!(audit.read_all().unwrap()[0].operation, Operation::Initialize);
    }

    #[test]
    fn test_load_fails_when_location_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let store = LedgerStore::new(blocker.join("ledger.csv"));
        let err = store.load().unwrap_err();
        assert!(err.is_storage_unavailable());
    }

    #[test]
    fn test_load_of_unreadable_table_is_storage_unavailable() {
        let (_temp, store) = create_test_store();
        fs::create_dir_all(store.path()).unwrap();

        let err = store.load().unwrap_err();
        assert!(err.is_storage_unavailable());
    }

    #[test]
    fn test_append_persists_immediately() {
        let (_temp, store) = create_test_store();

        store.append(expense("Lunch", 2500, date(2024, 1, 10))).unwrap();

        let reopened = LedgerStore::new(store.path().to_path_buf());
        let ledger = reopened.load().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().description, "Lunch");
    }

    #[test]
    fn test_append_returns_sorted_ledger() {
        let (_temp, store) = create_test_store();

        store.append(expense("old", 100, date(2024, 1, 1))).unwrap();
        store.append(expense("new", 100, date(2024, 3, 1))).unwrap();
        let ledger = store.append(expense("mid", 100, date(2024, 2, 1))).unwrap();

        let order: Vec<_> = ledger.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
        assert_eq!(store.ledger().unwrap(), ledger);
    }

    #[test]
    fn test_append_rejects_mismatched_category() {
        let (_temp, store) = create_test_store();
        let mut txn = expense("Lunch", 2500, date(2024, 1, 10));
        txn.kind = Kind::Income;

        let err = store.append(txn).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCategory { .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_is_audited() {
        let (temp_dir, store) = create_test_store();

        store.append(expense("Lunch", 2500, date(2024, 1, 10))).unwrap();

        let entries = AuditLogger::new(temp_dir.path().join("audit.log"))
            .read_all()
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Create);
        assert_eq!(entries[1].ledger_len, 1);
    }

    #[test]
    fn test_round_trip_field_for_field() {
        let (_temp, store) = create_test_store();
        let salary = Transaction::new(
            Kind::Income,
            "Paycheck",
            Money::from_cents(100000),
            Category::Income(IncomeCategory::Salary),
            date(2024, 1, 5),
        )
        .unwrap()
        .with_recurring(true);
        let card = expense("Dinner", 8990, date(2024, 1, 5)).with_credit(true);

        store.append(salary).unwrap();
        let written = store.append(card).unwrap();

        let read_back = LedgerStore::new(store.path().to_path_buf()).load().unwrap();
        assert_eq!(read_back, written);
    }

    #[test]
    fn test_persist_sorted_ledger_is_byte_identical() {
        let (_temp, store) = create_test_store();
        store.append(expense("a", 100, date(2024, 1, 1))).unwrap();
        store.append(expense("b", 200, date(2024, 1, 1))).unwrap();
        let ledger = store.append(expense("c", 300, date(2024, 2, 1))).unwrap();
        let before = fs::read(store.path()).unwrap();

        store.persist(&ledger).unwrap();
        store.persist(&store.load().unwrap()).unwrap();

        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_persist_rejects_entry_that_would_not_load() {
        let (_temp, store) = create_test_store();
        let written = store.append(expense("Lunch", 2500, date(2024, 1, 10))).unwrap();
        let before = fs::read(store.path()).unwrap();

        let mut mismatched = expense("Market", 30000, date(2024, 1, 12));
        mismatched.kind = Kind::Income;
        let mut blank = expense("Bus", 500, date(2024, 1, 13));
        blank.description = "  ".into();

        for bad in [mismatched, blank] {
            let ledger = written.with_appended(bad);
            let err = store.persist(&ledger).unwrap_err();
            assert!(err.is_validation());
        }

        // The table and the cache still hold the last valid state
        assert_eq!(fs::read(store.path()).unwrap(), before);
        assert_eq!(store.ledger().unwrap(), written);
        assert_eq!(store.load().unwrap(), written);
    }

    #[test]
    fn test_ledger_is_cached_after_first_access() {
        let (_temp, store) = create_test_store();
        store.append(expense("Lunch", 2500, date(2024, 1, 10))).unwrap();

        // Removing the file behind the store's back does not affect the cache
        fs::remove_file(store.path()).unwrap();
        assert_eq!(store.ledger().unwrap().len(), 1);

        // An explicit load goes back to disk (and bootstraps again)
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_table_fails_load() {
        let (_temp, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "index;Ordem;Descrição;Valor;Categoria;Data;Fixo;Credito\n0;DESPESA;x;1.00;Outros;not-a-date;0;0\n",
        )
        .unwrap();

        assert!(matches!(
            store.load(),
            Err(LedgerError::CorruptRecord { row: 1, .. })
        ));
    }
}
