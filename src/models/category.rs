//! Entry kinds and their category vocabularies
//!
//! Every entry is either income or an expense, and each kind has its own
//! closed set of categories. `Category` carries the kind it belongs to, so a
//! mismatch can only be expressed by pairing a `Kind` with a category of the
//! other kind, which `Category::belongs_to` detects.
//!
//! Each category has a display name (English) and a stored label used in the
//! ledger file. Parsing accepts either, case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an entry adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Income,
    Expense,
}

impl Kind {
    /// Both kinds, income first
    pub fn all() -> &'static [Kind] {
        &[Kind::Income, Kind::Expense]
    }

    /// Label written to the ledger file
    pub fn stored_label(&self) -> &'static str {
        match self {
            Self::Income => "RECEITA",
            Self::Expense => "DESPESA",
        }
    }

    /// Categories valid for this kind, in form order
    pub fn categories(&self) -> Vec<Category> {
        match self {
            Self::Income => IncomeCategory::all()
                .iter()
                .copied()
                .map(Category::Income)
                .collect(),
            Self::Expense => ExpenseCategory::all()
                .iter()
                .copied()
                .map(Category::Expense)
                .collect(),
        }
    }

    /// The category an entry form preselects for this kind
    pub fn default_category(&self) -> Category {
        match self {
            Self::Income => Category::Income(IncomeCategory::Salary),
            Self::Expense => Category::Expense(ExpenseCategory::Study),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for Kind {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(Self::Income),
            "expense" | "despesa" => Ok(Self::Expense),
            _ => Err(CategoryParseError::UnknownKind(s.to_string())),
        }
    }
}

/// Categories available to income entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Salary,
    Transport,
    Commission,
}

impl IncomeCategory {
    pub fn all() -> &'static [IncomeCategory] {
        &[Self::Salary, Self::Transport, Self::Commission]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Transport => "Transport",
            Self::Commission => "Commission",
        }
    }

    pub fn stored_label(&self) -> &'static str {
        match self {
            Self::Salary => "Salário",
            Self::Transport => "Transporte",
            Self::Commission => "Comissão",
        }
    }
}

/// Categories available to expense entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Study,
    Transport,
    Housing,
    Other,
    Food,
    Entertainment,
    Investment,
    Leisure,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Study,
            Self::Transport,
            Self::Housing,
            Self::Other,
            Self::Food,
            Self::Entertainment,
            Self::Investment,
            Self::Leisure,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Other => "Other",
            Self::Food => "Food",
            Self::Entertainment => "Entertainment",
            Self::Investment => "Investment",
            Self::Leisure => "Leisure",
        }
    }

    pub fn stored_label(&self) -> &'static str {
        match self {
            Self::Study => "Estudo",
            Self::Transport => "Transporte",
            Self::Housing => "Casa",
            Self::Other => "Outros",
            Self::Food => "Alimentação",
            Self::Entertainment => "Skin",
            Self::Investment => "Investimento",
            Self::Leisure => "Lazer",
        }
    }
}

/// A category tagged with the kind whose vocabulary it comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    /// The kind whose vocabulary contains this category
    pub fn kind(&self) -> Kind {
        match self {
            Self::Income(_) => Kind::Income,
            Self::Expense(_) => Kind::Expense,
        }
    }

    /// Check whether this category is valid for entries of `kind`
    pub fn belongs_to(&self, kind: Kind) -> bool {
        self.kind() == kind
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Income(c) => c.name(),
            Self::Expense(c) => c.name(),
        }
    }

    /// Label written to the ledger file
    pub fn stored_label(&self) -> &'static str {
        match self {
            Self::Income(c) => c.stored_label(),
            Self::Expense(c) => c.stored_label(),
        }
    }

    /// Check whether `label` names this category in either form
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.name().eq_ignore_ascii_case(label)
            || self.stored_label().to_lowercase() == label.to_lowercase()
    }

    /// Resolve a label within the vocabulary of one kind
    pub fn parse_for(kind: Kind, label: &str) -> Result<Self, CategoryParseError> {
        kind.categories()
            .into_iter()
            .find(|c| c.matches_label(label))
            .ok_or_else(|| CategoryParseError::UnknownCategory(label.to_string()))
    }

    /// Resolve a label against both vocabularies
    ///
    /// Labels shared by both kinds ("Transport") resolve to the `preferred`
    /// kind's category.
    pub fn parse_any(label: &str, preferred: Kind) -> Result<Self, CategoryParseError> {
        Self::parse_for(preferred, label).or_else(|_| {
            Kind::all()
                .iter()
                .filter(|k| **k != preferred)
                .find_map(|k| Self::parse_for(*k, label).ok())
                .ok_or_else(|| CategoryParseError::UnknownCategory(label.to_string()))
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error type for kind and category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    UnknownKind(String),
    UnknownCategory(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(s) => write!(f, "Unknown entry kind: {}", s),
            Self::UnknownCategory(s) => write!(f, "Unknown category: {}", s),
        }
    }
}

impl std::error::Error for CategoryParseError {}
