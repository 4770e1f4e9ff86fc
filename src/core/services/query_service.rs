//! Filtered, sorted views over the ledger with aggregate totals.

use serde::Serialize;

use crate::{
    errors::Result,
    ledger::{MonthKey, Transaction, TransactionKind},
};

/// Month and free-text predicates applied to a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub month: Option<MonthKey>,
    pub search: Option<String>,
}

impl ViewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Builds a filter from raw form values, where empty strings mean unset.
    pub fn from_raw(month: &str, search: &str) -> Result<Self> {
        let month = match month.trim() {
            "" => None,
            value => Some(value.parse()?),
        };
        let search = Some(search.to_string()).filter(|term| !term.trim().is_empty());
        Ok(Self { month, search })
    }

    fn normalized_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
    }
}

/// Result of a query: the kept transactions and their totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    pub transactions: Vec<Transaction>,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub count: usize,
}

pub struct QueryService;

impl QueryService {
    /// Sorts by date (newest first, stable), filters, and totals.
    pub fn query(transactions: &[Transaction], filter: &ViewFilter) -> LedgerView {
        let mut kept = transactions.to_vec();
        kept.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(month) = filter.month {
            kept.retain(|txn| month.contains(txn.date));
        }

        if let Some(term) = filter.normalized_term() {
            kept.retain(|txn| matches_term(txn, &term));
        }

        let (total_income, total_expense) = Self::totals(&kept);
        LedgerView {
            count: kept.len(),
            transactions: kept,
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Income and expense sums over `transactions`.
    pub fn totals(transactions: &[Transaction]) -> (f64, f64) {
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                TransactionKind::Income => (income + txn.amount, expense),
                TransactionKind::Expense => (income, expense + txn.amount),
            })
    }
}

fn matches_term(txn: &Transaction, term: &str) -> bool {
    txn.description_or_empty().to_lowercase().contains(term)
        || txn.category.to_lowercase().contains(term)
}
