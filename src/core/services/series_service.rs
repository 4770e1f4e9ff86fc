use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::{MonthKey, Transaction, TransactionKind};

/// Default length of the trailing month window.
pub const DEFAULT_MONTHS_BACK: usize = 6;

/// Longest window the series will build, ten years of months.
pub const MAX_MONTHS_BACK: usize = 120;

/// Income and expense sums per month, as parallel sequences ready to chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub months: Vec<MonthKey>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

impl MonthlySeries {
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(ToString::to_string).collect()
    }
}

pub struct SeriesService;

impl SeriesService {
    /// Buckets the whole ledger into the `months_back` months ending at
    /// `reference`'s month, capped at [`MAX_MONTHS_BACK`]. Transactions outside
    /// the window are skipped.
    pub fn monthly_series(
        transactions: &[Transaction],
        reference: NaiveDate,
        months_back: usize,
    ) -> MonthlySeries {
        let months = MonthKey::of(reference).trailing(months_back.min(MAX_MONTHS_BACK));
        let mut income = vec![0.0; months.len()];
        let mut expense = vec![0.0; months.len()];

        for txn in transactions {
            let key = MonthKey::of(txn.date);
            let Some(idx) = months.iter().position(|month| *month == key) else {
                continue;
            };
            match txn.kind {
                TransactionKind::Income => income[idx] += txn.amount,
                TransactionKind::Expense => expense[idx] += txn.amount,
            }
        }

        MonthlySeries {
            months,
            income,
            expense,
        }
    }
}
