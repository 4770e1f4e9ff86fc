use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::ledger::{Transaction, TransactionKind};

/// Demo entries: kind, amount, category, description, days before today.
const SAMPLE_ENTRIES: &[(TransactionKind, f64, &str, &str, i64)] = &[
    (TransactionKind::Income, 30000.0, "Salary", "Monthly salary", 0),
    (TransactionKind::Expense, 450.0, "Food", "Lunch", 1),
    (TransactionKind::Expense, 1200.0, "Transport", "Monthly pass", 2),
    (TransactionKind::Expense, 800.0, "Shopping", "Shoes", 5),
    (TransactionKind::Income, 5000.0, "Freelance", "Project", 10),
];

/// Builds the demo batch dated relative to `today`.
pub fn sample_batch(today: NaiveDate, created_at: DateTime<Utc>) -> Vec<Transaction> {
    SAMPLE_ENTRIES
        .iter()
        .map(|&(kind, amount, category, description, days_ago)| {
            Transaction::new(kind, amount, category, today - Duration::days(days_ago), created_at)
                .with_description(description)
        })
        .collect()
}
