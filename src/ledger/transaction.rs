use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense entry.
///
/// Field names on disk follow the stored layout (`type`, `desc`, `created`);
/// `description` and `createdAt` are accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(
        rename = "desc",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "created", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction with a freshly generated id.
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_id(),
            kind,
            amount: round_to_cents(amount),
            category: category.into(),
            date,
            description: None,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(Some(description.into()));
        self
    }

    /// Description text, empty when none was recorded.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Checks the field constraints every ledger entry must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(LedgerError::Validation("transaction id is empty".into()));
        }
        validate_amount(self.amount)?;
        validate_category(&self.category)?;
        Ok(())
    }
}

/// User-supplied fields for a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date: Some(date),
            description: None,
        }
    }

    pub fn income(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Income, amount, category, date)
    }

    pub fn expense(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Expense, amount, category, date)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the input and turns it into a ledger entry.
    pub fn into_transaction(self, created_at: DateTime<Utc>) -> Result<Transaction> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::Validation(
                "enter a valid amount greater than zero".into(),
            ));
        }
        let amount = round_to_cents(self.amount);
        validate_amount(amount)?;
        let date = self
            .date
            .ok_or_else(|| LedgerError::Validation("choose a date".into()))?;
        let category = self.category.trim().to_string();
        validate_category(&category)?;
        Ok(Transaction {
            id: generate_id(),
            kind: self.kind,
            amount,
            category,
            date,
            description: normalize_description(self.description),
            created_at,
        })
    }
}

/// Partial edit of an existing transaction.
///
/// `amount` carries the raw text the user typed; values that do not parse to
/// a positive number are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<String>,
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, raw: impl Into<String>) -> Self {
        self.amount = Some(raw.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parsed, rounded amount if the raw text is usable.
    pub fn parsed_amount(&self) -> Option<f64> {
        let value: f64 = self.amount.as_deref()?.trim().parse().ok()?;
        let rounded = round_to_cents(value);
        validate_amount(rounded).ok().map(|_| rounded)
    }

    /// Applies the usable fields to `txn`.
    pub fn apply(&self, txn: &mut Transaction) {
        match (self.amount.as_deref(), self.parsed_amount()) {
            (_, Some(amount)) => txn.amount = amount,
            (Some(raw), None) => {
                tracing::debug!(id = %txn.id, raw, "ignoring unusable amount edit");
            }
            (None, None) => {}
        }
        if let Some(description) = &self.description {
            txn.description = Some(description.clone());
        }
    }
}

/// Rounds to two fractional digits, halves away from zero.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "amount must be greater than zero, got {amount}"
        )))
    }
}

fn validate_category(category: &str) -> Result<()> {
    if category.trim().is_empty() {
        Err(LedgerError::Validation("category must not be empty".into()))
    } else {
        Ok(())
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
    }

    #[test]
    fn input_rounds_amount_and_trims_text() {
        let txn = NewTransaction::expense(12.345, " Food ", date())
            .with_description("  Lunch  ")
            .into_transaction(created())
            .expect("valid input");
        assert_eq!(txn.amount, 12.35);
        assert_eq!(txn.category, "Food");
        assert_eq!(txn.description.as_deref(), Some("Lunch"));
        assert_eq!(txn.created_at, created());
    }

    #[test]
    fn input_rejects_non_positive_amounts() {
        for amount in [0.0, -5.0, 0.001, f64::NAN, f64::INFINITY] {
            let err = NewTransaction::income(amount, "Salary", date())
                .into_transaction(created())
                .expect_err("amount must be rejected");
            assert!(matches!(err, LedgerError::Validation(_)), "{amount}: {err:?}");
        }
    }

    #[test]
    fn input_requires_date_and_category() {
        let mut missing_date = NewTransaction::income(10.0, "Salary", date());
        missing_date.date = None;
        assert!(matches!(
            missing_date.into_transaction(created()),
            Err(LedgerError::Validation(_))
        ));

        let blank_category = NewTransaction::income(10.0, "   ", date());
        assert!(matches!(
            blank_category.into_transaction(created()),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn blank_description_is_dropped() {
        let txn = NewTransaction::income(10.0, "Salary", date())
            .with_description("   ")
            .into_transaction(created())
            .unwrap();
        assert_eq!(txn.description, None);
    }

    #[test]
    fn patch_ignores_unusable_amounts() {
        let mut txn = Transaction::new(TransactionKind::Expense, 20.0, "Food", date(), created());
        for raw in ["abc", "12abc", "1,5", "", "-3", "0", "NaN", "inf"] {
            TransactionPatch::new().amount(raw).apply(&mut txn);
            assert_eq!(txn.amount, 20.0, "{raw} must be ignored");
        }
        TransactionPatch::new()
            .amount(" 19.999 ")
            .description("Dinner")
            .apply(&mut txn);
        assert_eq!(txn.amount, 20.0);
        TransactionPatch::new().amount("7.125").apply(&mut txn);
        assert_eq!(txn.amount, 7.13);
        assert_eq!(txn.description.as_deref(), Some("Dinner"));
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let mut txn = Transaction::new(TransactionKind::Income, 30000.0, "Salary", date(), created())
            .with_description("Monthly salary");
        txn.id = "a1".into();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["desc"], "Monthly salary");
        assert_eq!(json["date"], "2024-01-05");
        assert!(json.get("created").is_some());

        let legacy = r#"{"id":"x","type":"expense","amount":5,"category":"Food",
            "date":"2024-02-01","description":"Tea","createdAt":"2024-02-01T08:00:00Z"}"#;
        let parsed: Transaction = serde_json::from_str(legacy).unwrap();
        assert_eq!(parsed.description.as_deref(), Some("Tea"));
        assert_eq!(parsed.kind, TransactionKind::Expense);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
