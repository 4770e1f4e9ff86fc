//! Ledger domain models, persistence-friendly types, and helpers.

pub mod category;
pub mod month;
pub mod transaction;

pub use category::DEFAULT_CATEGORIES;
pub use month::MonthKey;
pub use transaction::{
    round_to_cents, NewTransaction, Transaction, TransactionKind, TransactionPatch,
};
