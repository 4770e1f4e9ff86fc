//! Ledger state, derived views, and the command surface built on them.

pub mod ledger_store;
pub mod sample;
pub mod services;
pub mod session;
pub mod time;

pub use ledger_store::LedgerStore;
pub use session::LedgerSession;
pub use time::{Clock, FixedClock, SystemClock};
