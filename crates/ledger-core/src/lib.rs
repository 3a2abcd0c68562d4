//! Hash-linked ledger where every block carries one signed transfer and is
//! admitted only after a proof-of-work search.

pub mod block;
pub mod chain;
pub mod constants;
pub mod error;
pub mod pow;
pub mod transaction;
pub mod wallet;

pub use block::{Block, Hash};
pub use chain::{Appended, Chain, Clock, FixedClock, SystemClock};
pub use error::{LedgerError, Result};
pub use transaction::Transaction;
pub use wallet::{verify_signature, Wallet};
