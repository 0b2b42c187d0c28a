//! Matching engine joining ledger entries to statement lines by identifier

pub mod engine;
pub mod index;

pub use engine::*;
pub use index::*;
