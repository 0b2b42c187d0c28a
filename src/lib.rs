//! # Reconciliation Core
//!
//! Reconciles a ledger of internal ("system") transactions against one or
//! more bank statement feeds.
//!
//! ## Features
//!
//! - **Record parsing**: CSV ledger and statement feeds with per-row warnings
//! - **Date range filtering**: one filter for every record shape via [`Dated`]
//! - **Matching**: exact identifier join with absolute discrepancy totals
//! - **Duplicate awareness**: identifiers shared across feeds are reported, not dropped
//! - **Reporting**: unmatched records grouped by feed, text summary and JSON envelope
//! - **Source abstraction**: files, raw buffers or in-memory records via [`RecordSource`]
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{MemorySource, ReconcileConfig, Reconciler};
//!
//! # async fn demo() -> Result<(), reconciliation_core::ReconcileError> {
//! let source = MemorySource::from_csv(
//!     "trx_id,amount,type,transaction_time\nT1,100,DEBIT,2024-01-01 10:00:00\n",
//!     &[("BCA", "unique_identifier,amount,date\nT1,100,2024-01-01\n")],
//!     &ReconcileConfig::default(),
//! )?;
//!
//! let reconciler = Reconciler::default();
//! let range = reconciler.date_range("2024-01-01", "2024-01-31")?;
//! let report = reconciler.run(&source, &range).await?;
//! assert_eq!(report.matched, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod filter;
pub mod matching;
pub mod parser;
pub mod reconciler;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use filter::*;
pub use matching::*;
pub use parser::*;
pub use reconciler::*;
pub use report::*;
pub use traits::*;
pub use types::*;
pub use utils::*;
