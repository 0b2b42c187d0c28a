//! Keyed join of ledger entries against statement lines

use bigdecimal::BigDecimal;

use super::index::{abs_diff, StatementIndex};
use crate::report::ReconciliationReport;
use crate::types::*;

/// Raw result of a matching pass, before aggregation into a report
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Ledger entries examined
    pub total_processed: usize,
    pub matched: usize,
    /// Sum of absolute per-pair amount differences
    pub discrepancies: BigDecimal,
    pub unmatched_ledger: Vec<LedgerEntry>,
    /// Statement lines no ledger entry claimed, in arrival order
    pub unmatched_statements: Vec<StatementEntry>,
    pub ambiguous: Vec<AmbiguousMatch>,
}

impl MatchOutcome {
    fn empty() -> Self {
        Self {
            total_processed: 0,
            matched: 0,
            discrepancies: BigDecimal::from(0),
            unmatched_ledger: Vec::new(),
            unmatched_statements: Vec::new(),
            ambiguous: Vec::new(),
        }
    }
}

/// Matching engine for ledger against statement reconciliation.
///
/// Holds no state between runs; every call builds its own index.
#[derive(Debug, Clone, Copy)]
pub struct MatchingEngine;

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Match every ledger entry to at most one statement line with the same identifier
    pub fn match_entries(
        &self,
        ledger: Vec<LedgerEntry>,
        statements: Vec<StatementEntry>,
    ) -> MatchOutcome {
        let mut index: StatementIndex = statements.into_iter().collect();
        let indexed = index.len();

        let mut outcome = ledger
            .into_iter()
            .fold(MatchOutcome::empty(), |mut outcome, entry| {
                outcome.total_processed += 1;
                let magnitude = entry.magnitude();

                match index.take_closest(&entry.id, &magnitude) {
                    Some(taken) => {
                        outcome.matched += 1;
                        outcome.discrepancies += abs_diff(&magnitude, &taken.entry.amount);

                        if taken.is_ambiguous() {
                            log::warn!(
                                "identifier {} found in {} statement lines ({}), matched against {}",
                                entry.id,
                                taken.candidate_feeds.len(),
                                taken.candidate_feeds.join(", "),
                                taken.entry.feed
                            );
                            outcome.ambiguous.push(AmbiguousMatch {
                                identifier: entry.id.clone(),
                                feeds: taken.candidate_feeds,
                                chosen_feed: taken.entry.feed,
                            });
                        }
                    }
                    None => outcome.unmatched_ledger.push(entry),
                }
                outcome
            });

        outcome.unmatched_statements = index.into_remaining();

        log::debug!(
            "matched {} of {} ledger entries against {} statement lines",
            outcome.matched,
            outcome.total_processed,
            indexed
        );
        outcome
    }

    /// Match and aggregate into a report
    pub fn reconcile(
        &self,
        ledger: Vec<LedgerEntry>,
        statements: Vec<StatementEntry>,
    ) -> ReconciliationReport {
        ReconciliationReport::from_outcome(self.match_entries(ledger, statements), Vec::new())
    }
}
