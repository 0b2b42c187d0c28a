//! Multi-valued lookup of statement lines by identifier

use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::types::StatementEntry;

/// Statement lines keyed by identifier.
///
/// An identifier may occur in several feeds; every occurrence is kept in
/// arrival order so none is lost to a later one.
#[derive(Debug, Clone, Default)]
pub struct StatementIndex {
    by_id: HashMap<String, Vec<(usize, StatementEntry)>>,
    len: usize,
}

/// A statement line removed from the index by a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Taken {
    pub entry: StatementEntry,
    /// Feeds of all candidates that shared the identifier, chosen one included
    pub candidate_feeds: Vec<String>,
}

impl Taken {
    pub fn is_ambiguous(&self) -> bool {
        self.candidate_feeds.len() > 1
    }
}

impl StatementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statement lines still in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove and return the candidate for `id` closest in amount to `amount`.
    ///
    /// Ties go to the earliest arrival.
    pub fn take_closest(&mut self, id: &str, amount: &BigDecimal) -> Option<Taken> {
        let candidates = self.by_id.get_mut(id)?;
        let candidate_feeds = candidates.iter().map(|(_, e)| e.feed.clone()).collect();

        let best = candidates
            .iter()
            .enumerate()
            .min_by(|(_, (seq_a, a)), (_, (seq_b, b))| {
                abs_diff(amount, &a.amount)
                    .cmp(&abs_diff(amount, &b.amount))
                    .then(seq_a.cmp(seq_b))
            })
            .map(|(position, _)| position)?;

        let (_, entry) = candidates.remove(best);
        if candidates.is_empty() {
            self.by_id.remove(id);
        }
        self.len -= 1;

        Some(Taken {
            entry,
            candidate_feeds,
        })
    }

    /// Everything never taken, in arrival order
    pub fn into_remaining(self) -> Vec<StatementEntry> {
        let mut rest: Vec<(usize, StatementEntry)> =
            self.by_id.into_values().flatten().collect();
        rest.sort_by_key(|(seq, _)| *seq);
        rest.into_iter().map(|(_, entry)| entry).collect()
    }
}

impl FromIterator<StatementEntry> for StatementIndex {
    fn from_iter<I: IntoIterator<Item = StatementEntry>>(iter: I) -> Self {
        iter.into_iter()
            .enumerate()
            .fold(StatementIndex::new(), |mut index, (seq, entry)| {
                index
                    .by_id
                    .entry(entry.id.clone())
                    .or_default()
                    .push((seq, entry));
                index.len += 1;
                index
            })
    }
}

/// Absolute difference of two amounts
pub fn abs_diff(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    if a > b {
        a - b
    } else {
        b - a
    }
}
