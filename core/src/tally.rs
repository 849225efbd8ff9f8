use std::collections::HashMap;

use crate::models::Vote;

/// Converts a sequence of votes into per-candidate totals.
pub trait TallyStrategy: Send + Sync {
    fn count(&self, votes: &[Vote]) -> Tally;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TallyEntry {
    total: u64,
    order: u64,
}

/// Per-candidate totals. Each candidate remembers when it was first counted;
/// that order breaks ties wherever a single leader is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: HashMap<String, TallyEntry>,
    next_order: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, candidate_id: &str, weight: u64) {
        if let Some(entry) = self.entries.get_mut(candidate_id) {
            entry.total += weight;
            return;
        }
        self.entries.insert(candidate_id.to_string(), TallyEntry { total: weight, order: self.next_order });
        self.next_order += 1;
    }

    pub fn get(&self, candidate_id: &str) -> Option<u64> {
        self.entries.get(candidate_id).map(|e| e.total)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Sum of all weights handed out.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|e| e.total).sum()
    }

    /// Entries in the order candidates were first counted.
    pub fn entries(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|(_, e)| e.order);
        sorted.into_iter().map(|(id, e)| (id.as_str(), e.total)).collect()
    }

    /// Entries by descending total; equal totals keep first-counted order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|(_, a), (_, b)| b.total.cmp(&a.total).then_with(|| a.order.cmp(&b.order)));
        sorted.into_iter().map(|(id, e)| (id.as_str(), e.total)).collect()
    }

    /// The highest total, or `None` for an empty tally.
    pub fn leader(&self) -> Option<(&str, u64)> {
        self.ranked().into_iter().next()
    }
}

impl<'a> FromIterator<(&'a str, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (id, weight) in iter {
            tally.add(id, weight);
        }
        tally
    }
}

/// One point per vote.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plurality;

impl TallyStrategy for Plurality {
    fn count(&self, votes: &[Vote]) -> Tally {
        votes.iter().map(|v| (v.candidate_id(), 1u64)).collect()
    }

    fn name(&self) -> &'static str {
        "Plurality (Simple Majority)"
    }
}

/// Weights each vote by its 1-based position in cast order, so later votes
/// count for more. This is not instant-runoff: voters express a single choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionWeighted;

impl TallyStrategy for PositionWeighted {
    fn count(&self, votes: &[Vote]) -> Tally {
        let mut sorted: Vec<&Vote> = votes.iter().collect();
        // stable: equal timestamps keep their stored order
        sorted.sort_by_key(|v| v.cast_at());
        sorted.into_iter()
            .zip(1u64..)
            .map(|(v, weight)| (v.candidate_id(), weight))
            .collect()
    }

    fn name(&self) -> &'static str {
        "Ranked Choice (Weighted by Order)"
    }
}
