use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::error;

use super::{CandidateStore, VoteStore, VoterStore};
use crate::error::{Error, Result};
use crate::models::{Candidate, Vote, Voter};

fn acquire<'a, T>(lock: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>> {
    lock.lock().map_err(|e| {
        error!("Failed to acquire {} lock: {}", store, e);
        Error::storage(format!("{} is unavailable", store))
    })
}

/// Keyed records that remember insertion order. Re-inserting a key replaces
/// the record but keeps its original slot.
#[derive(Debug)]
struct Ordered<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Clone> Ordered<T> {
    fn put(&mut self, key: &str, record: T) {
        match self.index.get(key) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(key.to_string(), self.records.len());
                self.records.push(record);
            }
        }
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&slot| &self.records[slot])
    }

    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}

impl<T> Default for Ordered<T> {
    fn default() -> Self {
        Self { records: Vec::new(), index: HashMap::new() }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCandidateStore {
    candidates: Mutex<Ordered<Candidate>>,
}

impl CandidateStore for InMemoryCandidateStore {
    fn add(&self, candidate: Candidate) -> Result<()> {
        let mut candidates = acquire(&self.candidates, "candidate store")?;
        let id = candidate.id().to_string();
        candidates.put(&id, candidate);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Candidate>> {
        Ok(acquire(&self.candidates, "candidate store")?.records.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Candidate>> {
        Ok(acquire(&self.candidates, "candidate store")?.get(id).cloned())
    }

    fn exists(&self, id: &str) -> Result<bool> {
        Ok(acquire(&self.candidates, "candidate store")?.contains(id))
    }

    fn clear(&self) -> Result<()> {
        acquire(&self.candidates, "candidate store")?.clear();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryVoterStore {
    voters: Mutex<Ordered<Voter>>,
}

impl VoterStore for InMemoryVoterStore {
    fn register(&self, voter: Voter) -> Result<()> {
        let mut voters = acquire(&self.voters, "voter store")?;
        let id = voter.id().to_string();
        voters.put(&id, voter);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Voter>> {
        Ok(acquire(&self.voters, "voter store")?.records.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Voter>> {
        Ok(acquire(&self.voters, "voter store")?.get(id).cloned())
    }

    fn is_registered(&self, id: &str) -> Result<bool> {
        Ok(acquire(&self.voters, "voter store")?.contains(id))
    }

    fn clear(&self) -> Result<()> {
        acquire(&self.voters, "voter store")?.clear();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Ballots {
    votes: Vec<Vote>,
    voter_ids: HashSet<String>,
}

/// Append-only vote log. The set of voter ids is kept beside the log and
/// updated under the same lock, so `has_voted` never disagrees with `find_all`.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    ballots: Mutex<Ballots>,
}

impl VoteStore for InMemoryVoteStore {
    fn save(&self, vote: Vote) -> Result<()> {
        let mut ballots = acquire(&self.ballots, "vote store")?;
        ballots.voter_ids.insert(vote.voter_id().to_string());
        ballots.votes.push(vote);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Vote>> {
        Ok(acquire(&self.ballots, "vote store")?.votes.clone())
    }

    fn count(&self) -> Result<usize> {
        Ok(acquire(&self.ballots, "vote store")?.votes.len())
    }

    fn has_voted(&self, voter_id: &str) -> Result<bool> {
        Ok(acquire(&self.ballots, "vote store")?.voter_ids.contains(voter_id))
    }

    fn clear(&self) -> Result<()> {
        let mut ballots = acquire(&self.ballots, "vote store")?;
        ballots.votes.clear();
        ballots.voter_ids.clear();
        Ok(())
    }
}
