//! Persistence contracts for candidates, voters and votes.
//!
//! Stores hold records and nothing more: the one-vote-per-voter rule lives in
//! [`VotingService`](crate::service::VotingService). Every read hands back an
//! owned snapshot, so callers can never reach into a store's internals.

mod memory;

pub use memory::{InMemoryCandidateStore, InMemoryVoteStore, InMemoryVoterStore};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Candidate, Vote, Voter};
use crate::validation::ValidationError;

pub trait CandidateStore: Send + Sync {
    /// Stores the candidate, replacing any record with the same id in place.
    fn add(&self, candidate: Candidate) -> Result<()>;
    /// All candidates in insertion order.
    fn find_all(&self) -> Result<Vec<Candidate>>;
    fn find_by_id(&self, id: &str) -> Result<Option<Candidate>>;
    fn exists(&self, id: &str) -> Result<bool>;
    fn clear(&self) -> Result<()>;
}

pub trait VoterStore: Send + Sync {
    /// Stores the voter, replacing any record with the same id in place.
    fn register(&self, voter: Voter) -> Result<()>;
    /// All voters in registration order.
    fn find_all(&self) -> Result<Vec<Voter>>;
    fn find_by_id(&self, id: &str) -> Result<Option<Voter>>;
    fn is_registered(&self, id: &str) -> Result<bool>;
    fn clear(&self) -> Result<()>;
}

pub trait VoteStore: Send + Sync {
    /// Appends the vote. Uniqueness per voter is not checked here.
    fn save(&self, vote: Vote) -> Result<()>;
    /// All votes in the order they were saved.
    fn find_all(&self) -> Result<Vec<Vote>>;
    fn count(&self) -> Result<usize>;
    fn has_voted(&self, voter_id: &str) -> Result<bool>;
    fn clear(&self) -> Result<()>;
}

/// The closed set of store families that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
}

impl StoreBackend {
    pub const fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
        }
    }

    pub fn create(self) -> Stores {
        match self {
            StoreBackend::Memory => Stores {
                candidates: Arc::new(InMemoryCandidateStore::default()),
                voters: Arc::new(InMemoryVoterStore::default()),
                votes: Arc::new(InMemoryVoteStore::default()),
            },
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankBackend);
        }
        match name.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ValidationError::UnknownBackend(name.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One handle per entity type, all from the same backend.
#[derive(Clone)]
pub struct Stores {
    pub candidates: Arc<dyn CandidateStore>,
    pub voters: Arc<dyn VoterStore>,
    pub votes: Arc<dyn VoteStore>,
}
