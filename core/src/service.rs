use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::models::{Candidate, Vote, Voter};
use crate::observer::VoteObserver;
use crate::store::{CandidateStore, StoreBackend, Stores, VoteStore, VoterStore};
use crate::tally::{Tally, TallyStrategy};
use crate::validation::require_non_blank;

/// The only path through which votes are cast.
///
/// Casting and resetting run under one coordinator-wide lock, from the
/// existence checks through the save, so a voter can never end up with two
/// stored votes even when casts race. Observers are notified after that lock
/// is released and may call back into the service.
pub struct VotingService {
    votes: Arc<dyn VoteStore>,
    candidates: Arc<dyn CandidateStore>,
    voters: Arc<dyn VoterStore>,
    observers: RwLock<Vec<Arc<dyn VoteObserver>>>,
    ballot_box: Mutex<()>,
}

impl VotingService {
    pub fn new(
        votes: Arc<dyn VoteStore>,
        candidates: Arc<dyn CandidateStore>,
        voters: Arc<dyn VoterStore>,
    ) -> Self {
        Self {
            votes,
            candidates,
            voters,
            observers: RwLock::new(Vec::new()),
            ballot_box: Mutex::new(()),
        }
    }

    pub fn with_stores(stores: Stores) -> Self {
        Self::new(stores.votes, stores.candidates, stores.voters)
    }

    pub fn with_backend(backend: StoreBackend) -> Self {
        Self::with_stores(backend.create())
    }

    // Guards no data of its own, so a poisoned lock is still usable.
    fn ballot_box(&self) -> MutexGuard<'_, ()> {
        self.ballot_box.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_candidate(&self, id: &str, name: &str) -> Result<()> {
        let candidate = Candidate::new(id, name)?;
        self.candidates.add(candidate)?;
        info!("✓ Candidate added: {}", name);
        Ok(())
    }

    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        self.candidates.find_all()
    }

    pub fn register_voter(&self, id: &str, name: &str) -> Result<()> {
        let voter = Voter::new(id, name)?;
        self.voters.register(voter)?;
        info!("✓ Voter registered: {}", id);
        Ok(())
    }

    pub fn voters(&self) -> Result<Vec<Voter>> {
        self.voters.find_all()
    }

    pub fn has_voted(&self, voter_id: &str) -> Result<bool> {
        self.votes.has_voted(voter_id)
    }

    /// Records `voter_id`'s vote for `candidate_id` and returns the stored
    /// snapshot.
    ///
    /// Checks run in a fixed order: blank ids, unknown voter, unknown
    /// candidate, then an earlier vote by the same voter. A voter who already
    /// voted and names an unknown candidate therefore gets `NotFound`.
    pub fn cast_vote(&self, voter_id: &str, candidate_id: &str) -> Result<Vote> {
        require_non_blank("Voter ID", voter_id)?;
        require_non_blank("Candidate ID", candidate_id)?;

        let vote = {
            let _guard = self.ballot_box();

            let voter = self.voters.find_by_id(voter_id)?.ok_or_else(|| {
                debug!("Rejected vote from unregistered voter {}", voter_id);
                Error::not_found("Voter not registered", voter_id)
            })?;

            let candidate = self.candidates.find_by_id(candidate_id)?.ok_or_else(|| {
                debug!("Rejected vote for unknown candidate {}", candidate_id);
                Error::not_found("Candidate does not exist", candidate_id)
            })?;

            if self.votes.has_voted(voter_id)? {
                debug!("Rejected second vote from {}", voter_id);
                return Err(Error::conflict(format!("Voter {} has already voted!", voter.name()), voter_id));
            }

            let vote = Vote::snapshot(&voter, &candidate);
            self.votes.save(vote.clone())?;
            vote
        };

        info!("🗳️ Vote cast by {} for {}", vote.voter_name(), vote.candidate_name());
        self.notify_observers(&vote);
        Ok(vote)
    }

    pub fn count_votes(&self, strategy: &dyn TallyStrategy) -> Result<Tally> {
        let votes = self.votes.find_all()?;
        Ok(strategy.count(&votes))
    }

    /// The candidate with the highest total under `strategy`. Equal totals go
    /// to whichever candidate the strategy counted first.
    pub fn winner(&self, strategy: &dyn TallyStrategy) -> Result<Option<Candidate>> {
        let tally = self.count_votes(strategy)?;
        match tally.leader() {
            Some((candidate_id, _)) => self.candidates.find_by_id(candidate_id),
            None => Ok(None),
        }
    }

    pub fn total_vote_count(&self) -> Result<usize> {
        self.votes.count()
    }

    pub fn all_votes(&self) -> Result<Vec<Vote>> {
        self.votes.find_all()
    }

    pub fn add_observer(&self, observer: Arc<dyn VoteObserver>) {
        self.observers.write().unwrap_or_else(PoisonError::into_inner).push(observer);
    }

    /// Removes `observer` if it is registered; matching is by handle identity.
    pub fn remove_observer(&self, observer: &Arc<dyn VoteObserver>) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|registered| !Arc::ptr_eq(registered, observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn notify_observers(&self, vote: &Vote) {
        let observers = self.observers.read().unwrap_or_else(PoisonError::into_inner).clone();
        for (position, observer) in observers.iter().enumerate() {
            if let Err(e) = observer.on_vote(vote) {
                error!("Error notifying observer #{}: {}", position + 1, e);
            }
        }
    }

    /// Clears candidates, voters and votes. Observers stay registered.
    pub fn reset(&self) -> Result<()> {
        let _guard = self.ballot_box();
        self.votes.clear()?;
        self.candidates.clear()?;
        self.voters.clear()?;
        info!("All data cleared");
        Ok(())
    }
}

impl Default for VotingService {
    fn default() -> Self {
        Self::with_backend(StoreBackend::default())
    }
}
