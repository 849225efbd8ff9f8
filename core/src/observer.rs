use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::models::Vote;

pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Notified after each vote has been saved. A returned error is logged by
/// the caller and never undoes the vote.
pub trait VoteObserver: Send + Sync {
    fn on_vote(&self, vote: &Vote) -> Result<(), ObserverError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl VoteObserver for LoggingObserver {
    fn on_vote(&self, vote: &Vote) -> Result<(), ObserverError> {
        info!("✓ Vote recorded: {} voted for {}", vote.voter_name(), vote.candidate_name());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    /// `sequence` is the 1-based position of the vote in the audit log.
    Recorded { sequence: usize },
    FraudAttempt { voter_id: String, attempts: u32 },
}

#[derive(Debug, Default)]
struct AuditLog {
    votes: Vec<Vote>,
    per_voter: HashMap<String, u32>,
}

/// Keeps every vote it sees and flags voters that show up more than once.
#[derive(Debug, Default)]
pub struct AuditObserver {
    log: Mutex<AuditLog>,
}

impl AuditObserver {
    pub fn new() -> Self {
        Self::default()
    }

    // The log is plain data, so a panic elsewhere cannot leave it half-written.
    fn log(&self) -> MutexGuard<'_, AuditLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, vote: &Vote) -> AuditEvent {
        let mut log = self.log();
        log.votes.push(vote.clone());
        let attempts = {
            let count = log.per_voter.entry(vote.voter_id().to_string()).or_insert(0);
            *count += 1;
            *count
        };

        if attempts > 1 {
            AuditEvent::FraudAttempt { voter_id: vote.voter_id().to_string(), attempts }
        } else {
            AuditEvent::Recorded { sequence: log.votes.len() }
        }
    }

    pub fn audit_log(&self) -> Vec<Vote> {
        self.log().votes.clone()
    }

    pub fn vote_count(&self) -> usize {
        self.log().votes.len()
    }

    pub fn voter_vote_counts(&self) -> HashMap<String, u32> {
        self.log().per_voter.clone()
    }

    pub fn clear(&self) {
        let mut log = self.log();
        log.votes.clear();
        log.per_voter.clear();
    }
}

impl VoteObserver for AuditObserver {
    fn on_vote(&self, vote: &Vote) -> Result<(), ObserverError> {
        match self.record(vote) {
            AuditEvent::Recorded { sequence } => info!("📝 Audit: vote #{} recorded", sequence),
            AuditEvent::FraudAttempt { attempts, .. } => {
                warn!("⚠️ FRAUD ATTEMPT: {} tried to vote {} times", vote.voter_name(), attempts)
            }
        }
        Ok(())
    }
}
