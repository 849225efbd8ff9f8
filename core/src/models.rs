use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use time::OffsetDateTime;

use crate::validation::{require_non_blank, ValidationError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    id: String,
    name: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let (id, name) = (id.into(), name.into());
        require_non_blank("Candidate ID", &id)?;
        require_non_blank("Candidate name", &name)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    id: String,
    name: String,
    registered_at: OffsetDateTime,
}

impl Voter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let (id, name) = (id.into(), name.into());
        require_non_blank("Voter ID", &id)?;
        require_non_blank("Voter name", &name)?;
        Ok(Self { id, name, registered_at: OffsetDateTime::now_utc() })
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn registered_at(&self) -> OffsetDateTime { self.registered_at }
}

impl PartialEq for Voter {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for Voter {}

impl Hash for Voter {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

impl fmt::Display for Voter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}

/// A voter's choice, with both names copied at cast time so that tallies keep
/// their labels even if the referenced records change later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    voter_id: String,
    voter_name: String,
    candidate_id: String,
    candidate_name: String,
    cast_at: OffsetDateTime,
}

impl Vote {
    pub fn new(
        voter_id: impl Into<String>,
        voter_name: impl Into<String>,
        candidate_id: impl Into<String>,
        candidate_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_cast_at(voter_id, voter_name, candidate_id, candidate_name, OffsetDateTime::now_utc())
    }

    pub fn with_cast_at(
        voter_id: impl Into<String>,
        voter_name: impl Into<String>,
        candidate_id: impl Into<String>,
        candidate_name: impl Into<String>,
        cast_at: OffsetDateTime,
    ) -> Result<Self, ValidationError> {
        let vote = Self {
            voter_id: voter_id.into(),
            voter_name: voter_name.into(),
            candidate_id: candidate_id.into(),
            candidate_name: candidate_name.into(),
            cast_at,
        };
        require_non_blank("Voter ID", &vote.voter_id)?;
        require_non_blank("Voter name", &vote.voter_name)?;
        require_non_blank("Candidate ID", &vote.candidate_id)?;
        require_non_blank("Candidate name", &vote.candidate_name)?;
        Ok(vote)
    }

    /// Both records were validated when they were built, so the snapshot
    /// cannot fail.
    pub fn snapshot(voter: &Voter, candidate: &Candidate) -> Self {
        Self {
            voter_id: voter.id.clone(),
            voter_name: voter.name.clone(),
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            cast_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn voter_id(&self) -> &str { &self.voter_id }
    pub fn voter_name(&self) -> &str { &self.voter_name }
    pub fn candidate_id(&self) -> &str { &self.candidate_id }
    pub fn candidate_name(&self) -> &str { &self.candidate_name }
    pub fn cast_at(&self) -> OffsetDateTime { self.cast_at }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vote{{voter={}, candidate={}, time={}}}",
            self.voter_name,
            self.candidate_name,
            self.cast_at.unix_timestamp_nanos() / 1_000_000
        )
    }
}
