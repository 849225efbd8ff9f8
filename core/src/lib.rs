pub mod error;
pub mod models;
pub mod validation;
pub mod store;
pub mod tally;
pub mod observer;
pub mod service;

pub use error::{Error, ErrorCode, Result};
pub use models::*;
pub use validation::*;
pub use store::{CandidateStore, StoreBackend, Stores, VoteStore, VoterStore};
pub use tally::{Plurality, PositionWeighted, Tally, TallyStrategy};
pub use observer::{AuditEvent, AuditObserver, LoggingObserver, ObserverError, VoteObserver};
pub use service::VotingService;
