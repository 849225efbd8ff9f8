use clap::Parser;
use voting_core::StoreBackend;

/// Candidates every fresh session starts with.
pub const DEFAULT_CANDIDATES: &[(&str, &str)] = &[("C1", "Alice"), ("C2", "Bob")];

#[derive(Debug, Clone, Parser)]
#[command(name = "voting", version, about = "Interactive voting booth")]
pub struct Config {
    /// Store backend holding candidates, voters and votes
    #[arg(long, env = "VOTING_STORE", default_value = "memory")]
    pub store: StoreBackend,

    /// Start without the default candidates
    #[arg(long, env = "VOTING_NO_DEFAULTS")]
    pub no_defaults: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "VOTING_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn seed_defaults(&self) -> bool {
        !self.no_defaults
    }
}
