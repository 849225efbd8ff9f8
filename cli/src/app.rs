use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use voting_core::{
    AuditObserver, LoggingObserver, Plurality, PositionWeighted, Tally, TallyStrategy, VotingService,
};

use crate::config::DEFAULT_CANDIDATES;
use crate::error::AppError;

const BANNER: &str = "\
╔════════════════════════════════════════════╗
║              VOTING BOOTH                  ║
║  Commands: vote, count, add, list, voters, ║
║            audit, reset, help, exit        ║
╚════════════════════════════════════════════╝
";

const USAGE: &str = "Unknown command. Try: vote, count, add, list, voters, audit, reset, help, exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Vote,
    Count,
    Add,
    List,
    Voters,
    Audit,
    Reset,
    Help,
    Exit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "vote" => Some(Command::Vote),
            "count" => Some(Command::Count),
            "add" => Some(Command::Add),
            "list" => Some(Command::List),
            "voters" => Some(Command::Voters),
            "audit" => Some(Command::Audit),
            "reset" => Some(Command::Reset),
            "help" => Some(Command::Help),
            "exit" => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Line-oriented shell over a [`VotingService`].
///
/// Voting errors are printed and the prompt continues; I/O errors end the
/// session. Running out of input behaves like `exit`.
pub struct App<R, W> {
    service: VotingService,
    audit: Arc<AuditObserver>,
    seed_defaults: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(service: VotingService, seed_defaults: bool, input: R, output: W) -> Result<Self, AppError> {
        let audit = Arc::new(AuditObserver::new());
        service.add_observer(Arc::new(LoggingObserver));
        service.add_observer(audit.clone());

        let app = Self { service, audit, seed_defaults, input, output };
        app.seed()?;
        Ok(app)
    }

    fn seed(&self) -> Result<(), AppError> {
        if self.seed_defaults {
            for (id, name) in DEFAULT_CANDIDATES {
                self.service.add_candidate(id, name)?;
            }
        }
        Ok(())
    }

    pub fn service(&self) -> &VotingService { &self.service }
    pub fn audit(&self) -> &AuditObserver { &self.audit }
    pub fn into_output(self) -> W { self.output }

    pub fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{}", BANNER)?;

        loop {
            let line = match self.prompt(">>> ") {
                Ok(line) => line,
                Err(AppError::InputClosed) => break,
                Err(e) => return Err(e),
            };
            if line.is_empty() {
                continue;
            }

            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "❌ {}", USAGE)?;
                continue;
            };
            if command == Command::Exit {
                break;
            }

            match self.dispatch(command) {
                Ok(()) => {}
                Err(AppError::Voting(e)) => {
                    debug!("Command {:?} failed: {}", command, e);
                    writeln!(self.output, "❌ Error: {}", e)?;
                }
                Err(AppError::InputClosed) => break,
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Vote => self.handle_vote(),
            Command::Count => self.handle_count(),
            Command::Add => self.handle_add_candidate(),
            Command::List => self.handle_list_candidates(),
            Command::Voters => self.handle_list_voters(),
            Command::Audit => self.handle_audit(),
            Command::Reset => self.handle_reset(),
            Command::Help | Command::Exit => {
                writeln!(self.output, "{}", BANNER)?;
                Ok(())
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<String, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn handle_vote(&mut self) -> Result<(), AppError> {
        let voter_name = self.prompt("Enter voter name: ")?;
        if voter_name.is_empty() {
            writeln!(self.output, "❌ Voter name cannot be empty")?;
            return Ok(());
        }

        let voter_id = format!("V_{}", Uuid::new_v4().simple());
        self.service.register_voter(&voter_id, &voter_name)?;

        writeln!(self.output, "\n📋 Candidates:")?;
        self.write_candidates()?;

        let candidate_id = self.prompt("\nEnter candidate ID to vote for: ")?;
        let vote = self.service.cast_vote(&voter_id, &candidate_id)?;
        writeln!(self.output, "✓ {} voted for {}", vote.voter_name(), vote.candidate_name())?;
        Ok(())
    }

    fn handle_count(&mut self) -> Result<(), AppError> {
        if self.service.total_vote_count()? == 0 {
            writeln!(self.output, "⚠️  No votes yet.")?;
            return Ok(());
        }

        let strategies: [&dyn TallyStrategy; 2] = [&Plurality, &PositionWeighted];
        for strategy in strategies {
            writeln!(self.output, "\n📊 Results ({}):", strategy.name())?;
            let tally = self.service.count_votes(strategy)?;
            self.write_tally(&tally)?;

            if let Some(winner) = self.service.winner(strategy)? {
                writeln!(self.output, "🏆 Winner ({}): {}", strategy.name(), winner.name())?;
            }
        }
        Ok(())
    }

    fn write_tally(&mut self, tally: &Tally) -> Result<(), AppError> {
        let candidates = self.service.candidates()?;
        for (candidate_id, total) in tally.ranked() {
            // votes for candidates that no longer exist still count towards the total
            if let Some(candidate) = candidates.iter().find(|c| c.id() == candidate_id) {
                writeln!(self.output, "  {}: {} votes", candidate.name(), total)?;
            }
        }
        writeln!(self.output, "  Total: {} votes", tally.total())?;
        Ok(())
    }

    fn handle_add_candidate(&mut self) -> Result<(), AppError> {
        let id = self.prompt("Enter candidate ID: ")?;
        let name = self.prompt("Enter candidate name: ")?;
        self.service.add_candidate(&id, &name)?;
        writeln!(self.output, "✓ Candidate added: {}", name)?;
        Ok(())
    }

    fn write_candidates(&mut self) -> Result<(), AppError> {
        for candidate in self.service.candidates()? {
            writeln!(self.output, "  - {} (ID: {})", candidate.name(), candidate.id())?;
        }
        Ok(())
    }

    fn handle_list_candidates(&mut self) -> Result<(), AppError> {
        if self.service.candidates()?.is_empty() {
            writeln!(self.output, "⚠️  No candidates.")?;
            return Ok(());
        }
        writeln!(self.output, "\n📋 Candidates:")?;
        self.write_candidates()
    }

    fn handle_list_voters(&mut self) -> Result<(), AppError> {
        let voters = self.service.voters()?;
        if voters.is_empty() {
            writeln!(self.output, "⚠️  No voters.")?;
            return Ok(());
        }

        writeln!(self.output, "\n👥 Registered Voters:")?;
        for voter in voters {
            writeln!(self.output, "  - {} (ID: {})", voter.name(), voter.id())?;
        }
        Ok(())
    }

    fn handle_audit(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "📝 Audited votes: {}", self.audit.vote_count())?;

        let mut repeated: Vec<_> = self.audit.voter_vote_counts()
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        if repeated.is_empty() {
            writeln!(self.output, "  No fraud attempts detected.")?;
            return Ok(());
        }

        repeated.sort();
        for (voter_id, count) in repeated {
            writeln!(self.output, "  ⚠️  {} voted {} times", voter_id, count)?;
        }
        Ok(())
    }

    fn handle_reset(&mut self) -> Result<(), AppError> {
        let answer = self.prompt("Are you sure? (yes/no): ")?;
        if answer.to_lowercase() != "yes" {
            writeln!(self.output, "Reset cancelled.")?;
            return Ok(());
        }

        self.service.reset()?;
        self.audit.clear();
        self.seed()?;
        info!("Session reset");
        writeln!(self.output, "✓ System reset")?;
        Ok(())
    }
}
