use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timeshare_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult};
use timeshare_events::{Command, Event, execute};

use crate::codec::{
    DATE_KEY_PREFIX, Payload, VOTE_KEY_PREFIX, date_key, format_date, parse_date, parse_votes,
    vote_key,
};
use crate::option::{DateOption, LocalVote};

/// Vote ledger identifier (one per editing session, never sent on the wire).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(pub AggregateId);

impl LedgerId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LedgerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: VoteLedger.
///
/// Options are kept in insertion order; position is the only link between a
/// date and its tally on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteLedger {
    id: LedgerId,
    options: Vec<DateOption>,
    version: u64,
}

impl VoteLedger {
    /// An empty ledger with a fresh identifier.
    pub fn new() -> Self {
        Self::empty(LedgerId::new(AggregateId::new()))
    }

    pub fn empty(id: LedgerId) -> Self {
        Self {
            id,
            options: Vec::new(),
            version: 0,
        }
    }

    /// Load a ledger from received query items, using the current time for
    /// dates that do not parse.
    pub fn decode<I, K, V>(payload: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::decode_at(payload, Utc::now())
    }

    /// Same as [`VoteLedger::decode`] with an explicit fallback instant.
    ///
    /// The n-th `date-` item pairs with the n-th `vote-` item in arrival order.
    /// A date without a vote gets zero votes; a vote without a date is dropped.
    pub fn decode_at<I, K, V>(payload: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut dates = Vec::new();
        let mut votes = Vec::new();

        for (key, value) in payload {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key.starts_with(DATE_KEY_PREFIX) {
                let date = parse_date(value).unwrap_or_else(|| {
                    tracing::debug!(key, value, "unparsable date, using current time");
                    now
                });
                dates.push(date);
            } else if key.starts_with(VOTE_KEY_PREFIX) {
                let count = parse_votes(value).unwrap_or_else(|| {
                    tracing::debug!(key, value, "unparsable vote count, using 0");
                    0
                });
                votes.push(count);
            }
        }

        if votes.len() > dates.len() {
            tracing::debug!(
                dates = dates.len(),
                votes = votes.len(),
                "dropping vote counts without a matching date"
            );
        }

        let options = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| DateOption::received(date, votes.get(i).copied().unwrap_or(0)))
            .collect();

        Self {
            options,
            ..Self::new()
        }
    }

    pub fn id_typed(&self) -> LedgerId {
        self.id
    }

    pub fn options(&self) -> &[DateOption] {
        &self.options
    }

    pub fn get(&self, index: usize) -> Option<&DateOption> {
        self.options.get(index)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Propose a new date; the proposer votes for it.
    pub fn append_option(&mut self, date: DateTime<Utc>) {
        let cmd = LedgerCommand::AppendOption(AppendOption {
            ledger_id: self.id,
            date,
            occurred_at: Utc::now(),
        });
        // Only a foreign ledger id is rejected, and the command targets `self`.
        if let Err(err) = execute(self, &cmd) {
            tracing::warn!(error = %err, "append rejected");
        }
    }

    /// Flip the local vote of the option at `index`.
    pub fn toggle_local_vote(&mut self, index: usize) -> DomainResult<()> {
        let cmd = LedgerCommand::ToggleLocalVote(ToggleLocalVote {
            ledger_id: self.id,
            index,
            occurred_at: Utc::now(),
        });
        execute(self, &cmd)?;
        Ok(())
    }

    /// Encode the ledger for sending, folding each local vote into its tally.
    ///
    /// Consumes the ledger: once folded, local and aggregate votes can no
    /// longer be told apart.
    pub fn finalize(self) -> Payload {
        let mut payload = Payload::new();
        for (i, option) in self.options.iter().enumerate() {
            payload.push(date_key(i), format_date(&option.date()));
            payload.push(vote_key(i), option.folded_votes().to_string());
        }
        tracing::debug!(ledger_id = %self.id, options = self.options.len(), "ledger finalized");
        payload
    }
}

impl Default for VoteLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateRoot for VoteLedger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AppendOption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOption {
    pub ledger_id: LedgerId,
    pub date: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ToggleLocalVote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleLocalVote {
    pub ledger_id: LedgerId,
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    AppendOption(AppendOption),
    ToggleLocalVote(ToggleLocalVote),
}

impl Command for LedgerCommand {
    fn target_aggregate_id(&self) -> AggregateId {
        match self {
            LedgerCommand::AppendOption(c) => c.ledger_id.0,
            LedgerCommand::ToggleLocalVote(c) => c.ledger_id.0,
        }
    }
}

/// Event: OptionAppended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionAppended {
    pub ledger_id: LedgerId,
    pub position: usize,
    pub date: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LocalVoteToggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVoteToggled {
    pub ledger_id: LedgerId,
    pub index: usize,
    pub local_vote: LocalVote,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    OptionAppended(OptionAppended),
    LocalVoteToggled(LocalVoteToggled),
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::OptionAppended(_) => "ballot.option.appended",
            LedgerEvent::LocalVoteToggled(_) => "ballot.vote.toggled",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::OptionAppended(e) => e.occurred_at,
            LedgerEvent::LocalVoteToggled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for VoteLedger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::OptionAppended(e) => {
                self.options.push(DateOption::proposed(e.date));
            }
            LedgerEvent::LocalVoteToggled(e) => {
                if let Some(option) = self.options.get_mut(e.index) {
                    option.set_local_vote(e.local_vote);
                }
            }
        }

        self.version += 1;
        tracing::debug!(
            ledger_id = %self.id,
            event_type = event.event_type(),
            occurred_at = %event.occurred_at(),
            version = self.version,
            "ledger event applied"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.ensure_target(command.target_aggregate_id())?;

        match command {
            LedgerCommand::AppendOption(cmd) => Ok(vec![self.decide_append(cmd)]),
            LedgerCommand::ToggleLocalVote(cmd) => self.handle_toggle(cmd),
        }
    }
}

impl VoteLedger {
    fn ensure_target(&self, target: AggregateId) -> Result<(), DomainError> {
        if self.id.0 != target {
            return Err(DomainError::invariant("ledger_id mismatch"));
        }
        Ok(())
    }

    fn decide_append(&self, cmd: &AppendOption) -> LedgerEvent {
        LedgerEvent::OptionAppended(OptionAppended {
            ledger_id: cmd.ledger_id,
            position: self.options.len(),
            date: cmd.date,
            occurred_at: cmd.occurred_at,
        })
    }

    fn handle_toggle(&self, cmd: &ToggleLocalVote) -> Result<Vec<LedgerEvent>, DomainError> {
        let option = self
            .options
            .get(cmd.index)
            .ok_or_else(|| DomainError::index_out_of_range(cmd.index, self.options.len()))?;

        Ok(vec![LedgerEvent::LocalVoteToggled(LocalVoteToggled {
            ledger_id: cmd.ledger_id,
            index: cmd.index,
            local_vote: option.local_vote().toggled(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
