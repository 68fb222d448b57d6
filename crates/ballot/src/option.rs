use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timeshare_core::ValueObject;

/// The local participant's vote on one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalVote {
    NotVoted,
    Voted,
}

impl LocalVote {
    /// Contribution of this vote to a tally (0 or 1).
    pub fn count(self) -> u64 {
        match self {
            LocalVote::NotVoted => 0,
            LocalVote::Voted => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LocalVote::NotVoted => LocalVote::Voted,
            LocalVote::Voted => LocalVote::NotVoted,
        }
    }
}

/// One candidate date with its tallies.
///
/// `aggregate_votes` never includes `local_vote`; the two are only merged by
/// [`DateOption::folded_votes`] when the ledger is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOption {
    date: DateTime<Utc>,
    aggregate_votes: u64,
    local_vote: LocalVote,
}

impl DateOption {
    /// A date proposed by the local participant, who votes for it.
    pub fn proposed(date: DateTime<Utc>) -> Self {
        Self {
            date,
            aggregate_votes: 0,
            local_vote: LocalVote::Voted,
        }
    }

    /// A date received from another participant's message.
    pub fn received(date: DateTime<Utc>, aggregate_votes: u64) -> Self {
        Self {
            date,
            aggregate_votes,
            local_vote: LocalVote::NotVoted,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn aggregate_votes(&self) -> u64 {
        self.aggregate_votes
    }

    pub fn local_vote(&self) -> LocalVote {
        self.local_vote
    }

    pub fn is_voted(&self) -> bool {
        self.local_vote == LocalVote::Voted
    }

    /// Total sent on the wire: aggregate plus the local vote.
    pub fn folded_votes(&self) -> u64 {
        self.aggregate_votes.saturating_add(self.local_vote.count())
    }

    pub(crate) fn set_local_vote(&mut self, vote: LocalVote) {
        self.local_vote = vote;
    }
}

impl ValueObject for DateOption {}
