//! Date poll ballot (vote ledger + message payload codec).
//!
//! This crate contains the only domain logic of TimeShare: candidate dates,
//! their vote tallies and the URL query encoding participants exchange. It is
//! pure and synchronous; presentation lives in `timeshare-messages`.

pub mod codec;
pub mod ledger;
pub mod option;

pub use codec::{DATE_FORMAT, Payload, format_date, parse_date, parse_votes};
pub use ledger::{
    AppendOption, LedgerCommand, LedgerEvent, LedgerId, LocalVoteToggled, OptionAppended,
    ToggleLocalVote, VoteLedger,
};
pub use option::{DateOption, LocalVote};
