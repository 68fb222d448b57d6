//! Commands and events exchanged with the vote ledger aggregate.

pub mod command;
pub mod event;
pub mod handler;

pub use command::Command;
pub use event::Event;
pub use handler::execute;
