//! Presentation layer for TimeShare polls.
//!
//! Stands in for the messaging host: an event controller shows a ledger as
//! rows and collects votes, and the messages controller turns a saved poll
//! into a message (session, URL, caption and summary) inserted into a
//! conversation.

pub mod config;
pub mod controller;
pub mod conversation;
pub mod error;
pub mod input;
pub mod message;
pub mod render;

pub use config::MessagesConfig;
pub use controller::{EventController, EventMode, MessagesController, PresentationStyle, SavedPoll};
pub use conversation::{Conversation, InMemoryConversation};
pub use error::MessagesError;
pub use message::{Layout, Message};
pub use render::{Row, display_date, rows};
