use thiserror::Error;

use timeshare_core::DomainError;

/// Failures of the presentation layer.
#[derive(Debug, Error)]
pub enum MessagesError {
    #[error("no active conversation")]
    NoConversation,

    #[error("no event view is displayed")]
    NoEventController,

    #[error("dates can only be added while creating an event")]
    DatesLocked,

    #[error("failed to insert message: {0}")]
    Insert(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
