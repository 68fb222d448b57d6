use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use timeshare_ballot::{Payload, VoteLedger};
use timeshare_core::SessionId;

use crate::render::display_date;

/// What the recipient sees before opening the poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub caption: String,
    /// Every proposed date, one per line.
    pub summary: String,
}

impl Layout {
    pub fn render(caption: impl Into<String>, dates: &[DateTime<Utc>]) -> Self {
        let summary = dates
            .iter()
            .map(display_date)
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            caption: caption.into(),
            summary: summary.trim().to_string(),
        }
    }
}

/// A poll message as inserted into a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub session: SessionId,
    pub url: Url,
    pub layout: Layout,
}

impl Message {
    /// A message that arrived from elsewhere with only its URL known.
    pub fn received(url: Url) -> Self {
        Self {
            session: SessionId::new(),
            url,
            layout: Layout {
                caption: String::new(),
                summary: String::new(),
            },
        }
    }

    pub fn payload(&self) -> Payload {
        Payload::from_url(&self.url)
    }

    pub fn ledger(&self) -> VoteLedger {
        VoteLedger::decode(self.payload())
    }
}
