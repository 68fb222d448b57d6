//! Presentation flow: which event view is shown, and what saving it does.

use chrono::{DateTime, Utc};

use timeshare_ballot::{Payload, VoteLedger};
use timeshare_core::SessionId;

use crate::config::MessagesConfig;
use crate::conversation::Conversation;
use crate::error::MessagesError;
use crate::message::{Layout, Message};
use crate::render::{Row, rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationStyle {
    #[default]
    Compact,
    Expanded,
}

/// Which event view is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMode {
    /// Propose dates (and vote on existing ones).
    CreateEvent,
    /// Vote on the dates of an opened message.
    SelectDates,
}

/// Result of saving an event view: the dates in display order and the
/// finalized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPoll {
    pub dates: Vec<DateTime<Utc>>,
    pub payload: Payload,
}

/// One event view over a ledger.
#[derive(Debug, Clone)]
pub struct EventController {
    mode: EventMode,
    ledger: VoteLedger,
}

impl EventController {
    /// Show the poll of `message`, or an empty one.
    pub fn load(mode: EventMode, message: Option<&Message>) -> Self {
        let ledger = message.map(Message::ledger).unwrap_or_default();
        Self { mode, ledger }
    }

    pub fn mode(&self) -> EventMode {
        self.mode
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn rows(&self) -> Vec<Row> {
        rows(&self.ledger)
    }

    /// Add a proposed date; returns the index of its new row.
    pub fn add_date(&mut self, date: DateTime<Utc>) -> Result<usize, MessagesError> {
        if self.mode != EventMode::CreateEvent {
            return Err(MessagesError::DatesLocked);
        }
        self.ledger.append_option(date);
        Ok(self.ledger.len() - 1)
    }

    /// Toggle the checkmark of a row; returns whether it is now checked.
    pub fn select_row(&mut self, index: usize) -> Result<bool, MessagesError> {
        self.ledger.toggle_local_vote(index)?;
        Ok(self.ledger.get(index).is_some_and(|option| option.is_voted()))
    }

    /// Finalize the ledger and hand the result to `on_save`.
    pub fn save<R>(self, on_save: impl FnOnce(SavedPoll) -> R) -> R {
        let dates = self.ledger.options().iter().map(|o| o.date()).collect();
        let payload = self.ledger.finalize();
        on_save(SavedPoll { dates, payload })
    }
}

/// Root controller owned by the host extension.
#[derive(Debug, Clone)]
pub struct MessagesController {
    config: MessagesConfig,
    style: PresentationStyle,
    child: Option<EventController>,
}

impl MessagesController {
    pub fn new(config: MessagesConfig) -> Self {
        Self {
            config,
            style: PresentationStyle::default(),
            child: None,
        }
    }

    pub fn style(&self) -> PresentationStyle {
        self.style
    }

    pub fn event_controller(&self) -> Option<&EventController> {
        self.child.as_ref()
    }

    pub fn event_controller_mut(&mut self) -> Option<&mut EventController> {
        self.child.as_mut()
    }

    /// The host is about to change style: drop the current view and, when
    /// expanding, show the create view.
    pub fn will_transition(
        &mut self,
        style: PresentationStyle,
        conversation: Option<&dyn Conversation>,
    ) {
        self.style = style;
        self.child = None;

        if style == PresentationStyle::Expanded {
            self.display_event_controller(conversation, EventMode::CreateEvent);
        }
    }

    /// The extension opened on `conversation` in the current style.
    pub fn will_become_active(&mut self, conversation: &dyn Conversation) {
        if self.style == PresentationStyle::Expanded {
            self.display_event_controller(Some(conversation), EventMode::SelectDates);
        }
    }

    /// Ask the host for `style`; the host transitions on the active
    /// conversation right away.
    pub fn request_presentation_style(
        &mut self,
        style: PresentationStyle,
        conversation: Option<&dyn Conversation>,
    ) {
        tracing::debug!(?style, "presentation style requested");
        self.will_transition(style, conversation);
    }

    /// The "create new event" action: expand into the create view.
    pub fn create_new_event(&mut self, conversation: Option<&dyn Conversation>) {
        self.request_presentation_style(PresentationStyle::Expanded, conversation);
    }

    fn display_event_controller(&mut self, conversation: Option<&dyn Conversation>, mode: EventMode) {
        let Some(conversation) = conversation else {
            tracing::debug!(?mode, "no conversation; event view not shown");
            return;
        };

        let controller = EventController::load(mode, conversation.selected_message());
        tracing::debug!(?mode, options = controller.ledger().len(), "event view shown");
        self.child = Some(controller);
    }

    /// Save the displayed event view into `conversation`.
    pub fn save(
        &mut self,
        conversation: Option<&mut dyn Conversation>,
    ) -> Result<Message, MessagesError> {
        let child = self.child.take().ok_or(MessagesError::NoEventController)?;
        child.save(|poll| self.create_message(conversation, poll))
    }

    /// Build a message for `poll` and insert it, reusing the session of the
    /// selected message when there is one.
    pub fn create_message(
        &mut self,
        conversation: Option<&mut dyn Conversation>,
        poll: SavedPoll,
    ) -> Result<Message, MessagesError> {
        self.request_presentation_style(PresentationStyle::Compact, None);

        let conversation = conversation.ok_or(MessagesError::NoConversation)?;

        let session = conversation
            .selected_message()
            .map(|m| m.session)
            .unwrap_or_else(SessionId::new);

        let message = Message {
            session,
            url: poll.payload.to_url(&self.config.base_url),
            layout: Layout::render(self.config.caption.clone(), &poll.dates),
        };

        if let Err(err) = conversation.insert(message.clone()) {
            tracing::error!(error = %err, %session, "message insert failed");
            return Err(err);
        }

        tracing::info!(%session, options = poll.dates.len(), "message inserted");
        Ok(message)
    }
}
