use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are facts: once applied they are never edited, only followed by
/// further events.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "ballot.option.appended").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (the participant's wall clock).
    fn occurred_at(&self) -> DateTime<Utc>;
}
