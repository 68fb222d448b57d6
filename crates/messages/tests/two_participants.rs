use chrono::{TimeZone, Utc};
use url::Url;

use timeshare_messages::{
    Conversation, EventMode, InMemoryConversation, Message, MessagesConfig, MessagesController,
    PresentationStyle,
};

fn config() -> MessagesConfig {
    MessagesConfig {
        base_url: Url::parse("https://polls.example.com/p").unwrap(),
        caption: "I voted".to_string(),
    }
}

#[test]
fn second_participant_adds_vote_in_same_session() {
    let mut conversation = InMemoryConversation::new();

    // Alice proposes two dates and keeps her vote on the first only.
    let mut alice = MessagesController::new(config());
    alice.create_new_event(Some(&conversation));
    let view = alice.event_controller_mut().unwrap();
    view.add_date(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
        .unwrap();
    view.add_date(Utc.with_ymd_and_hms(2024, 1, 2, 18, 30, 0).unwrap())
        .unwrap();
    view.select_row(1).unwrap();
    let first = alice.save(Some(&mut conversation)).unwrap();

    assert_eq!(
        first.url.as_str(),
        "https://polls.example.com/p?date-0=2024-01-01-10-00&vote-0=1&date-1=2024-01-02-18-30&vote-1=0"
    );

    // Bob opens the message expanded and votes for both dates.
    let mut bob = MessagesController::new(config());
    bob.request_presentation_style(PresentationStyle::Expanded, Some(&conversation));
    bob.will_become_active(&conversation);
    let view = bob.event_controller_mut().unwrap();
    assert_eq!(view.mode(), EventMode::SelectDates);

    let rows = view.rows();
    assert_eq!(rows[0].detail, "Votes: 1");
    assert!(!rows[0].checked);
    assert_eq!(rows[1].detail, "");

    view.select_row(0).unwrap();
    view.select_row(1).unwrap();
    let second = bob.save(Some(&mut conversation)).unwrap();

    assert_eq!(second.session, first.session);
    assert_eq!(
        second.url.as_str(),
        "https://polls.example.com/p?date-0=2024-01-01-10-00&vote-0=2&date-1=2024-01-02-18-30&vote-1=1"
    );
    assert_eq!(
        second.layout.summary,
        "January 1, 2024 at 10:00 AM\nJanuary 2, 2024 at 6:30 PM"
    );
    assert_eq!(conversation.messages().len(), 2);
    assert_eq!(conversation.selected_message(), Some(&second));
}

#[test]
fn malformed_message_degrades_to_defaults() {
    let url = Url::parse("timeshare://vote?date-0=not-a-date&vote-0=abc").unwrap();
    let conversation = InMemoryConversation::with_message(Message::received(url));

    let mut app = MessagesController::new(MessagesConfig::default());
    app.request_presentation_style(PresentationStyle::Expanded, Some(&conversation));
    app.will_become_active(&conversation);

    let view = app.event_controller().unwrap();
    assert_eq!(view.ledger().len(), 1);
    assert_eq!(view.ledger().get(0).unwrap().aggregate_votes(), 0);
}
