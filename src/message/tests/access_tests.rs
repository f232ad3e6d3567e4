//! Tests for caller-scoped message visibility.

use crate::message::{
    access::{MessageQuery, can_view, scope_list_query},
    domain::{Message, MessageText},
};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Pair {
    alice: UserId,
    bob: UserId,
    chuck: UserId,
    messages: Vec<Message>,
}

fn message(from: UserId, to: UserId, text: &str) -> Message {
    Message::new(
        from,
        to,
        MessageText::new(text).expect("non-empty text"),
        &DefaultClock,
    )
}

/// Four messages covering every sender/recipient combination of two users.
#[fixture]
fn pair() -> Pair {
    let alice = UserId::new();
    let bob = UserId::new();
    let messages = vec![
        message(alice, bob, "alice to bob"),
        message(bob, alice, "bob to alice"),
        message(alice, alice, "alice to alice"),
        message(bob, bob, "bob to bob"),
    ];
    Pair {
        alice,
        bob,
        chuck: UserId::new(),
        messages,
    }
}

fn selected(query: &MessageQuery, messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter(|candidate| query.matches(*candidate))
        .map(|candidate| candidate.text().as_str().to_owned())
        .collect()
}

#[rstest]
fn unfiltered_listing_selects_sent_and_received(pair: Pair) {
    let query = scope_list_query(pair.alice, None);
    assert_eq!(
        selected(&query, &pair.messages),
        ["alice to bob", "bob to alice", "alice to alice"]
    );
}

#[rstest]
fn filtered_listing_selects_only_messages_sent_to_filter(pair: Pair) {
    let query = scope_list_query(pair.alice, Some(pair.bob));
    assert_eq!(selected(&query, &pair.messages), ["alice to bob"]);
}

#[rstest]
fn filtered_listing_does_not_include_reverse_direction(pair: Pair) {
    let query = scope_list_query(pair.bob, Some(pair.alice));
    assert_eq!(selected(&query, &pair.messages), ["bob to alice"]);
}

#[rstest]
fn outsiders_see_nothing(pair: Pair) {
    let query = scope_list_query(pair.chuck, None);
    assert!(selected(&query, &pair.messages).is_empty());
}

#[rstest]
fn filtering_by_self_selects_notes_to_self(pair: Pair) {
    let query = scope_list_query(pair.alice, Some(pair.alice));
    assert_eq!(selected(&query, &pair.messages), ["alice to alice"]);
}

#[rstest]
fn participants_can_view_and_outsiders_cannot(pair: Pair) {
    let sent = &pair.messages[0];
    assert!(can_view(pair.alice, sent));
    assert!(can_view(pair.bob, sent));
    assert!(!can_view(pair.chuck, sent));
}
