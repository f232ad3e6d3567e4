//! Behaviour tests for message visibility and listing scope.

mod message_access_steps;

use message_access_steps::world::{AccessWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/message_access.feature",
    name = "A participant reads a message"
)]
#[tokio::test(flavor = "multi_thread")]
async fn participant_reads_message(world: AccessWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_access.feature",
    name = "An outsider is refused a message"
)]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_is_refused(world: AccessWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_access.feature",
    name = "An unfiltered listing covers sent and received messages"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unfiltered_listing(world: AccessWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_access.feature",
    name = "A recipient filter covers only messages the caller sent"
)]
#[tokio::test(flavor = "multi_thread")]
async fn recipient_filter_listing(world: AccessWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/message_access.feature",
    name = "Posting to an unknown recipient stores nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_recipient_post(world: AccessWorld) {
    let _ = world;
}
