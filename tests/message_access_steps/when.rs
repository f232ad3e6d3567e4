//! When steps for message access scenarios.

use super::world::{AccessWorld, run_async};
use rstest_bdd_macros::when;
use serde_json::json;
use sup::user::domain::UserId;

#[when(r#""{caller}" requests that message"#)]
fn request_message(world: &mut AccessWorld, caller: String) -> Result<(), eyre::Report> {
    let caller_id = world.user(&caller)?;
    let message_id = world
        .last_message
        .ok_or_else(|| eyre::eyre!("no message was sent in this scenario"))?;
    let raw_id = message_id.to_string();
    world.last_fetch = Some(run_async(world.service.get_message(caller_id, &raw_id)));
    Ok(())
}

#[when(r#""{caller}" lists all messages"#)]
fn list_all(world: &mut AccessWorld, caller: String) -> Result<(), eyre::Report> {
    let caller_id = world.user(&caller)?;
    world.last_listing = Some(run_async(world.service.list_messages(caller_id, None)));
    Ok(())
}

#[when(r#""{caller}" lists messages sent to "{recipient}""#)]
fn list_sent_to(
    world: &mut AccessWorld,
    caller: String,
    recipient: String,
) -> Result<(), eyre::Report> {
    let caller_id = world.user(&caller)?;
    let filter = world.user(&recipient)?.to_string();
    world.last_listing = Some(run_async(
        world.service.list_messages(caller_id, Some(filter.as_str())),
    ));
    Ok(())
}

#[when(r#""{sender}" posts "{text}" to an unknown user"#)]
fn post_to_unknown(
    world: &mut AccessWorld,
    sender: String,
    text: String,
) -> Result<(), eyre::Report> {
    let sender_id = world.user(&sender)?;
    let payload = json!({ "to": UserId::new().to_string(), "text": text });
    world.last_post = Some(run_async(world.service.post_message(sender_id, &payload)));
    Ok(())
}
