//! Then steps for message access scenarios.

use super::world::{AccessWorld, run_async};
use rstest_bdd_macros::then;
use sup::message::services::MessagingError;

#[then(r#"the message text is "{expected}""#)]
fn message_text_is(world: &AccessWorld, expected: String) -> Result<(), eyre::Report> {
    let fetched = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing fetch result in scenario world"))?;
    let view = fetched
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected fetch failure: {err}"))?;
    if view.text.as_str() != expected {
        return Err(eyre::eyre!(
            "expected text {expected:?}, found {:?}",
            view.text.as_str()
        ));
    }
    Ok(())
}

#[then("access is refused as not authorized")]
fn access_refused(world: &AccessWorld) -> Result<(), eyre::Report> {
    match world.last_fetch.as_ref() {
        Some(Err(MessagingError::Unauthorized { .. })) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected an authorization failure, got {err}")),
        Some(Ok(_)) => Err(eyre::eyre!("outsider was able to read the message")),
        None => Err(eyre::eyre!("missing fetch result in scenario world")),
    }
}

#[then(r#"the listed texts are "{expected}""#)]
fn listed_texts(world: &AccessWorld, expected: String) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected listing failure: {err}"))?;
    let texts: Vec<&str> = listing.iter().map(|view| view.text.as_str()).collect();
    let wanted: Vec<&str> = expected.split(',').collect();
    if texts != wanted {
        return Err(eyre::eyre!("expected {wanted:?}, found {texts:?}"));
    }
    Ok(())
}

#[then(r#"the post fails with "{expected}""#)]
fn post_fails_with(world: &AccessWorld, expected: String) -> Result<(), eyre::Report> {
    match world.last_post.as_ref() {
        Some(Err(MessagingError::Field(error))) => {
            let message = error.rendering().body.message;
            if message == expected {
                Ok(())
            } else {
                Err(eyre::eyre!("expected {expected:?}, found {message:?}"))
            }
        }
        Some(Err(err)) => Err(eyre::eyre!("expected a field error, got {err}")),
        Some(Ok(_)) => Err(eyre::eyre!("post unexpectedly succeeded")),
        None => Err(eyre::eyre!("missing post result in scenario world")),
    }
}

#[then(r#""{caller}" sees no messages"#)]
fn sees_no_messages(world: &AccessWorld, caller: String) -> Result<(), eyre::Report> {
    let caller_id = world.user(&caller)?;
    let visible = run_async(world.service.list_messages(caller_id, None))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    if !visible.is_empty() {
        return Err(eyre::eyre!("expected no messages, found {}", visible.len()));
    }
    Ok(())
}
