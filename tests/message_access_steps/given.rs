//! Given steps for message access scenarios.

use super::world::{AccessWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use serde_json::json;
use sup::user::{
    domain::{PasswordHash, User, Username},
    ports::UserDirectory,
};

#[given(r#"users "{first}", "{second}" and "{third}" exist"#)]
fn users_exist(
    world: &mut AccessWorld,
    first: String,
    second: String,
    third: String,
) -> Result<(), eyre::Report> {
    for name in [first, second, third] {
        let user = User::new(
            Username::new(name.as_str()).wrap_err("scenario username")?,
            &DefaultClock,
        );
        run_async(
            world
                .directory
                .register(&user, &PasswordHash::from_hash("unused")),
        )
        .wrap_err_with(|| format!("register {name}"))?;
        world.users.insert(name, user.id());
    }
    Ok(())
}

#[given(r#""{sender}" has sent "{text}" to "{recipient}""#)]
fn message_sent(
    world: &mut AccessWorld,
    sender: String,
    text: String,
    recipient: String,
) -> Result<(), eyre::Report> {
    let sender_id = world.user(&sender)?;
    let recipient_id = world.user(&recipient)?;
    let payload = json!({ "to": recipient_id.to_string(), "text": text });
    let message = run_async(world.service.post_message(sender_id, &payload))
        .wrap_err("post scenario message")?;
    world.last_message = Some(message.id());
    Ok(())
}
