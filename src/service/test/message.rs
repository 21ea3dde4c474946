use super::*;
use crate::{
    model::channel::CategoryTemplate,
    remote::lookup::GuildState,
    service::message::{plan_messages, MessagePlan, MessageService},
};

fn categories(document: Value) -> Result<Vec<CategoryTemplate>, AppError> {
    Ok(serde_json::from_value(document)?)
}

fn welcome_with(messages: &[&str]) -> Result<Vec<CategoryTemplate>, AppError> {
    categories(json!([{
        "name": "Info",
        "channels": [{ "type": "text", "name": "welcome", "channel_messages": messages }],
    }]))
}

/// Tests that channels with messages from other users are left alone.
///
/// Expected: Ok with no calls and the human message still present
#[tokio::test]
async fn protects_channels_with_human_messages() -> Result<(), AppError> {
    let welcome = ChannelFactory::text("welcome").build();
    let welcome_id = welcome.id;
    let history = vec![
        create_test_message(welcome_id.get(), BOT_USER_ID, "Old welcome"),
        create_test_message(welcome_id.get(), HUMAN_USER_ID, "hello!"),
    ];
    let remote = guild()?
        .with_channel(welcome)
        .with_messages(welcome_id, history);

    MessageService::new(&remote)
        .ensure_default_messages(&welcome_with(&["Welcome!"])?)
        .await?;

    assert_eq!(remote.calls().await, vec![]);
    assert_eq!(
        remote.message_contents(welcome_id).await,
        vec!["Old welcome", "hello!"]
    );

    Ok(())
}

/// Tests replacing outdated bot messages.
///
/// Verifies that every existing message is deleted before the declared messages are
/// sent in order.
///
/// Expected: Ok with the channel holding exactly the declared messages
#[tokio::test]
async fn replaces_outdated_bot_messages() -> Result<(), AppError> {
    let welcome = ChannelFactory::text("welcome").build();
    let welcome_id = welcome.id;
    let history = vec![create_test_message(welcome_id.get(), BOT_USER_ID, "Old")];
    let remote = guild()?
        .with_channel(welcome)
        .with_messages(welcome_id, history);

    MessageService::new(&remote)
        .ensure_default_messages(&welcome_with(&["First", "Second"])?)
        .await?;

    assert_eq!(
        remote.calls().await,
        vec![
            RemoteCall::DeleteMessage {
                channel: "welcome".to_string(),
                content: "Old".to_string(),
            },
            RemoteCall::SendMessage {
                channel: "welcome".to_string(),
                content: "First".to_string(),
            },
            RemoteCall::SendMessage {
                channel: "welcome".to_string(),
                content: "Second".to_string(),
            },
        ]
    );
    assert_eq!(
        remote.message_contents(welcome_id).await,
        vec!["First", "Second"]
    );

    Ok(())
}

/// Tests substitution of role and channel placeholders.
///
/// Expected: Ok with the placeholders replaced by mention syntax in the sent message
#[tokio::test]
async fn sends_messages_with_mentions() -> Result<(), AppError> {
    let moderators = create_test_role(GUILD_ID + 1, "Moderators", 0, 1);
    let welcome = ChannelFactory::text("welcome").build();
    let lounge = ChannelFactory::voice("Lounge").build();
    let lounge_id = lounge.id;
    let remote = guild()?
        .with_role(moderators)
        .with_channel(welcome)
        .with_channel(lounge);

    MessageService::new(&remote)
        .ensure_default_messages(&welcome_with(&["ping <<@&Moderators>> in <<#Lounge>>"])?)
        .await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::SendMessage {
            channel: "welcome".to_string(),
            content: format!("ping <@&{}> in <#{}>", GUILD_ID + 1, lounge_id),
        }]
    );

    Ok(())
}

/// Tests mention syntax of resolved entities.
///
/// Expected: "@everyone" written out literally, other roles as role mentions
#[tokio::test]
async fn mentions_everyone_literally() -> Result<(), AppError> {
    let remote = guild()?.with_role(create_test_role(GUILD_ID + 1, "Moderators", 0, 1));
    let state = GuildState::new(&remote);

    let everyone = state.find(EntityKind::Role, "@everyone").await?;
    let moderators = state.find(EntityKind::Role, "Moderators").await?;

    assert_eq!(everyone.mention(), "@everyone");
    assert_eq!(moderators.mention(), format!("<@&{}>", GUILD_ID + 1));

    Ok(())
}

/// Tests a placeholder naming a channel the guild does not have.
///
/// Expected: Err(NotFound) for a postable channel
#[tokio::test]
async fn fails_on_unresolved_placeholder() -> Result<(), AppError> {
    let remote = guild()?.with_channel(ChannelFactory::text("welcome").build());

    let result = MessageService::new(&remote)
        .ensure_default_messages(&welcome_with(&["see <<#rules>>"])?)
        .await;

    let Err(ReconcileError::NotFound { kind, name }) = result else {
        panic!("expected NotFound, got {result:?}");
    };
    assert_eq!(kind, EntityKind::PostableChannel);
    assert_eq!(name, "rules");
    assert_eq!(remote.calls().await, vec![]);

    Ok(())
}

/// Tests message planning.
///
/// Expected: up to date for identical bot history, replace on any difference
#[test]
fn plans_message_replacement() {
    let bot = UserId::new(BOT_USER_ID);
    let history = vec![
        create_test_message(1, BOT_USER_ID, "One"),
        create_test_message(1, BOT_USER_ID, "Two"),
    ];
    let expected = |messages: &[&str]| -> Vec<String> {
        messages.iter().map(|message| message.to_string()).collect()
    };

    assert_eq!(
        plan_messages(&history, bot, &expected(&["One", "Two"])),
        MessagePlan::UpToDate
    );
    assert_eq!(
        plan_messages(&history, bot, &expected(&["One"])),
        MessagePlan::Replace(vec![history[0].id, history[1].id])
    );
    assert_eq!(
        plan_messages(&[], bot, &expected(&["One"])),
        MessagePlan::Replace(vec![])
    );
}
