use super::*;
use crate::{
    model::guild::{CommunityFeatures, SystemChannel},
    service::guild::GuildSettingsService,
};
use serenity::all::SystemChannelFlags;

fn community_features() -> CommunityFeatures {
    CommunityFeatures {
        guild_description: "A place for volunteers".to_string(),
        rules_channel: "rules".to_string(),
        public_updates_channel: "mod-updates".to_string(),
        safety_alerts_channel: "safety".to_string(),
    }
}

/// Guild holding the three text channels community features refer to.
fn community_guild() -> Result<(MemoryGuild, [ChannelId; 3]), RemoteError> {
    let rules = ChannelFactory::text("rules").build();
    let updates = ChannelFactory::text("mod-updates").build();
    let safety = ChannelFactory::text("safety").build();
    let ids = [rules.id, updates.id, safety.id];
    let remote = guild()?
        .with_channel(rules)
        .with_channel(updates)
        .with_channel(safety);

    Ok((remote, ids))
}

/// Tests configuring the system channel and its notification flags.
///
/// Verifies that the channel is set, that disabled notifications become suppress bits,
/// and that a second run makes no calls.
///
/// Expected: Ok with SystemChannel and SystemChannelFlags edits, then no calls
#[tokio::test]
async fn sets_system_channel_and_flags() -> Result<(), AppError> {
    let welcome = ChannelFactory::text("welcome").build();
    let welcome_id = welcome.id;
    let remote = guild()?.with_channel(welcome);
    let template = SystemChannel {
        join_notifications: false,
        ..SystemChannel::named("welcome")
    };
    let service = GuildSettingsService::new(&remote);

    service.ensure_system_channel(&template).await?;
    assert_eq!(
        remote.take_calls().await,
        vec![
            RemoteCall::EditGuild(GuildEdit::SystemChannel(welcome_id)),
            RemoteCall::EditGuild(GuildEdit::SystemChannelFlags(
                SystemChannelFlags::from_bits_retain(1)
            )),
        ]
    );

    service.ensure_system_channel(&template).await?;
    assert_eq!(remote.calls().await, vec![]);

    Ok(())
}

/// Tests replacing a system channel pointing elsewhere.
///
/// Expected: Ok with one SystemChannel edit to the declared channel
#[tokio::test]
async fn replaces_other_system_channel() -> Result<(), AppError> {
    let general = ChannelFactory::text("general").build();
    let welcome = ChannelFactory::text("welcome").build();
    let welcome_id = welcome.id;
    let settings = GuildSettings {
        system_channel_id: Some(general.id),
        ..GuildSettings::default()
    };
    let remote = guild()?
        .with_settings(settings)
        .with_channel(general)
        .with_channel(welcome);

    GuildSettingsService::new(&remote)
        .ensure_system_channel(&SystemChannel::named("welcome"))
        .await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::EditGuild(GuildEdit::SystemChannel(welcome_id))]
    );

    Ok(())
}

/// Tests updating the preferred locale.
///
/// Expected: Ok with one PreferredLocale edit, then no calls
#[tokio::test]
async fn updates_preferred_locale() -> Result<(), AppError> {
    let remote = guild()?;
    let service = GuildSettingsService::new(&remote);

    service.ensure_preferred_locale(Locale::German).await?;
    service.ensure_preferred_locale(Locale::German).await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::EditGuild(GuildEdit::PreferredLocale(
            Locale::German
        ))]
    );
    assert_eq!(remote.current_settings().await.preferred_locale, "de");

    Ok(())
}

/// Tests enabling community features on a guild without them.
///
/// Verifies that verification is raised to medium and notifications are restricted to
/// mentions before the feature is enabled together with its channels, description and
/// the all-members content filter.
///
/// Expected: Ok with three guild edits in order
#[tokio::test]
async fn enables_community_features() -> Result<(), AppError> {
    let (remote, [rules, updates, safety]) = community_guild()?;

    GuildSettingsService::new(&remote)
        .ensure_community_features(&community_features())
        .await?;

    assert_eq!(
        remote.calls().await,
        vec![
            RemoteCall::EditGuild(GuildEdit::VerificationLevel(VerificationLevel::Medium)),
            RemoteCall::EditGuild(GuildEdit::DefaultNotifications(
                NotificationLevel::OnlyMentions
            )),
            RemoteCall::EditGuild(GuildEdit::EnableCommunity(EnableCommunity {
                rules_channel: rules,
                public_updates_channel: updates,
                safety_alerts_channel: safety,
                description: "A place for volunteers".to_string(),
                explicit_content_filter: ContentFilter::AllMembers,
            })),
        ]
    );
    let settings = remote.current_settings().await;
    assert!(settings.has_community());
    assert_eq!(settings.explicit_content_filter, ContentFilter::AllMembers);

    Ok(())
}

/// Tests a guild that already has community features.
///
/// Verifies that the feature is not enabled again and that only the notification level
/// is corrected.
///
/// Expected: Ok with one DefaultNotifications edit
#[tokio::test]
async fn keeps_existing_community_features() -> Result<(), AppError> {
    let (remote, _) = community_guild()?;
    let remote = remote.with_settings(community_settings(VerificationLevel::High));

    GuildSettingsService::new(&remote)
        .ensure_community_features(&community_features())
        .await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::EditGuild(GuildEdit::DefaultNotifications(
            NotificationLevel::OnlyMentions
        ))]
    );

    Ok(())
}

/// Tests enabling community features when a required channel is missing.
///
/// Verifies that the run fails before the feature is enabled. The earlier level changes
/// stay applied.
///
/// Expected: Err(NotFound) for the safety alerts channel
#[tokio::test]
async fn fails_community_without_required_channel() -> Result<(), AppError> {
    let remote = guild()?
        .with_channel(ChannelFactory::text("rules").build())
        .with_channel(ChannelFactory::text("mod-updates").build());

    let result = GuildSettingsService::new(&remote)
        .ensure_community_features(&community_features())
        .await;

    let Err(ReconcileError::NotFound { kind, name }) = result else {
        panic!("expected NotFound, got {result:?}");
    };
    assert_eq!(kind, EntityKind::TextChannel);
    assert_eq!(name, "safety");
    assert!(!remote.current_settings().await.has_community());
    assert_eq!(remote.calls().await.len(), 2);

    Ok(())
}
