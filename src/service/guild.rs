use serenity::all::SystemChannelFlags;
use tracing::{debug, info};

use crate::{
    error::reconcile::ReconcileError,
    model::{
        guild::{CommunityFeatures, GuildConfig, SystemChannel},
        level::{ContentFilter, Locale, NotificationLevel, VerificationLevel},
    },
    remote::{
        edit::{EnableCommunity, GuildEdit},
        lookup::{EntityKind, GuildState},
        GuildRemote,
    },
};

const SUPPRESS_JOIN_NOTIFICATIONS: u64 = 1 << 0;
const SUPPRESS_PREMIUM_SUBSCRIPTIONS: u64 = 1 << 1;
const SUPPRESS_GUILD_REMINDER_NOTIFICATIONS: u64 = 1 << 2;
const SUPPRESS_JOIN_NOTIFICATION_REPLIES: u64 = 1 << 3;
const SUPPRESS_ROLE_SUBSCRIPTION_PURCHASE_NOTIFICATIONS: u64 = 1 << 4;
const SUPPRESS_ROLE_SUBSCRIPTION_PURCHASE_NOTIFICATION_REPLIES: u64 = 1 << 5;

/// Discord stores the system channel settings as "suppress" bits, set for disabled messages.
pub fn system_channel_flags(template: &SystemChannel) -> SystemChannelFlags {
    let suppressed = [
        (template.join_notifications, SUPPRESS_JOIN_NOTIFICATIONS),
        (template.premium_subscriptions, SUPPRESS_PREMIUM_SUBSCRIPTIONS),
        (
            template.guild_reminder_notifications,
            SUPPRESS_GUILD_REMINDER_NOTIFICATIONS,
        ),
        (
            template.join_notification_replies,
            SUPPRESS_JOIN_NOTIFICATION_REPLIES,
        ),
        (
            template.role_subscription_purchase_notifications,
            SUPPRESS_ROLE_SUBSCRIPTION_PURCHASE_NOTIFICATIONS,
        ),
        (
            template.role_subscription_purchase_notification_replies,
            SUPPRESS_ROLE_SUBSCRIPTION_PURCHASE_NOTIFICATION_REPLIES,
        ),
    ]
    .into_iter()
    .filter(|(enabled, _)| !enabled)
    .fold(0, |bits, (_, bit)| bits | bit);

    SystemChannelFlags::from_bits_retain(suppressed)
}

/// Guild-wide settings: system channel, locale and community features.
pub struct GuildSettingsService<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> GuildSettingsService<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    /// Fails when the guild already has community features but the configuration would
    /// lower verification below what they require.
    pub async fn check_config_compatibility(
        &self,
        config: &GuildConfig,
    ) -> Result<(), ReconcileError> {
        let settings = self.remote.settings().await?;
        if settings.has_community() && config.verification_level < VerificationLevel::Medium {
            return Err(ReconcileError::Precondition(
                "The Community feature requires a verification level of at least medium"
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub async fn ensure_system_channel(
        &self,
        template: &SystemChannel,
    ) -> Result<(), ReconcileError> {
        info!("Ensure system channel configuration");
        let state = GuildState::new(self.remote);

        let settings = self.remote.settings().await?;
        let current = match settings.system_channel_id {
            Some(id) => state.channel_by_id(id).await?,
            None => None,
        };
        if current.map_or(true, |channel| channel.name != template.name) {
            debug!("Update system channel");
            let channel = state
                .find_channel(EntityKind::TextChannel, &template.name)
                .await?;
            self.remote
                .edit_guild(GuildEdit::SystemChannel(channel.id))
                .await?;
        }

        let target = system_channel_flags(template);
        if self.remote.settings().await?.system_channel_flags != target {
            debug!("Update system channel flags");
            self.remote
                .edit_guild(GuildEdit::SystemChannelFlags(target))
                .await?;
        }

        Ok(())
    }

    pub async fn ensure_preferred_locale(&self, locale: Locale) -> Result<(), ReconcileError> {
        info!("Ensure preferred locale {}", locale.code());
        let settings = self.remote.settings().await?;
        if settings.preferred_locale != locale.code() {
            debug!("Update preferred locale");
            self.remote
                .edit_guild(GuildEdit::PreferredLocale(locale))
                .await?;
        }

        Ok(())
    }

    /// Raises verification, restricts default notifications and enables the community
    /// feature together with the channels and settings Discord requires for it.
    pub async fn ensure_community_features(
        &self,
        features: &CommunityFeatures,
    ) -> Result<(), ReconcileError> {
        info!("Ensure 'COMMUNITY' feature configuration");
        let settings = self.remote.settings().await?;

        if settings.verification_level < VerificationLevel::Medium {
            debug!("Raise verification level to medium");
            self.remote
                .edit_guild(GuildEdit::VerificationLevel(VerificationLevel::Medium))
                .await?;
        }

        if settings.default_notifications != NotificationLevel::OnlyMentions {
            debug!("Restrict default notifications to mentions");
            self.remote
                .edit_guild(GuildEdit::DefaultNotifications(
                    NotificationLevel::OnlyMentions,
                ))
                .await?;
        }

        if settings.has_community() {
            return Ok(());
        }

        let state = GuildState::new(self.remote);
        let rules = state
            .find_channel(EntityKind::TextChannel, &features.rules_channel)
            .await?;
        let public_updates = state
            .find_channel(EntityKind::TextChannel, &features.public_updates_channel)
            .await?;
        let safety_alerts = state
            .find_channel(EntityKind::TextChannel, &features.safety_alerts_channel)
            .await?;

        if self.remote.settings().await?.verification_level < VerificationLevel::Medium {
            return Err(ReconcileError::Precondition(
                "Cannot enable the Community feature below verification level medium"
                    .to_string(),
            ));
        }

        debug!("Enable guild 'COMMUNITY' feature");
        self.remote
            .edit_guild(GuildEdit::EnableCommunity(EnableCommunity {
                rules_channel: rules.id,
                public_updates_channel: public_updates.id,
                safety_alerts_channel: safety_alerts.id,
                description: features.guild_description.clone(),
                explicit_content_filter: ContentFilter::AllMembers,
            }))
            .await?;

        Ok(())
    }
}
