use tracing::info;

use crate::{
    error::reconcile::ReconcileError,
    model::guild::GuildConfig,
    remote::GuildRemote,
    service::{
        channel::ChannelService, guild::GuildSettingsService, message::MessageService,
        permission::PermissionService, role::RoleService,
    },
};

/// Brings a guild in line with a configuration.
///
/// Steps run in a fixed order so that everything an entity refers to exists before it:
/// roles, system channel, preferred locale, community features, categories and channels,
/// permissions, topics, messages. The first failing step aborts the run. Changes already
/// made stay in place and running again continues from there.
pub struct GuildConfigurator<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> GuildConfigurator<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    pub async fn apply_configuration(&self, config: &GuildConfig) -> Result<(), ReconcileError> {
        let guild_service = GuildSettingsService::new(self.remote);
        let channel_service = ChannelService::new(self.remote);

        guild_service.check_config_compatibility(config).await?;

        info!("Configuring roles");
        let role_service = RoleService::new(self.remote);
        for role in &config.roles {
            role_service.ensure_role(role).await?;
        }

        if let Some(system_channel) = &config.system_channel {
            info!("Configuring system channel");
            guild_service.ensure_system_channel(system_channel).await?;
        }

        if let Some(locale) = config.preferred_locale {
            info!("Configuring preferred locale");
            guild_service.ensure_preferred_locale(locale).await?;
        }

        if let Some(features) = &config.community_features {
            info!("Configuring 'COMMUNITY' features");
            guild_service.ensure_community_features(features).await?;
        }

        info!("Configuring categories and channels");
        channel_service
            .ensure_categories_and_channels(&config.categories)
            .await?;

        info!("Configuring permissions");
        PermissionService::new(self.remote)
            .ensure_category_and_channel_permissions(&config.categories)
            .await?;

        info!("Configuring channel topics");
        channel_service
            .ensure_channel_topics(&config.categories)
            .await?;

        info!("Configuring channel default messages");
        MessageService::new(self.remote)
            .ensure_default_messages(&config.categories)
            .await?;

        Ok(())
    }
}
