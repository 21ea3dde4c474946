//! Permission vocabulary for role and overwrite templates.
//!
//! Names follow the flag names used in configuration documents, several of which are
//! aliases for the same Discord permission bit (`read_messages` and `view_channel`,
//! `manage_permissions` and `manage_roles`, ...). Each name resolves to its bit in a
//! serenity [`Permissions`] set.

use serde::{Deserialize, Serialize};
use serenity::all::Permissions;

/// A single permission name as written in a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    AddReactions,
    Administrator,
    AttachFiles,
    BanMembers,
    ChangeNickname,
    Connect,
    CreateEvents,
    CreateExpressions,
    CreateInstantInvite,
    CreatePolls,
    CreatePrivateThreads,
    CreatePublicThreads,
    DeafenMembers,
    EmbedLinks,
    ExternalEmojis,
    ExternalStickers,
    KickMembers,
    ManageChannels,
    ManageEmojis,
    ManageEmojisAndStickers,
    ManageEvents,
    ManageExpressions,
    ManageGuild,
    ManageMessages,
    ManageNicknames,
    ManagePermissions,
    ManageRoles,
    ManageThreads,
    ManageWebhooks,
    MentionEveryone,
    ModerateMembers,
    MoveMembers,
    MuteMembers,
    PrioritySpeaker,
    ReadMessageHistory,
    ReadMessages,
    RequestToSpeak,
    SendMessages,
    SendMessagesInThreads,
    SendPolls,
    SendTtsMessages,
    SendVoiceMessages,
    Speak,
    Stream,
    UseApplicationCommands,
    UseEmbeddedActivities,
    UseExternalApps,
    UseExternalEmojis,
    UseExternalSounds,
    UseExternalStickers,
    UseSoundboard,
    UseVoiceActivation,
    ViewAuditLog,
    ViewChannel,
    ViewCreatorMonetizationAnalytics,
    ViewGuildInsights,
}

impl Permission {
    /// The serenity permission set containing only this permission.
    pub fn bits(self) -> Permissions {
        match self {
            Self::CreateInstantInvite => Permissions::CREATE_INSTANT_INVITE,
            Self::KickMembers => Permissions::KICK_MEMBERS,
            Self::BanMembers => Permissions::BAN_MEMBERS,
            Self::Administrator => Permissions::ADMINISTRATOR,
            Self::ManageChannels => Permissions::MANAGE_CHANNELS,
            Self::ManageGuild => Permissions::MANAGE_GUILD,
            Self::AddReactions => Permissions::ADD_REACTIONS,
            Self::ViewAuditLog => Permissions::VIEW_AUDIT_LOG,
            Self::PrioritySpeaker => Permissions::PRIORITY_SPEAKER,
            Self::Stream => Permissions::STREAM,
            Self::ViewChannel | Self::ReadMessages => Permissions::VIEW_CHANNEL,
            Self::SendMessages => Permissions::SEND_MESSAGES,
            Self::SendTtsMessages => Permissions::SEND_TTS_MESSAGES,
            Self::ManageMessages => Permissions::MANAGE_MESSAGES,
            Self::EmbedLinks => Permissions::EMBED_LINKS,
            Self::AttachFiles => Permissions::ATTACH_FILES,
            Self::ReadMessageHistory => Permissions::READ_MESSAGE_HISTORY,
            Self::MentionEveryone => Permissions::MENTION_EVERYONE,
            Self::UseExternalEmojis | Self::ExternalEmojis => Permissions::USE_EXTERNAL_EMOJIS,
            Self::ViewGuildInsights => Permissions::VIEW_GUILD_INSIGHTS,
            Self::Connect => Permissions::CONNECT,
            Self::Speak => Permissions::SPEAK,
            Self::MuteMembers => Permissions::MUTE_MEMBERS,
            Self::DeafenMembers => Permissions::DEAFEN_MEMBERS,
            Self::MoveMembers => Permissions::MOVE_MEMBERS,
            Self::UseVoiceActivation => Permissions::USE_VAD,
            Self::ChangeNickname => Permissions::CHANGE_NICKNAME,
            Self::ManageNicknames => Permissions::MANAGE_NICKNAMES,
            Self::ManageRoles | Self::ManagePermissions => Permissions::MANAGE_ROLES,
            Self::ManageWebhooks => Permissions::MANAGE_WEBHOOKS,
            Self::ManageExpressions | Self::ManageEmojis | Self::ManageEmojisAndStickers => {
                Permissions::MANAGE_GUILD_EXPRESSIONS
            }
            Self::UseApplicationCommands => Permissions::USE_APPLICATION_COMMANDS,
            Self::RequestToSpeak => Permissions::REQUEST_TO_SPEAK,
            Self::ManageEvents => Permissions::MANAGE_EVENTS,
            Self::ManageThreads => Permissions::MANAGE_THREADS,
            Self::CreatePublicThreads => Permissions::CREATE_PUBLIC_THREADS,
            Self::CreatePrivateThreads => Permissions::CREATE_PRIVATE_THREADS,
            Self::UseExternalStickers | Self::ExternalStickers => {
                Permissions::USE_EXTERNAL_STICKERS
            }
            Self::SendMessagesInThreads => Permissions::SEND_MESSAGES_IN_THREADS,
            Self::UseEmbeddedActivities => Permissions::USE_EMBEDDED_ACTIVITIES,
            Self::ModerateMembers => Permissions::MODERATE_MEMBERS,
            Self::ViewCreatorMonetizationAnalytics => {
                Permissions::VIEW_CREATOR_MONETIZATION_ANALYTICS
            }
            Self::UseSoundboard => Permissions::USE_SOUNDBOARD,
            Self::CreateExpressions => Permissions::CREATE_GUILD_EXPRESSIONS,
            Self::CreateEvents => Permissions::CREATE_EVENTS,
            Self::UseExternalSounds => Permissions::USE_EXTERNAL_SOUNDS,
            Self::SendVoiceMessages => Permissions::SEND_VOICE_MESSAGES,
            Self::SendPolls | Self::CreatePolls => Permissions::SEND_POLLS,
            Self::UseExternalApps => Permissions::USE_EXTERNAL_APPS,
        }
    }
}

/// Combines a list of permission names into one permission set.
pub fn permission_set(permissions: &[Permission]) -> Permissions {
    permissions
        .iter()
        .fold(Permissions::empty(), |set, permission| set | permission.bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_a_bit() {
        assert_eq!(Permission::ReadMessages.bits(), Permission::ViewChannel.bits());
        assert_eq!(Permission::ManagePermissions.bits(), Permission::ManageRoles.bits());
        assert_eq!(Permission::ExternalEmojis.bits(), Permission::UseExternalEmojis.bits());
    }

    #[test]
    fn maps_names_to_serenity_flags() {
        assert_eq!(Permission::SendMessages.bits(), Permissions::SEND_MESSAGES);
        assert_eq!(Permission::Administrator.bits(), Permissions::ADMINISTRATOR);
        assert_eq!(Permission::ManageThreads.bits(), Permissions::MANAGE_THREADS);
    }

    #[test]
    fn renamed_flags_keep_their_discord_bits() {
        assert_eq!(Permission::UseVoiceActivation.bits().bits(), 1 << 25);
        assert_eq!(Permission::ManageEmojisAndStickers.bits().bits(), 1 << 30);
        assert_eq!(Permission::CreateExpressions.bits().bits(), 1 << 43);
        assert_eq!(Permission::CreatePolls.bits().bits(), 1 << 49);
        assert_eq!(Permission::UseExternalApps.bits().bits(), 1 << 50);
    }

    #[test]
    fn parses_snake_case_names() {
        let parsed: Vec<Permission> =
            serde_json::from_str(r#"["send_tts_messages", "use_voice_activation"]"#).unwrap();

        assert_eq!(
            parsed,
            vec![Permission::SendTtsMessages, Permission::UseVoiceActivation]
        );
    }

    #[test]
    fn combines_permission_list() {
        let set = permission_set(&[Permission::ViewChannel, Permission::SendMessages]);

        assert_eq!(set, Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES);
        assert_eq!(permission_set(&[]), Permissions::empty());
    }
}
