//! Categories, channels, forum tags and topics.
//!
//! Categories are positioned by their index among categories. Channel positions come from
//! one counter running across all categories in declaration order, matching Discord's flat
//! channel numbering.

use serenity::all::{ChannelFlags, ChannelId, ForumTag, GuildChannel};
use tracing::{debug, info};

use crate::{
    error::reconcile::ReconcileError,
    model::channel::{CategoryTemplate, ChannelTemplate, ForumChannel},
    remote::{
        edit::{ChannelEdit, ChannelKind, NewChannel},
        lookup::{EntityKind, GuildState},
        GuildRemote,
    },
    service::action::Action,
};

pub type ChannelAction = Action<NewChannel, (ChannelId, Vec<ChannelEdit>)>;

pub fn channel_kind(template: &ChannelTemplate) -> ChannelKind {
    match template {
        ChannelTemplate::Text(_) => ChannelKind::Text,
        ChannelTemplate::Voice(_) => ChannelKind::Voice,
        ChannelTemplate::Forum(_) => ChannelKind::Forum,
    }
}

/// Kind used to look up the live counterpart of a declared channel.
pub fn entity_kind(template: &ChannelTemplate) -> EntityKind {
    match template {
        ChannelTemplate::Text(_) => EntityKind::TextChannel,
        ChannelTemplate::Voice(_) => EntityKind::VoiceChannel,
        ChannelTemplate::Forum(_) => EntityKind::ForumChannel,
    }
}

pub fn plan_category(live: Option<&GuildChannel>, name: &str, position: u16) -> ChannelAction {
    match live {
        None => Action::Create(NewChannel {
            name: name.to_string(),
            kind: ChannelKind::Category,
            parent: None,
            position,
        }),
        Some(category) if category.position != position => {
            Action::Update((category.id, vec![ChannelEdit::Position(position)]))
        }
        Some(_) => Action::NoOp,
    }
}

/// Compares a live channel with its declared category and position.
///
/// Category and position are corrected by separate edits, each only when it drifted.
pub fn plan_channel(
    live: Option<&GuildChannel>,
    name: &str,
    kind: ChannelKind,
    parent: ChannelId,
    position: u16,
) -> ChannelAction {
    let Some(channel) = live else {
        return Action::Create(NewChannel {
            name: name.to_string(),
            kind,
            parent: Some(parent),
            position,
        });
    };

    let mut edits = Vec::new();
    if channel.parent_id != Some(parent) {
        edits.push(ChannelEdit::Parent(parent));
    }
    if channel.position != position {
        edits.push(ChannelEdit::Position(position));
    }

    if edits.is_empty() {
        Action::NoOp
    } else {
        Action::Update((channel.id, edits))
    }
}

/// Declared tags not yet present on the forum, in declaration order and without repeats.
pub fn missing_tags<'a>(existing: &[ForumTag], declared: &'a [String]) -> Vec<&'a str> {
    let mut missing: Vec<&str> = Vec::new();
    for tag in declared {
        let exists = existing.iter().any(|live| live.name == *tag);
        if !exists && !missing.contains(&tag.as_str()) {
            missing.push(tag);
        }
    }
    missing
}

pub struct ChannelService<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> ChannelService<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    pub async fn ensure_categories_and_channels(
        &self,
        categories: &[CategoryTemplate],
    ) -> Result<(), ReconcileError> {
        let state = GuildState::new(self.remote);
        let mut channel_position: u16 = 0;

        for (category_position, template) in (0u16..).zip(categories) {
            self.ensure_category(&template.name, category_position)
                .await?;

            let category = state
                .find_channel(EntityKind::Category, &template.name)
                .await?;
            for channel in &template.channels {
                self.ensure_channel(channel, category.id, channel_position)
                    .await?;
                channel_position += 1;
            }
        }

        Ok(())
    }

    pub async fn ensure_category(&self, name: &str, position: u16) -> Result<(), ReconcileError> {
        info!("Ensure category {} at position {}", name, position);
        let live = GuildState::new(self.remote)
            .try_find_channel(EntityKind::Category, name)
            .await?;

        self.apply(name, plan_category(live.as_ref(), name, position))
            .await
    }

    /// Creates or moves one channel, then reconciles its forum tags if it is a forum.
    pub async fn ensure_channel(
        &self,
        template: &ChannelTemplate,
        parent: ChannelId,
        position: u16,
    ) -> Result<(), ReconcileError> {
        let name = template.name();
        let kind = channel_kind(template);
        info!("Ensure {:?} channel {} at position {}", kind, name, position);

        let live = GuildState::new(self.remote)
            .try_find_channel(entity_kind(template), name)
            .await?;
        self.apply(name, plan_channel(live.as_ref(), name, kind, parent, position))
            .await?;

        match template {
            ChannelTemplate::Forum(forum) => self.ensure_tags(forum).await,
            ChannelTemplate::Text(_) | ChannelTemplate::Voice(_) => Ok(()),
        }
    }

    async fn apply(&self, name: &str, action: ChannelAction) -> Result<(), ReconcileError> {
        match action {
            Action::NoOp => debug!("Channel {} is up to date", name),
            Action::Create(channel) => {
                debug!("Create channel {}", name);
                self.remote.create_channel(channel).await?;
            }
            Action::Update((id, edits)) => {
                for edit in edits {
                    debug!("Update channel {}: {:?}", name, edit);
                    self.remote.edit_channel(id, edit).await?;
                }
            }
        }

        Ok(())
    }

    /// Adds missing forum tags and sets the tag requirement. Tags are never removed.
    pub async fn ensure_tags(&self, template: &ForumChannel) -> Result<(), ReconcileError> {
        info!("Ensure tags {:?} for channel {}", template.tags, template.name);
        let channel = GuildState::new(self.remote)
            .find_channel(EntityKind::ForumChannel, &template.name)
            .await?;

        let missing = missing_tags(&channel.available_tags, &template.tags);
        if !missing.is_empty() {
            let mut tags = channel.available_tags.clone();
            for name in missing {
                debug!("Create tag {}", name);
                tags.push(self.remote.create_forum_tag(channel.id, name).await?);
            }

            debug!("Update available tags for channel {}", template.name);
            self.remote
                .edit_channel(channel.id, ChannelEdit::AvailableTags(tags))
                .await?;
        }

        if template.require_tag && !channel.flags.contains(ChannelFlags::REQUIRE_TAG) {
            debug!("Update 'require_tag' flag");
            self.remote
                .edit_channel(channel.id, ChannelEdit::RequireTag)
                .await?;
        }

        Ok(())
    }

    /// Sets the topic of every text and forum channel whose live topic differs.
    pub async fn ensure_channel_topics(
        &self,
        categories: &[CategoryTemplate],
    ) -> Result<(), ReconcileError> {
        info!("Ensure channel topics");
        let state = GuildState::new(self.remote);

        for template in categories.iter().flat_map(|category| &category.channels) {
            // voice channels have no topic
            let Some(expected) = template.topic() else {
                continue;
            };

            let channel = state
                .find_channel(entity_kind(template), template.name())
                .await?;
            if channel.topic.as_deref().unwrap_or_default() != expected {
                debug!("Update topic of channel {}", template.name());
                self.remote
                    .edit_channel(channel.id, ChannelEdit::Topic(expected.to_string()))
                    .await?;
            }
        }

        Ok(())
    }
}
