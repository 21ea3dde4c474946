//! Placeholder substitution in channel messages.
//!
//! `<<#channel-name>>` becomes a channel mention and `<<@&role-name>>` a role mention.
//! Every placeholder must resolve against the live guild.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::{
    error::reconcile::ReconcileError,
    remote::lookup::{EntityKind, GuildState},
};

static CHANNEL_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<<#([a-zA-Z0-9 _-]+)>>").expect("Invalid channel placeholder regex")
});

static ROLE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<<@&([a-zA-Z0-9 _-]+)>>").expect("Invalid role placeholder regex")
});

/// Placeholder text and the name inside it, for every match in `message`.
fn placeholders(pattern: &Regex, message: &str) -> Vec<(String, String)> {
    pattern
        .captures_iter(message)
        .map(|captures| (captures[0].to_string(), captures[1].to_string()))
        .collect()
}

pub async fn insert_mentions(
    state: &GuildState<'_>,
    message: &str,
) -> Result<String, ReconcileError> {
    let mut resolved = message.to_string();

    for (placeholder, name) in placeholders(&CHANNEL_PLACEHOLDER, message) {
        let channel = state.find(EntityKind::PostableChannel, &name).await?;
        debug!("Found mentioned channel {}", name);
        resolved = resolved.replace(&placeholder, &channel.mention());
    }

    for (placeholder, name) in placeholders(&ROLE_PLACEHOLDER, message) {
        let role = state.find(EntityKind::Role, &name).await?;
        debug!("Found mentioned role {}", name);
        resolved = resolved.replace(&placeholder, &role.mention());
    }

    Ok(resolved)
}

pub async fn insert_mentions_into_messages(
    state: &GuildState<'_>,
    messages: &[String],
) -> Result<Vec<String>, ReconcileError> {
    info!("Insert mentions in messages");
    let mut resolved = Vec::with_capacity(messages.len());
    for message in messages {
        resolved.push(insert_mentions(state, message).await?);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_channel_and_role_placeholders() {
        let message = "See <<#rules>> and ping <<@&Event Team>> or <<#help-desk_2>>";

        assert_eq!(
            placeholders(&CHANNEL_PLACEHOLDER, message),
            vec![
                ("<<#rules>>".to_string(), "rules".to_string()),
                ("<<#help-desk_2>>".to_string(), "help-desk_2".to_string()),
            ]
        );
        assert_eq!(
            placeholders(&ROLE_PLACEHOLDER, message),
            vec![("<<@&Event Team>>".to_string(), "Event Team".to_string())]
        );
    }

    #[test]
    fn ignores_names_outside_the_placeholder_alphabet() {
        assert!(placeholders(&CHANNEL_PLACEHOLDER, "<<#café>>").is_empty());
        assert!(placeholders(&ROLE_PLACEHOLDER, "<#123> <@&456>").is_empty());
    }
}
