//! Channel permission overwrites.
//!
//! Category overwrites and channel overwrites are merged into one expected value per role
//! and permission, later templates winning. The live channel is compared through each
//! role's effective permissions in it. Granting a permission to one role can widen what
//! `@everyone` effectively has, so any mismatch rewrites the overwrites of every templated
//! role in a single edit instead of patching one role.

use std::collections::BTreeMap;

use serenity::all::{
    GuildChannel, PermissionOverwrite, PermissionOverwriteType, Permissions, Role, RoleId,
};
use tracing::{debug, info};

use crate::{
    error::reconcile::ReconcileError,
    model::{
        channel::{CategoryTemplate, PermissionOverwriteTemplate},
        permission::Permission,
        role::EVERYONE,
    },
    remote::{edit::ChannelEdit, lookup::GuildState, GuildRemote},
    service::channel::entity_kind,
};

/// Expected allow (`true`) or deny (`false`) per role name and permission.
pub type ExpectedOverwrites = BTreeMap<String, BTreeMap<Permission, bool>>;

pub fn expected_overwrites<'a>(
    templates: impl IntoIterator<Item = &'a PermissionOverwriteTemplate>,
) -> ExpectedOverwrites {
    let mut expected = ExpectedOverwrites::new();
    for template in templates {
        for role in &template.roles {
            let permissions = expected.entry(role.clone()).or_default();
            for permission in &template.allow {
                permissions.insert(*permission, true);
            }
            for permission in &template.deny {
                permissions.insert(*permission, false);
            }
        }
    }
    expected
}

fn apply_overwrite(base: Permissions, overwrite: &PermissionOverwrite) -> Permissions {
    base.difference(overwrite.deny) | overwrite.allow
}

fn role_overwrite(channel: &GuildChannel, role: RoleId) -> Option<&PermissionOverwrite> {
    channel
        .permission_overwrites
        .iter()
        .find(|overwrite| {
            matches!(overwrite.kind, PermissionOverwriteType::Role(id) if id == role)
        })
}

/// Effective permissions of a role in a channel.
///
/// Starts from the `@everyone` permissions plus the role's own, returns every permission for
/// administrators, then applies the `@everyone` overwrite and finally the role's overwrite.
pub fn role_permissions_in(channel: &GuildChannel, everyone: &Role, role: &Role) -> Permissions {
    let mut permissions = everyone.permissions;
    if role.id != everyone.id {
        permissions |= role.permissions;
    }
    if permissions.contains(Permissions::ADMINISTRATOR) {
        return Permissions::from_bits_retain(u64::MAX);
    }

    if let Some(overwrite) = role_overwrite(channel, everyone.id) {
        permissions = apply_overwrite(permissions, overwrite);
    }
    if role.id == everyone.id {
        return permissions;
    }

    match role_overwrite(channel, role.id) {
        Some(overwrite) => apply_overwrite(permissions, overwrite),
        None => permissions,
    }
}

pub fn build_overwrite(
    role: RoleId,
    expected: &BTreeMap<Permission, bool>,
) -> PermissionOverwrite {
    let mut allow = Permissions::empty();
    let mut deny = Permissions::empty();
    for (permission, allowed) in expected {
        if *allowed {
            allow |= permission.bits();
        } else {
            deny |= permission.bits();
        }
    }

    PermissionOverwrite {
        allow,
        deny,
        kind: PermissionOverwriteType::Role(role),
    }
}

/// Whether a role's effective permissions differ from any of its templated values.
pub fn differs(current: Permissions, expected: &BTreeMap<Permission, bool>) -> bool {
    expected
        .iter()
        .any(|(permission, allowed)| current.contains(permission.bits()) != *allowed)
}

pub struct PermissionService<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> PermissionService<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    pub async fn ensure_category_and_channel_permissions(
        &self,
        categories: &[CategoryTemplate],
    ) -> Result<(), ReconcileError> {
        let state = GuildState::new(self.remote);

        for category in categories {
            for template in &category.channels {
                let channel = state
                    .find_channel(entity_kind(template), template.name())
                    .await?;
                let expected = expected_overwrites(
                    category
                        .permission_overwrites
                        .iter()
                        .chain(template.permission_overwrites()),
                );
                self.ensure_channel_permissions(&channel, &expected).await?;
            }
        }

        Ok(())
    }

    /// Rewrites all overwrites of the channel when any templated permission is off.
    pub async fn ensure_channel_permissions(
        &self,
        channel: &GuildChannel,
        expected: &ExpectedOverwrites,
    ) -> Result<(), ReconcileError> {
        info!("Ensure permissions for channel {}", channel.name);
        if expected.is_empty() {
            return Ok(());
        }

        let state = GuildState::new(self.remote);
        let everyone = state.find_role(EVERYONE).await?;

        let mut update_required = false;
        let mut overwrites = Vec::with_capacity(expected.len());
        for (role_name, permissions) in expected {
            let role = state.find_role(role_name).await?;
            let current = role_permissions_in(channel, &everyone, &role);
            if differs(current, permissions) {
                debug!("Permissions of role {} differ", role_name);
                update_required = true;
            }
            overwrites.push(build_overwrite(role.id, permissions));
        }

        if update_required {
            debug!("Update permissions");
            self.remote
                .edit_channel(channel.id, ChannelEdit::Overwrites(overwrites))
                .await?;
        }

        Ok(())
    }
}
