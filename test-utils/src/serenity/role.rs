//! Test factory for creating Serenity Role objects.
//!
//! This module provides factory functions for creating mock Serenity `Role` structs
//! for testing purposes. These factories create valid Role objects by deserializing
//! JSON, simulating what Discord's API would return.

use serenity::all::Role;

use crate::fixture::{next_id, GUILD_ID};

/// Factory for creating test roles with customizable fields.
///
/// Defaults to a fresh id, no colour, not hoisted, not mentionable, no permissions and
/// position 1.
pub struct RoleFactory {
    id: u64,
    name: String,
    color: u32,
    hoist: bool,
    mentionable: bool,
    permissions: u64,
    position: u16,
}

impl RoleFactory {
    /// Creates a new RoleFactory with default values and a unique id.
    ///
    /// # Arguments
    /// - `name` - Role name
    ///
    /// # Returns
    /// - `RoleFactory` - Factory instance with defaults
    pub fn new(name: &str) -> Self {
        Self {
            id: next_id(),
            name: name.to_string(),
            color: 0,
            hoist: false,
            mentionable: false,
            permissions: 0,
            position: 1,
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn hoist(mut self, hoist: bool) -> Self {
        self.hoist = hoist;
        self
    }

    pub fn mentionable(mut self, mentionable: bool) -> Self {
        self.mentionable = mentionable;
        self
    }

    /// Sets the role's guild-wide permission bits.
    pub fn permissions(mut self, permissions: u64) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn position(mut self, position: u16) -> Self {
        self.position = position;
        self
    }

    /// Builds the role.
    ///
    /// # Panics
    /// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
    pub fn build(self) -> Role {
        serde_json::from_value(serde_json::json!({
            "id": self.id.to_string(),
            "name": self.name,
            "color": self.color,
            "colors": { "primary_color": self.color },
            "hoist": self.hoist,
            "icon": null,
            "unicode_emoji": null,
            "position": self.position,
            "permissions": self.permissions.to_string(),
            "managed": false,
            "mentionable": self.mentionable,
        }))
        .expect("Failed to create test role - invalid JSON structure")
    }
}

/// Creates a test Serenity Role with customizable fields.
///
/// Shorthand for [`RoleFactory`] when only id, name, colour and position matter.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `color` - Role color as a 32-bit integer (RGB)
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Returns
/// - `Role` - A valid Serenity Role struct for testing
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::role::create_test_role;
///
/// let role = create_test_role(123456789, "Moderators", 0xFF0000, 10);
/// assert_eq!(role.name, "Moderators");
/// assert_eq!(role.colour.0, 0xFF0000);
/// ```
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: u16) -> Role {
    RoleFactory::new(name)
        .id(role_id)
        .color(color)
        .position(position)
        .build()
}

/// Creates the `@everyone` role of the test guild with the given permission bits.
///
/// Its id equals the guild id, as on Discord.
pub fn create_everyone_role(permissions: u64) -> Role {
    RoleFactory::new("@everyone")
        .id(GUILD_ID)
        .permissions(permissions)
        .position(0)
        .build()
}
