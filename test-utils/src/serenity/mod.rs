//! Test factories for creating Serenity API objects.
//!
//! This module provides factories for creating mock Serenity structs (Role, GuildChannel,
//! ForumTag, Message) for testing purposes. These factories create valid Serenity objects
//! by deserializing JSON, simulating what Discord's API would return.
//!
//! # Overview
//!
//! Code that reconciles a guild reads roles, channels and messages as Serenity structs.
//! These factories provide a consistent way to create them with sensible defaults while
//! allowing customization of the fields the reconciler looks at.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_message, ChannelFactory, RoleFactory};
//!
//! let volunteers = RoleFactory::new("Volunteers").color(0xFFD700).hoist(true).build();
//! let help = ChannelFactory::forum("help").tags(&["A"]).build();
//! let message = create_test_message(help.id.get(), BOT_USER_ID, "Welcome!");
//! ```
//!
//! # Available Factories
//!
//! - `role::RoleFactory` / `role::create_test_role` - Create Serenity Role objects
//! - `channel::ChannelFactory` - Create Serenity GuildChannel objects of any kind
//! - `channel::create_test_forum_tag` - Create Serenity ForumTag objects
//! - `message::create_test_message` / `message::create_test_user` - Create messages and authors

pub mod channel;
pub mod message;
pub mod role;

// Re-export commonly used functions for convenience
pub use channel::{create_test_forum_tag, ChannelFactory};
pub use message::{create_test_message, create_test_user};
pub use role::{create_everyone_role, create_test_role, RoleFactory};
