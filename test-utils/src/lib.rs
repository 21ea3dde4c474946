//! Guild Configurator Test Utils
//!
//! Provides shared testing utilities for the guild configurator: factories for Serenity
//! model objects (roles, channels, forum tags, messages) and fixed identifiers for the guild
//! and users taking part in a test.
//!
//! # Overview
//!
//! Serenity models cannot be constructed field by field from outside the crate, so the
//! factories build them by deserializing the JSON Discord's API would return:
//! - **serenity**: Factories for `Role`, `GuildChannel`, `ForumTag`, `Message` and `User`
//! - **fixture**: Guild and user ids shared across tests, plus unique id generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{fixture, serenity::{ChannelFactory, RoleFactory}};
//!
//! #[tokio::test]
//! async fn test_channel_permissions() {
//!     let moderators = RoleFactory::new("Moderators").build();
//!     let category = ChannelFactory::category("Info").build();
//!     let rules = ChannelFactory::text("rules").parent(category.id.get()).build();
//!
//!     // Seed a fake guild with these and run the reconciler...
//! }
//! ```

pub mod fixture;
pub mod serenity;
