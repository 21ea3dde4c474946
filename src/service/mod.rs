//! Reconciliation of a guild against its configuration.
//!
//! Each service owns one concern (roles, channels, permissions, guild settings, messages)
//! and compares declared against live state one entity at a time. The comparison itself
//! lives in small `plan_*` functions returning an [`action::Action`]; the services apply
//! the result through the remote. [`configurator::GuildConfigurator`] runs the services
//! in dependency order.

pub mod action;
pub mod channel;
pub mod configurator;
pub mod guild;
pub mod mention;
pub mod message;
pub mod permission;
pub mod role;

#[cfg(test)]
mod test;
