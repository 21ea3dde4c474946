//! Gateway connection for applying a configuration.
//!
//! `apply` runs inside a short-lived bot session: the client connects with the `GUILDS`
//! intent only, reconciles the guild once the `ready` event arrives and reports the
//! outcome back to [`start::configure_guild`], which then shuts the shards down. Later
//! `ready` events from reconnects are ignored.

pub mod handler;
pub mod start;
