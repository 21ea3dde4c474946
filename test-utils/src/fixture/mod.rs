//! Fixed identifiers shared across tests.
//!
//! Ids handed out by [`next_id`] start well above the fixed ones, so factories never
//! collide with them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Id of the guild under test. Also the id of its `@everyone` role.
pub const GUILD_ID: u64 = 100;

/// User id of the bot running the configurator.
pub const BOT_USER_ID: u64 = 200;

/// A human member of the guild.
pub const HUMAN_USER_ID: u64 = 300;

/// Counter for generating unique ids in tests.
static COUNTER: AtomicU64 = AtomicU64::new(10_000);

/// Gets the next unique id for test data.
///
/// # Returns
/// - `u64` - Next unique id
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}
