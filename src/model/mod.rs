//! Declarative guild configuration model.

pub mod channel;
pub mod guild;
pub mod level;
pub mod permission;
pub mod role;
pub mod text;
