//! Utilities shared by the Agora chat relay crates.

pub mod logger;
pub mod time;
