//! Connection registry implementations.
//!
//! - `inmemory`: per-room locked map, single process

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
