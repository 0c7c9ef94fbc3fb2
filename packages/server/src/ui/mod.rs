//! Chat relay server: HTTP API and WebSocket channel.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
