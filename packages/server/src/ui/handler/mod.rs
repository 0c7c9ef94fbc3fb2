//! Request handlers.

mod http;
mod websocket;

pub use http::{create_room, get_history, health_check, join_room};
pub use websocket::websocket_handler;
