//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: real-time channel frames
//! - `http`: request/response bodies of the HTTP API
//! - `archive`: lines written to the message archive

pub mod archive;
pub mod conversion;
pub mod http;
pub mod websocket;
