//! In-memory stores.

mod history;
mod room;

pub use history::InMemoryHistoryStore;
pub use room::InMemoryRoomStore;
