//! Store implementations.
//!
//! - `inmemory`: `HashMap` backed, used without a database URL and in tests
//! - `sqlite`: sqlx / SQLite backed, used with `--database-url`

pub mod inmemory;
pub mod sqlite;

pub use inmemory::{InMemoryHistoryStore, InMemoryRoomStore};
pub use sqlite::{SqliteDatabase, SqliteHistoryStore, SqliteRoomStore};
