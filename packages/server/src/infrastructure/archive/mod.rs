//! ArchiveStore implementations.
//!
//! - `jsonl`: one JSON object per line in a local file

pub mod jsonl;

pub use jsonl::JsonLinesArchive;
