//! Infrastructure layer: concrete implementations of the domain interfaces
//! and the wire-format DTOs.

pub mod archive;
pub mod dto;
pub mod registry;
pub mod repository;
