//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the joined projection
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Selector types that identify a row by surrogate id or natural key
//!
//! Nested collections (`tl_languages`, `links`, `chapters`) are not columns;
//! they start empty and are filled by the service layer.

pub mod chapter;
pub mod comic;
pub mod language;
pub mod link;
pub mod website;
