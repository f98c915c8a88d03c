//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - The `Serialize` projections handed back to API clients

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;
