//! Domain building blocks shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds the id/timestamp aliases,
//! the error taxonomy, the ownership guard, the update merge policy, and
//! the sign-up validation rules.

pub mod error;
pub mod merge;
pub mod ownership;
pub mod types;
pub mod validation;
