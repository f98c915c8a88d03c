//! Per-field update semantics.
//!
//! Every updatable field is governed by a [`MergePolicy`]. The default for
//! each field lives in the API configuration and can be overridden per
//! deployment.

use std::fmt;
use std::str::FromStr;

/// How a field in an update payload is combined with the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// The stored value is replaced by the payload value. An omitted field
    /// resets to its empty value (`""` or `None`).
    Overwrite,
    /// The stored value is replaced only when the payload supplies a
    /// non-empty value.
    MergeIfPresent,
}

impl MergePolicy {
    /// Combine `current` with the optional `incoming` value.
    pub fn apply<T: Presence + Default>(self, current: T, incoming: Option<T>) -> T {
        match self {
            MergePolicy::Overwrite => incoming.unwrap_or_default(),
            MergePolicy::MergeIfPresent => match incoming {
                Some(value) if value.is_present() => value,
                _ => current,
            },
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::Overwrite => f.write_str("overwrite"),
            MergePolicy::MergeIfPresent => f.write_str("merge_if_present"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "overwrite" => Ok(MergePolicy::Overwrite),
            "merge_if_present" | "merge" => Ok(MergePolicy::MergeIfPresent),
            other => Err(format!(
                "unknown merge policy '{other}' (expected 'overwrite' or 'merge_if_present')"
            )),
        }
    }
}

/// Whether a payload value counts as "supplied" under
/// [`MergePolicy::MergeIfPresent`].
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}
