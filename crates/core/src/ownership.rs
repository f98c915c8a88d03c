//! Ownership guard applied before any mutation of a user-owned record.
//!
//! Photos, comments, and social media links each carry an owning user id.
//! Services fetch the record, then call [`ensure_owner`] with the acting
//! principal's id before updating or deleting it.

use crate::error::CoreError;
use crate::types::DbId;

/// A record with exactly one owning user.
pub trait Owned {
    /// Entity name used in error messages (e.g. `"Photo"`).
    const ENTITY: &'static str;

    fn id(&self) -> DbId;

    fn owner_id(&self) -> DbId;
}

/// Reject the mutation unless `user_id` owns `record`.
pub fn ensure_owner<T: Owned>(record: &T, user_id: DbId) -> Result<(), CoreError> {
    if record.owner_id() != user_id {
        return Err(CoreError::NotOwner {
            entity: T::ENTITY,
            id: record.id(),
            owner_id: record.owner_id(),
            user_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct Note {
        id: DbId,
        user_id: DbId,
    }

    impl Owned for Note {
        const ENTITY: &'static str = "Note";

        fn id(&self) -> DbId {
            self.id
        }

        fn owner_id(&self) -> DbId {
            self.user_id
        }
    }

    #[test]
    fn owner_passes() {
        let note = Note { id: 1, user_id: 7 };
        assert!(ensure_owner(&note, 7).is_ok());
    }

    #[test]
    fn other_user_is_rejected_with_both_ids() {
        let note = Note { id: 1, user_id: 7 };
        assert_matches!(
            ensure_owner(&note, 8),
            Err(CoreError::NotOwner {
                entity: "Note",
                id: 1,
                owner_id: 7,
                user_id: 8,
            })
        );
    }
}
