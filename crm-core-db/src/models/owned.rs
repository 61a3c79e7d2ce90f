use uuid::Uuid;

use super::identifiable::Identifiable;

/// Trait for records that belong to the user who created them
pub trait Owned: Identifiable {
    /// Returns the ID of the creating user. Fixed at creation, never reassigned.
    fn get_owner_id(&self) -> Uuid;

    /// Whether `user_id` is the owner of this record
    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.get_owner_id() == user_id
    }
}
