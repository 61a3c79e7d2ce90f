use uuid::Uuid;

/// Trait for records that are uniquely identified by a generated UUID
pub trait Identifiable {
    /// Returns the unique identifier of the record
    fn get_id(&self) -> Uuid;
}
