//! ID generator port for naming generation runs.

/// Generates unique identifiers.
///
/// Each generation run gets an id for its audit record; replay substitutes
/// a recorded sequence.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
