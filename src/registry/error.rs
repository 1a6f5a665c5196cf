//! Registry error types
//!
//! The relay core has no fatal errors: an over-capacity join is the only
//! failure signaled back to a caller. Operations against an unknown room id
//! are no-ops, not errors.

/// Error type for registry operations
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// Room already holds its maximum number of members
    RoomFull(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::RoomFull(room_id) => write!(f, "Room is full: {}", room_id),
        }
    }
}

impl std::error::Error for RegistryError {}
