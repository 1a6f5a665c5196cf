//! Registry configuration

/// Configuration options for room registries
///
/// The capacity cap is business logic, not tuning: rooms exist to pair
/// exactly two peers. It is a construction parameter rather than a literal so
/// the contract stays visible and testable.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum members per room
    pub room_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { room_capacity: 2 }
    }
}

impl RegistryConfig {
    /// Set the room capacity (minimum 1)
    pub fn room_capacity(mut self, capacity: usize) -> Self {
        self.room_capacity = capacity.max(1);
        self
    }
}
