//! Per-room membership entry
//!
//! Signaling rooms keep members in join order: the first member created the
//! room and is the peer a late joiner negotiates against.

use std::time::Instant;

use crate::ConnId;

/// Occupancy state of a room
///
/// A room is created on first join and deleted when it empties, so there is
/// no `Empty` variant: an empty room does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Below capacity, accepting joins
    Waiting,
    /// At capacity, further joins are rejected
    Full,
}

/// Entry for a single signaling room
#[derive(Debug)]
pub struct RoomEntry {
    /// Members in join order
    members: Vec<ConnId>,

    /// Maximum members (from registry config)
    capacity: usize,

    /// When the room was created
    pub created_at: Instant,
}

impl RoomEntry {
    /// Create an empty room with the given capacity
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
            created_at: Instant::now(),
        }
    }

    /// Current occupancy phase
    pub fn phase(&self) -> RoomPhase {
        if self.members.len() >= self.capacity {
            RoomPhase::Full
        } else {
            RoomPhase::Waiting
        }
    }

    /// Whether the room is at capacity
    pub fn is_full(&self) -> bool {
        self.phase() == RoomPhase::Full
    }

    /// Whether the room has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the connection is a member
    pub fn contains(&self, conn: ConnId) -> bool {
        self.members.contains(&conn)
    }

    /// Members in join order
    pub fn members(&self) -> &[ConnId] {
        &self.members
    }

    /// Append a member; caller must have checked capacity and membership
    pub(super) fn push(&mut self, conn: ConnId) {
        debug_assert!(!self.is_full());
        debug_assert!(!self.contains(conn));
        self.members.push(conn);
    }

    /// Remove a member if present; returns whether it was a member
    pub(super) fn remove(&mut self, conn: ConnId) -> bool {
        let before = self.members.len();
        self.members.retain(|&m| m != conn);
        self.members.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut room = RoomEntry::new(2);
        assert_eq!(room.phase(), RoomPhase::Waiting);

        room.push(1);
        assert_eq!(room.phase(), RoomPhase::Waiting);

        room.push(2);
        assert_eq!(room.phase(), RoomPhase::Full);

        room.remove(1);
        assert_eq!(room.phase(), RoomPhase::Waiting);

        room.remove(2);
        assert!(room.is_empty());
    }

    #[test]
    fn test_members_keep_join_order() {
        let mut room = RoomEntry::new(3);
        room.push(3);
        room.push(1);
        room.push(2);

        assert_eq!(room.members(), &[3, 1, 2]);
    }

    #[test]
    fn test_remove_absent_member() {
        let mut room = RoomEntry::new(2);
        room.push(1);

        assert!(!room.remove(9));
        assert_eq!(room.len(), 1);
    }
}
