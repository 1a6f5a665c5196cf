//! Statistics for the relay server

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared across connection tasks
#[derive(Debug, Default)]
pub struct RelayStats {
    /// Total connections ever accepted
    total_connections: AtomicU64,
    /// Currently open connections
    active_connections: AtomicU64,
    /// Negotiation messages relayed (offer/answer/ICE, per recipient)
    signals_relayed: AtomicU64,
    /// Chat messages delivered (per recipient)
    chat_messages: AtomicU64,
    /// Emergency notifications pushed (per recipient)
    emergency_notifications: AtomicU64,
}

impl RelayStats {
    /// Create a fresh counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted connection
    pub fn connection_opened(&self) {
        self.total_connections.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a closed connection
    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record relayed negotiation messages
    pub fn add_signals_relayed(&self, count: u64) {
        self.signals_relayed.fetch_add(count, Ordering::Relaxed);
    }

    /// Record delivered chat messages
    pub fn add_chat_messages(&self, count: u64) {
        self.chat_messages.fetch_add(count, Ordering::Relaxed);
    }

    /// Record pushed emergency notifications
    pub fn add_emergency_notifications(&self, count: u64) {
        self.emergency_notifications.fetch_add(count, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of the counters
    pub fn snapshot(&self) -> ServerStats {
        ServerStats {
            total_connections: self.total_connections.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            signals_relayed: self.signals_relayed.load(Ordering::Relaxed),
            chat_messages: self.chat_messages.load(Ordering::Relaxed),
            emergency_notifications: self.emergency_notifications.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time server statistics
#[derive(Debug, Clone, Default)]
pub struct ServerStats {
    /// Total connections ever accepted
    pub total_connections: u64,
    /// Currently open connections
    pub active_connections: u64,
    /// Negotiation messages relayed
    pub signals_relayed: u64,
    /// Chat messages delivered
    pub chat_messages: u64,
    /// Emergency notifications pushed
    pub emergency_notifications: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_are_zero() {
        let stats = RelayStats::new().snapshot();

        assert_eq!(stats.total_connections, 0);
        assert_eq!(stats.active_connections, 0);
        assert_eq!(stats.signals_relayed, 0);
        assert_eq!(stats.chat_messages, 0);
        assert_eq!(stats.emergency_notifications, 0);
    }

    #[test]
    fn test_connection_lifecycle_counters() {
        let stats = RelayStats::new();

        stats.connection_opened();
        stats.connection_opened();
        stats.connection_closed();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_connections, 2);
        assert_eq!(snapshot.active_connections, 1);
    }

    #[test]
    fn test_message_counters_accumulate() {
        let stats = RelayStats::new();

        stats.add_signals_relayed(3);
        stats.add_signals_relayed(1);
        stats.add_chat_messages(2);
        stats.add_emergency_notifications(5);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.signals_relayed, 4);
        assert_eq!(snapshot.chat_messages, 2);
        assert_eq!(snapshot.emergency_notifications, 5);
    }
}
