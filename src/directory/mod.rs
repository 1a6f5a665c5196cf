//! Doctor presence directory
//!
//! Maps a doctor identifier to its current live connection for emergency
//! fan-out. Registration is last-write-wins: a re-registration (new tab,
//! reconnect) silently replaces the previous connection. Disconnect cleanup
//! compares the stored connection before deleting, so an older connection's
//! disconnect never evicts a newer registration racing it.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::ConnId;

/// Registry of currently connected doctors
pub struct DoctorDirectory {
    /// Map of doctor id to live connection
    entries: RwLock<HashMap<String, ConnId>>,
}

impl DoctorDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a doctor's live connection, overwriting any existing entry
    pub async fn register(&self, doctor_id: &str, conn: ConnId) {
        let mut entries = self.entries.write().await;

        match entries.insert(doctor_id.to_string(), conn) {
            Some(previous) => {
                tracing::info!(
                    doctor = %doctor_id,
                    conn_id = conn,
                    replaced = previous,
                    "Doctor re-registered"
                );
            }
            None => {
                tracing::info!(doctor = %doctor_id, conn_id = conn, "Doctor registered");
            }
        }
    }

    /// Remove every entry held by the disconnecting connection
    ///
    /// Entries whose stored connection differs are left alone: a newer
    /// registration wins over a stale disconnect. Linear scan; doctor
    /// cardinality is small. Returns the number of entries removed.
    pub async fn remove_connection(&self, conn: ConnId) -> usize {
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|doctor_id, &mut stored| {
            if stored == conn {
                tracing::info!(doctor = %doctor_id, conn_id = conn, "Doctor disconnected");
                false
            } else {
                true
            }
        });

        before - entries.len()
    }

    /// Snapshot of the current entries for fan-out
    ///
    /// Delivery against the snapshot is best-effort, at-most-once: doctors
    /// registering after the snapshot is taken are not notified.
    pub async fn snapshot(&self) -> Vec<(String, ConnId)> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .map(|(doctor_id, &conn)| (doctor_id.clone(), conn))
            .collect()
    }

    /// Look up a doctor's current connection
    pub async fn get(&self, doctor_id: &str) -> Option<ConnId> {
        self.entries.read().await.get(doctor_id).copied()
    }

    /// Number of registered doctors
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no doctors are registered
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_lookup() {
        let directory = DoctorDirectory::new();

        directory.register("d1", 10).await;
        assert_eq!(directory.get("d1").await, Some(10));
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_reregistration_is_last_write_wins() {
        let directory = DoctorDirectory::new();

        directory.register("d1", 10).await;
        directory.register("d1", 20).await;

        assert_eq!(directory.get("d1").await, Some(20));
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_removes_entry() {
        let directory = DoctorDirectory::new();

        directory.register("d1", 10).await;
        let removed = directory.remove_connection(10).await;

        assert_eq!(removed, 1);
        assert!(directory.is_empty().await);
    }

    #[tokio::test]
    async fn test_stale_disconnect_never_evicts_newer_registration() {
        let directory = DoctorDirectory::new();

        // Doctor reconnects before the old connection's disconnect lands
        directory.register("d1", 10).await;
        directory.register("d1", 20).await;

        let removed = directory.remove_connection(10).await;
        assert_eq!(removed, 0);
        assert_eq!(directory.get("d1").await, Some(20));
    }

    #[tokio::test]
    async fn test_snapshot_covers_all_entries() {
        let directory = DoctorDirectory::new();

        directory.register("d1", 10).await;
        directory.register("d2", 11).await;

        let mut snapshot = directory.snapshot().await;
        snapshot.sort();
        assert_eq!(
            snapshot,
            vec![("d1".to_string(), 10), ("d2".to_string(), 11)]
        );
    }
}
