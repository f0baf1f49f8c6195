//! Registry of connections whose handshake has completed.

use crate::connection::{Connection, ConnectionId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared set of connections eligible for use by request dispatch.
///
/// The lifecycle handler inserts a connection on handshake success. Removal
/// on close belongs to the owning pool; the handler never removes.
/// Insertion from many connections concurrently is safe without external
/// synchronization.
#[derive(Clone, Default)]
pub struct ActiveRegistry {
    inner: Arc<RwLock<HashMap<ConnectionId, Arc<Connection>>>>,
}

impl ActiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, connection: Arc<Connection>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(connection.id(), connection);
    }

    /// Remove a connection on teardown. Called by the owning pool, not by
    /// the lifecycle handler.
    pub fn remove(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    pub fn get(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdleConfig;
    use tokio::sync::mpsc;

    fn make_connection(address: &str) -> Arc<Connection> {
        let (tx, _rx) = mpsc::unbounded_channel();
        Arc::new(Connection::new(address, Arc::new(tx), IdleConfig::default()))
    }

    #[test]
    fn insert_then_contains_then_remove() {
        let registry = ActiveRegistry::new();
        let conn = make_connection("ws://db:8182/gremlin");
        let id = conn.id();

        assert!(!registry.contains(id));
        registry.insert(Arc::clone(&conn));
        assert!(registry.contains(id));
        assert_eq!(registry.len(), 1);

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(registry.is_empty());
    }

    #[test]
    fn reinserting_same_connection_is_idempotent() {
        let registry = ActiveRegistry::new();
        let conn = make_connection("ws://db:8182/gremlin");
        registry.insert(Arc::clone(&conn));
        registry.insert(conn);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_insertion_from_many_tasks() {
        let registry = ActiveRegistry::new();
        let mut tasks = Vec::new();
        for i in 0..32 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                registry.insert(make_connection(&format!("ws://db-{i}:8182/gremlin")));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(registry.len(), 32);
    }
}
