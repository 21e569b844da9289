use dashmap::DashMap;
use livescore_core::types::ConnId;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Write side of one viewer stream. Each message is one JSON frame.
/// Unbounded: a viewer that reads slowly still gets every frame, in order.
pub type Sink = mpsc::UnboundedSender<String>;

/// Handle returned by [`ConnectionRegistry::register`]; the id is what a
/// close notification is correlated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnId,
}

/// Every currently open viewer stream, keyed by connection id.
pub struct ConnectionRegistry {
    clients: DashMap<ConnId, Sink>,
    /// Set by [`close_all`](Self::close_all); no sink is kept after that.
    closed: AtomicBool,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Store `sink` under a fresh id. After [`close_all`](Self::close_all)
    /// the sink is dropped instead, so its stream ends once drained.
    pub fn register(&self, sink: Sink) -> Connection {
        let id = ConnId::new();
        if self.closed.load(Ordering::Acquire) {
            debug!(conn_id = %id, "registry closed, viewer released");
            return Connection { id };
        }
        self.clients.insert(id.clone(), sink);
        // close_all may have run between the check and the insert
        if self.closed.load(Ordering::Acquire) {
            self.clients.remove(&id);
            return Connection { id };
        }
        info!(conn_id = %id, clients = self.clients.len(), "viewer registered");
        Connection { id }
    }

    /// Remove a connection. Returns false if it was already gone, so a
    /// repeated close notification is harmless.
    pub fn unregister(&self, id: &ConnId) -> bool {
        let removed = self.clients.remove(id).is_some();
        if removed {
            info!(conn_id = %id, clients = self.clients.len(), "viewer unregistered");
        }
        removed
    }

    /// Serialize `payload` once and push it to every registered sink.
    ///
    /// A sink whose viewer is already gone loses this frame only; the
    /// remaining sinks are still served and nothing is reported back to the
    /// caller. Returns the number of sinks that accepted the frame.
    pub fn broadcast<T: Serialize + ?Sized>(&self, payload: &T) -> usize {
        let json = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "broadcast payload not serializable, frame skipped");
                return 0;
            }
        };

        let mut delivered = 0;
        for entry in self.clients.iter() {
            if entry.value().send(json.clone()).is_ok() {
                delivered += 1;
            } else {
                // removal happens when the stream reports its close
                debug!(conn_id = %entry.key(), "viewer gone, frame dropped");
            }
        }
        debug!(clients = self.clients.len(), delivered, "broadcast");
        delivered
    }

    /// Drop every sink and refuse later ones. Each viewer stream ends once
    /// it has drained what was already queued. Returns how many connections
    /// were released.
    pub fn close_all(&self) -> usize {
        self.closed.store(true, Ordering::Release);
        let count = self.clients.len();
        self.clients.clear();
        info!(count, "all viewers released");
        count
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Unregisters its connection when dropped. Owned by the viewer's response
/// stream, so the entry disappears as soon as the transport lets go of it.
pub struct ConnectionGuard {
    registry: Arc<ConnectionRegistry>,
    id: ConnId,
}

impl ConnectionGuard {
    pub fn new(registry: Arc<ConnectionRegistry>, connection: Connection) -> Self {
        Self {
            registry,
            id: connection.id,
        }
    }

    pub fn id(&self) -> &ConnId {
        &self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        info!(conn_id = %self.id, "connection closed");
        self.registry.unregister(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_and_unregister_changes_len() {
        let registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn = registry.register(tx);
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(&conn.id));
        assert_eq!(registry.len(), 0);
        // second close notification is a no-op
        assert!(!registry.unregister(&conn.id));
        assert!(registry.is_empty());
    }

    #[test]
    fn broadcast_reaches_every_sink_with_identical_frames() {
        let registry = ConnectionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register(tx_a);
        registry.register(tx_b);

        let delivered = registry.broadcast(&json!({ "appState": "IN_PROGRESS" }));
        assert_eq!(delivered, 2);

        let a = rx_a.try_recv().unwrap();
        let b = rx_b.try_recv().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, r#"{"appState":"IN_PROGRESS"}"#);
    }

    #[test]
    fn dead_sink_does_not_block_the_rest() {
        let registry = ConnectionRegistry::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.register(tx_dead);
        registry.register(tx_live);
        drop(rx_dead);

        assert_eq!(registry.broadcast(&json!([1, 2, 3])), 1);
        assert_eq!(rx_live.try_recv().unwrap(), "[1,2,3]");
        // still registered until the close notification arrives
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lagging_viewer_still_gets_finished_frame() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(tx);

        // viewer reads nothing while the run produces frames
        for tick in 0..500 {
            let frame = json!({ "appState": "IN_PROGRESS", "tick": tick });
            assert_eq!(registry.broadcast(&frame), 1);
        }
        assert_eq!(registry.broadcast(&json!({ "appState": "FINISHED" })), 1);

        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(frame);
        }
        assert_eq!(frames.len(), 501);
        assert_eq!(frames[0], r#"{"appState":"IN_PROGRESS","tick":0}"#);
        assert_eq!(frames[500], r#"{"appState":"FINISHED"}"#);
    }

    #[test]
    fn close_all_ends_streams_after_queued_frames() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(tx);
        registry.broadcast(&"bye");

        assert_eq!(registry.close_all(), 1);
        assert!(registry.is_empty());
        assert_eq!(rx.try_recv().unwrap(), r#""bye""#);
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn register_after_close_all_releases_sink() {
        let registry = ConnectionRegistry::new();
        registry.close_all();

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        tx.send("snapshot".to_string()).unwrap();
        registry.register(tx);

        assert!(registry.is_empty());
        assert_eq!(registry.broadcast(&"late"), 0);
        // queued snapshot is still readable, then the stream ends
        assert_eq!(rx.try_recv().unwrap(), "snapshot");
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn guard_unregisters_on_drop() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn = registry.register(tx);
        let id = conn.id.clone();
        let guard = ConnectionGuard::new(Arc::clone(&registry), conn);
        assert_eq!(guard.id(), &id);
        assert_eq!(registry.len(), 1);

        drop(guard);
        assert_eq!(registry.len(), 0);
        assert!(!registry.unregister(&id));
    }
}
