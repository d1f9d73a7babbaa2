//! Registry of connected stream viewers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Tracks connected viewers under the same guard discipline as the telemetry
/// store: one mutex, short critical sections.
pub struct ViewerRegistry {
    next_id: AtomicU64,
    viewers: Mutex<HashMap<u64, SocketAddr>>,
}

impl ViewerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            viewers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a viewer, returning its id.
    pub fn register(&self, addr: SocketAddr) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.viewers.lock().insert(id, addr);
        id
    }

    /// Remove a viewer once its task ends.
    pub fn deregister(&self, id: u64) {
        self.viewers.lock().remove(&id);
    }

    /// Number of connected viewers.
    pub fn count(&self) -> usize {
        self.viewers.lock().len()
    }
}

impl Default for ViewerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:4000".parse().unwrap()
    }

    #[test]
    fn test_register_assigns_distinct_ids() {
        let registry = ViewerRegistry::new();
        let a = registry.register(addr());
        let b = registry.register(addr());
        assert_ne!(a, b);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_deregister_removes_only_that_viewer() {
        let registry = ViewerRegistry::new();
        let a = registry.register(addr());
        let b = registry.register(addr());
        registry.deregister(a);
        assert_eq!(registry.count(), 1);
        registry.deregister(b);
        assert_eq!(registry.count(), 0);

        // Deregistering twice is harmless.
        registry.deregister(a);
        assert_eq!(registry.count(), 0);
    }
}
