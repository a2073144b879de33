//! Free-call tracking for free-first-call services.
//!
//! Each eligible service gets exactly one credential-less call per process.
//! The Coin Railz API stays the source of truth: a refused "free" call is
//! retried with credentials by the client.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domains::tools::registry;

/// Lock-free record of which free calls have been used.
#[derive(Debug)]
pub struct FreeCallTracker {
    slots: Vec<(&'static str, AtomicBool)>,
}

impl Default for FreeCallTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeCallTracker {
    /// Create a tracker for every free-first-call service in the catalog.
    pub fn new() -> Self {
        Self::for_services(registry::free_first_call_services())
    }

    /// Create a tracker for an explicit set of services.
    pub fn for_services(services: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            slots: services
                .into_iter()
                .map(|service| (service, AtomicBool::new(false)))
                .collect(),
        }
    }

    /// Returns `true` exactly once per eligible service, `false` afterwards
    /// and for every other service.
    pub fn consume_free_call_if_eligible(&self, service: &str) -> bool {
        self.slots
            .iter()
            .find(|(name, _)| *name == service)
            .is_some_and(|(_, used)| !used.swap(true, Ordering::AcqRel))
    }

    /// Whether the free call for `service` is still available.
    pub fn is_available(&self, service: &str) -> bool {
        self.slots
            .iter()
            .find(|(name, _)| *name == service)
            .is_some_and(|(_, used)| !used.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_free_call_consumed_once() {
        let tracker = FreeCallTracker::new();
        assert!(tracker.is_available("gas-price-oracle"));
        assert!(tracker.consume_free_call_if_eligible("gas-price-oracle"));
        assert!(!tracker.consume_free_call_if_eligible("gas-price-oracle"));
        assert!(!tracker.is_available("gas-price-oracle"));

        // Independent per service
        assert!(tracker.consume_free_call_if_eligible("token-metadata"));
    }

    #[test]
    fn test_paid_service_never_free() {
        let tracker = FreeCallTracker::new();
        assert!(!tracker.consume_free_call_if_eligible("token-price"));
        assert!(!tracker.is_available("token-price"));
    }

    #[test]
    fn test_concurrent_consumers_get_one_free_call() {
        let tracker = Arc::new(FreeCallTracker::for_services(["gas-price-oracle"]));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let tracker = tracker.clone();
                std::thread::spawn(move || tracker.consume_free_call_if_eligible("gas-price-oracle"))
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|free| *free)
            .count();
        assert_eq!(granted, 1);
    }
}
