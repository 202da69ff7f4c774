//! Concurrency gate for detail extraction
//!
//! A counting admission control over a tokio semaphore. The gate is built by
//! the caller and shared by every extraction of a run, so tests can choose a
//! capacity of 1 for deterministic ordering.

use crate::ScrapeError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounded admission for in-flight detail extractions
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One admitted slot; returned to the gate when dropped
#[derive(Debug)]
pub struct GateSlot {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    /// Creates a gate admitting `capacity` holders at once (at least 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free and takes it
    pub async fn acquire(&self) -> Result<GateSlot, ScrapeError> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| ScrapeError::GateClosed)?;
        Ok(GateSlot { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl GateSlot {
    /// Returns the slot to the gate
    pub fn release(self) {
        drop(self);
    }
}
