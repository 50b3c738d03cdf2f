//! Error types for queue operations
//!
//! [`QueueError`] splits into two families:
//! - allocation failures, carrying the [`HeapError`] that refused the request
//! - invalid arguments (empty payload, removal from an empty queue)
//!
//! Every failed operation leaves the queue untouched. [`QueueError::Corrupted`] is
//! only produced by [`Queue::check_invariants`](super::Queue::check_invariants).

use thiserror::Error;

use crate::memory::heap::HeapError;

/// Errors that can occur during queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Storage for the queue header, a node, or a payload copy was refused
    #[error("Allocation failed: {0}")]
    AllocationFailure(#[source] HeapError),

    /// Zero-length payloads are rejected on insertion
    #[error("Payload must not be empty")]
    EmptyPayload,

    /// Removal from a queue with no elements
    #[error("Queue is empty")]
    EmptyQueue,

    /// A structural invariant does not hold
    #[error("Queue structure corrupted: {0}")]
    Corrupted(String),
}

impl QueueError {
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, QueueError::AllocationFailure(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, QueueError::EmptyPayload | QueueError::EmptyQueue)
    }
}

impl From<HeapError> for QueueError {
    fn from(err: HeapError) -> Self {
        QueueError::AllocationFailure(err)
    }
}
