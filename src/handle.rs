//! Boundary API over optional queue references
//!
//! These functions mirror the queue's external interface for callers that may hold
//! no queue, or no payload, at all. Absent arguments are `None`. Failures are
//! reported as `false` (or a silent no-op) and never change the queue.
//!
//! ```
//! use linkq::handle;
//!
//! let mut queue = handle::create().unwrap();
//! assert!(handle::insert_tail(Some(&mut queue), Some("banana")));
//! assert!(!handle::insert_tail(Some(&mut queue), Some("")));
//! assert!(!handle::insert_head(None, Some("apple")));
//! assert_eq!(handle::size(Some(&queue)), 1);
//!
//! let mut buf = [0u8; 4];
//! assert!(handle::remove_head(Some(&mut queue), Some(&mut buf[..])));
//! assert_eq!(&buf, b"ban\0");
//! handle::destroy(Some(queue));
//! ```

use crate::queue::errors::QueueError;
use crate::queue::Queue;

/// Create an empty queue
pub fn create() -> Result<Queue, QueueError> {
    Ok(Queue::new())
}

/// Create an empty queue whose heap may hold at most `limit` bytes
pub fn create_with_limit(limit: usize) -> Result<Queue, QueueError> {
    Queue::with_heap_limit(limit)
}

/// Release every node of the queue, then the queue itself
pub fn destroy(queue: Option<Queue>) {
    drop(queue);
}

/// Insert a copy of `payload` at the head; `false` leaves the queue untouched
pub fn insert_head<S: AsRef<[u8]>>(queue: Option<&mut Queue>, payload: Option<S>) -> bool {
    match (queue, payload) {
        (Some(queue), Some(payload)) => queue.insert_head(payload).is_ok(),
        _ => false,
    }
}

/// Insert a copy of `payload` at the tail; `false` leaves the queue untouched
pub fn insert_tail<S: AsRef<[u8]>>(queue: Option<&mut Queue>, payload: Option<S>) -> bool {
    match (queue, payload) {
        (Some(queue), Some(payload)) => queue.insert_tail(payload).is_ok(),
        _ => false,
    }
}

/// Remove the head element
///
/// When `buf` is supplied, at most `buf.len() - 1` payload bytes are copied into it,
/// followed by a `0` terminator.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> bool {
    let Some(queue) = queue else {
        return false;
    };
    match buf {
        Some(buf) => queue.remove_head_into(buf).is_ok(),
        None => queue.remove_head().is_ok(),
    }
}

/// Number of elements, 0 for an absent queue
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::len)
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
