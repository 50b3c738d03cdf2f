//! The queue
//!
//! This module provides the singly-linked queue and its operations:
//! - [`Queue`]: head/tail links, an incrementally maintained size, and the node heap
//! - [`errors`]: Error types for failed operations
//! - [`iter`]: Head-to-tail traversal
//! - [`reverse`]: In-place link reversal
//! - [`sort`]: Stable merge sort over the chain
//!
//! # Structure
//!
//! ```text
//! head ──► [apple] ──► [banana] ──► [cherry] ──► ∅
//!                                      ▲
//! tail ────────────────────────────────┘
//! ```
//!
//! Nodes are owned by the queue's [`Heap`]; links are heap addresses. Insertion and
//! removal at the head, and insertion at the tail, are O(1). Reversal and sorting
//! only rewrite links: no node is allocated or freed and no payload moves.

pub mod errors;
pub mod iter;
pub mod reverse;
pub mod sort;

use std::fmt;

use tracing::{debug, error};

use crate::memory::constants::QUEUE_HEADER_SIZE;
use crate::memory::heap::{Heap, HeapStats};
use crate::memory::node::{Address, Link, Node};
use errors::QueueError;
use iter::Iter;

/// A singly-linked queue of byte-string payloads
pub struct Queue {
    heap: Heap,
    head: Link,
    tail: Link,
    size: usize,
}

impl Queue {
    /// Create an empty queue on an unbounded heap
    pub fn new() -> Self {
        match Self::with_heap_limit(usize::MAX) {
            Ok(queue) => queue,
            Err(e) => unreachable!("unbounded heap refused the queue header: {}", e),
        }
    }

    /// Create an empty queue whose heap may hold at most `limit` bytes
    ///
    /// The queue header itself is charged against the limit, so a limit below
    /// [`QUEUE_HEADER_SIZE`] fails with [`QueueError::AllocationFailure`].
    pub fn with_heap_limit(limit: usize) -> Result<Self, QueueError> {
        let mut heap = Heap::new(limit);
        heap.reserve(QUEUE_HEADER_SIZE)?;
        Ok(Queue {
            heap,
            head: None,
            tail: None,
            size: 0,
        })
    }

    /// Insert a copy of `payload` at the head
    pub fn insert_head(&mut self, payload: impl AsRef<[u8]>) -> Result<(), QueueError> {
        let addr = self.allocate(payload.as_ref())?;

        self.heap[addr].next = self.head;
        self.head = Some(addr);
        if self.tail.is_none() {
            self.tail = Some(addr);
        }
        self.size += 1;

        Ok(())
    }

    /// Insert a copy of `payload` at the tail
    pub fn insert_tail(&mut self, payload: impl AsRef<[u8]>) -> Result<(), QueueError> {
        let addr = self.allocate(payload.as_ref())?;

        match self.tail {
            Some(tail) => self.heap[tail].next = Some(addr),
            None => self.head = Some(addr),
        }
        self.tail = Some(addr);
        self.size += 1;

        Ok(())
    }

    fn allocate(&mut self, payload: &[u8]) -> Result<Address, QueueError> {
        if payload.is_empty() {
            debug!("rejected empty payload");
            return Err(QueueError::EmptyPayload);
        }

        self.heap.allocate_node(payload).map_err(|e| {
            debug!("insertion failed: {}", e);
            QueueError::AllocationFailure(e)
        })
    }

    /// Remove the head element and return its payload
    pub fn remove_head(&mut self) -> Result<Vec<u8>, QueueError> {
        let node = self.detach_head()?;
        Ok(node.payload.into_vec())
    }

    /// Remove the head element, copying its payload into `buf`
    ///
    /// At most `buf.len() - 1` bytes are copied and a `0` terminator is written
    /// after them; the rest of the payload is dropped. An empty buffer receives
    /// nothing. Returns the number of payload bytes copied.
    pub fn remove_head_into(&mut self, buf: &mut [u8]) -> Result<usize, QueueError> {
        let node = self.detach_head()?;
        Ok(copy_truncated(&node.payload, buf))
    }

    /// Remove the head element, keeping at most `capacity - 1` payload bytes
    pub fn remove_head_truncated(&mut self, capacity: usize) -> Result<Vec<u8>, QueueError> {
        let mut payload = self.remove_head()?;
        payload.truncate(capacity.saturating_sub(1));
        Ok(payload)
    }

    fn detach_head(&mut self) -> Result<Node, QueueError> {
        let head = self.head.ok_or(QueueError::EmptyQueue)?;
        let node = self
            .heap
            .free_node(head)
            .map_err(|e| QueueError::Corrupted(e.to_string()))?;

        self.head = node.next;
        if self.tail == Some(head) {
            self.tail = None;
        }
        self.size -= 1;

        Ok(node)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Payload of the head element
    pub fn peek_head(&self) -> Option<&[u8]> {
        self.head.map(|addr| &*self.heap[addr].payload)
    }

    /// Payload of the tail element
    pub fn peek_tail(&self) -> Option<&[u8]> {
        self.tail.map(|addr| &*self.heap[addr].payload)
    }

    /// Iterate payloads from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.heap, self.head, self.size)
    }

    /// Release every node, leaving an empty queue
    pub fn clear(&mut self) {
        let released = self.release_chain();
        if released > 0 {
            debug!("released {} nodes", released);
        }
    }

    fn release_chain(&mut self) -> usize {
        let mut released = 0;
        let mut cur = self.head.take();

        while let Some(addr) = cur {
            match self.heap.free_node(addr) {
                Ok(node) => {
                    cur = node.next;
                    released += 1;
                }
                Err(e) => {
                    error!("stopped releasing chain: {}", e);
                    break;
                }
            }
        }

        self.tail = None;
        self.size = 0;
        released
    }

    pub fn heap_stats(&self) -> HeapStats {
        self.heap.stats()
    }

    /// Verify the structural invariants of the chain
    ///
    /// - `size == 0` iff `head` is `None` iff `tail` is `None`
    /// - walking `size - 1` links from `head` reaches `tail`, whose link is `None`
    /// - the heap holds no node that is not on the chain
    pub fn check_invariants(&self) -> Result<(), QueueError> {
        match (self.head, self.tail, self.size) {
            (None, None, 0) => return self.check_no_leaks(),
            (Some(_), Some(_), n) if n > 0 => {}
            (head, tail, size) => {
                return corrupted(format!(
                    "head {:?}, tail {:?} and size {} disagree",
                    head, tail, size
                ))
            }
        }

        let mut steps = 0;
        let mut last = None;
        let mut cur = self.head;
        while let Some(addr) = cur {
            if steps == self.size {
                return corrupted(format!(
                    "chain is longer than size {} (cycle?)",
                    self.size
                ));
            }
            let node = self
                .heap
                .get(addr)
                .map_err(|e| QueueError::Corrupted(e.to_string()))?;
            steps += 1;
            last = Some(addr);
            cur = node.next;
        }

        if steps != self.size {
            return corrupted(format!("chain has {} nodes, size is {}", steps, self.size));
        }
        if last != self.tail {
            return corrupted(format!(
                "tail {:?} is not the last node {:?}",
                self.tail, last
            ));
        }

        self.check_no_leaks()
    }

    fn check_no_leaks(&self) -> Result<(), QueueError> {
        if self.heap.live_blocks() != self.size {
            return corrupted(format!(
                "heap holds {} live nodes for size {}",
                self.heap.live_blocks(),
                self.size
            ));
        }
        Ok(())
    }
}

fn corrupted<T>(reason: String) -> Result<T, QueueError> {
    Err(QueueError::Corrupted(reason))
}

fn copy_truncated(payload: &[u8], buf: &mut [u8]) -> usize {
    let Some(room) = buf.len().checked_sub(1) else {
        return 0;
    };
    let n = payload.len().min(room);
    buf[..n].copy_from_slice(&payload[..n]);
    buf[n] = 0;
    n
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.release_chain();
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
