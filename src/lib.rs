//! # Introduction
//!
//! linkq is a queue of byte-string payloads backed by a singly-linked chain. It
//! supports insertion at either end, removal at the head, an O(1) size query,
//! in-place reversal, and a stable, case-insensitive merge sort.
//!
//! ## Layout
//!
//! ```text
//! handle (optional-argument API) → Queue → Heap → Node
//! ```
//!
//! 1. [`queue`] — the [`Queue`] and its operations: insertion, removal,
//!    [`reverse`](queue::reverse), [`sort`](queue::sort), traversal.
//! 2. [`memory`] — the node heap: nodes keyed by address, byte accounting against
//!    an optional limit, use-after-free detection.
//! 3. [`handle`] — the same operations over `Option` arguments, reporting failure
//!    as `false` instead of an error.
//!
//! ## Example
//!
//! ```
//! use linkq::Queue;
//!
//! let mut queue = Queue::new();
//! for fruit in ["banana", "apple", "Cherry"] {
//!     queue.insert_tail(fruit)?;
//! }
//! queue.sort();
//!
//! let sorted: Vec<&[u8]> = queue.iter().collect();
//! assert_eq!(sorted, [&b"apple"[..], &b"banana"[..], &b"Cherry"[..]]);
//!
//! queue.reverse();
//! assert_eq!(queue.remove_head()?, b"Cherry");
//! assert_eq!(queue.len(), 2);
//! # Ok::<(), linkq::QueueError>(())
//! ```

pub mod handle;
pub mod memory;
pub mod queue;

pub use memory::heap::{HeapError, HeapStats};
pub use queue::errors::QueueError;
pub use queue::Queue;
