//! List node representation
//!
//! A [`Node`] owns exactly one payload and a forward [`Link`] to the next node.
//! Links are heap [`Address`]es rather than pointers, so every hop goes through the
//! owning [`Heap`](super::heap::Heap) and a stale link is caught instead of dereferenced.

/// Node address type (64-bit)
pub type Address = u64;

/// Forward link: `None` marks the end of a chain
pub type Link = Option<Address>;

/// A node in a singly-linked chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub payload: Box<[u8]>,
    pub next: Link,
}

impl Node {
    pub fn new(payload: Box<[u8]>) -> Self {
        Node {
            payload,
            next: None,
        }
    }

    /// Bytes this node's payload is charged for, terminator included
    pub fn payload_size(&self) -> usize {
        self.payload.len() + super::constants::PAYLOAD_TERMINATOR_SIZE
    }

    /// Check if this node ends its chain
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
