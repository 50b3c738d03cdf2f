//! Node heap for the queue
//!
//! This module provides node storage with:
//! - Explicit allocation/deallocation of nodes keyed by [`Address`]
//! - Byte accounting against a configurable limit (node header + payload copy)
//! - Use-after-free, double-free, and invalid-pointer detection
//!
//! # Addresses
//!
//! Addresses are handed out monotonically from [`HEAP_ADDRESS_START`] in steps of
//! [`NODE_HEADER_SIZE`] and never reused. A missing address below the next free
//! address was therefore freed, while anything else was never allocated. No
//! tombstones are kept.
//!
//! # Error Handling
//!
//! Checked accessors return [`HeapError`]. Indexing (`heap[addr]`) is for links the
//! queue has already validated and panics on a dangling address, which can only be
//! reached through a defect in the chain bookkeeping.

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use super::constants::{HEAP_ADDRESS_START, NODE_HEADER_SIZE, PAYLOAD_TERMINATOR_SIZE};
use super::node::{Address, Node};

/// Errors raised by the node heap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The configured heap limit would be exceeded
    #[error("Out of memory: requested {requested} bytes, {in_use} already allocated, limit is {limit}")]
    OutOfMemory {
        requested: usize,
        in_use: usize,
        limit: usize,
    },

    /// The system allocator refused a fallible reservation
    #[error("Allocator refused a request for {requested} bytes")]
    AllocatorRefused { requested: usize },

    /// Freeing an address that was already freed
    #[error("Double free detected at address 0x{address:x}")]
    DoubleFree { address: Address },

    /// Accessing an address that was freed
    #[error("Use-after-free: address 0x{address:x} has been freed")]
    UseAfterFree { address: Address },

    /// Accessing an address that was never allocated
    #[error("Invalid pointer: address 0x{address:x} not allocated")]
    InvalidPointer { address: Address },
}

/// Allocation counters and byte usage of a heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    pub allocations: usize,
    pub frees: usize,
    pub live_blocks: usize,
    pub bytes_in_use: usize,
    pub limit: usize,
}

/// The heap
#[derive(Debug, Clone)]
pub struct Heap {
    nodes: FxHashMap<Address, Node>,
    next_address: Address,
    total_allocated_bytes: usize,
    max_heap_size: usize,
    allocations: usize,
    frees: usize,
}

impl Heap {
    /// Create a new heap with a maximum size limit
    pub fn new(max_heap_size: usize) -> Self {
        Heap {
            nodes: FxHashMap::default(),
            next_address: HEAP_ADDRESS_START,
            total_allocated_bytes: 0,
            max_heap_size,
            allocations: 0,
            frees: 0,
        }
    }

    /// Charge `size` bytes against the limit without creating a block
    pub fn reserve(&mut self, size: usize) -> Result<(), HeapError> {
        let Some(total) = self
            .total_allocated_bytes
            .checked_add(size)
            .filter(|&total| total <= self.max_heap_size)
        else {
            debug!(
                "heap refused {} bytes ({} in use, limit {})",
                size, self.total_allocated_bytes, self.max_heap_size
            );
            return Err(HeapError::OutOfMemory {
                requested: size,
                in_use: self.total_allocated_bytes,
                limit: self.max_heap_size,
            });
        };
        self.total_allocated_bytes = total;
        Ok(())
    }

    /// Return `size` previously reserved bytes
    pub fn release(&mut self, size: usize) {
        self.total_allocated_bytes = self.total_allocated_bytes.saturating_sub(size);
    }

    /// Allocate a node holding a private copy of `payload`
    ///
    /// The header is charged first, then the payload copy. If the copy cannot be
    /// obtained the header charge is returned, so a failed call leaves the heap
    /// exactly as it was.
    pub fn allocate_node(&mut self, payload: &[u8]) -> Result<Address, HeapError> {
        self.reserve(NODE_HEADER_SIZE)?;

        let copy = match self.copy_payload(payload) {
            Ok(copy) => copy,
            Err(e) => {
                self.release(NODE_HEADER_SIZE);
                return Err(e);
            }
        };

        if self.nodes.try_reserve(1).is_err() {
            self.release(NODE_HEADER_SIZE + copy.len() + PAYLOAD_TERMINATOR_SIZE);
            return Err(HeapError::AllocatorRefused {
                requested: NODE_HEADER_SIZE,
            });
        }

        let addr = self.next_address;
        self.next_address += NODE_HEADER_SIZE as u64;
        self.nodes.insert(addr, Node::new(copy));
        self.allocations += 1;

        trace!("allocated node 0x{:x} ({} payload bytes)", addr, payload.len());
        Ok(addr)
    }

    fn copy_payload(&mut self, payload: &[u8]) -> Result<Box<[u8]>, HeapError> {
        let size = payload.len() + PAYLOAD_TERMINATOR_SIZE;
        self.reserve(size)?;

        let mut copy = Vec::new();
        if copy.try_reserve_exact(payload.len()).is_err() {
            self.release(size);
            return Err(HeapError::AllocatorRefused { requested: size });
        }
        copy.extend_from_slice(payload);
        Ok(copy.into_boxed_slice())
    }

    /// Free a node, handing its payload back to the caller
    pub fn free_node(&mut self, addr: Address) -> Result<Node, HeapError> {
        match self.nodes.remove(&addr) {
            Some(node) => {
                self.release(NODE_HEADER_SIZE + node.payload_size());
                self.frees += 1;
                trace!("freed node 0x{:x}", addr);
                Ok(node)
            }
            None if self.was_issued(addr) => Err(HeapError::DoubleFree { address: addr }),
            None => Err(HeapError::InvalidPointer { address: addr }),
        }
    }

    /// Get a node (returns error if freed or never allocated)
    pub fn get(&self, addr: Address) -> Result<&Node, HeapError> {
        match self.nodes.get(&addr) {
            Some(node) => Ok(node),
            None => Err(self.missing(addr)),
        }
    }

    /// Get a mutable node
    pub fn get_mut(&mut self, addr: Address) -> Result<&mut Node, HeapError> {
        let missing = self.missing(addr);
        self.nodes.get_mut(&addr).ok_or(missing)
    }

    /// Check if an address currently holds a live node
    pub fn contains(&self, addr: Address) -> bool {
        self.nodes.contains_key(&addr)
    }

    /// Number of live node blocks
    pub fn live_blocks(&self) -> usize {
        self.nodes.len()
    }

    /// Get total allocated bytes
    pub fn total_allocated(&self) -> usize {
        self.total_allocated_bytes
    }

    /// Get max heap size
    pub fn max_size(&self) -> usize {
        self.max_heap_size
    }

    pub fn stats(&self) -> HeapStats {
        HeapStats {
            allocations: self.allocations,
            frees: self.frees,
            live_blocks: self.nodes.len(),
            bytes_in_use: self.total_allocated_bytes,
            limit: self.max_heap_size,
        }
    }

    fn was_issued(&self, addr: Address) -> bool {
        addr >= HEAP_ADDRESS_START
            && addr < self.next_address
            && (addr - HEAP_ADDRESS_START) % NODE_HEADER_SIZE as u64 == 0
    }

    fn missing(&self, addr: Address) -> HeapError {
        if self.was_issued(addr) {
            HeapError::UseAfterFree { address: addr }
        } else {
            HeapError::InvalidPointer { address: addr }
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        // Unbounded: grows with available memory
        Self::new(usize::MAX)
    }
}

impl Index<Address> for Heap {
    type Output = Node;

    fn index(&self, addr: Address) -> &Node {
        match self.get(addr) {
            Ok(node) => node,
            Err(e) => panic!("dangling link: {}", e),
        }
    }
}

impl IndexMut<Address> for Heap {
    fn index_mut(&mut self, addr: Address) -> &mut Node {
        match self.get_mut(addr) {
            Ok(node) => node,
            Err(e) => panic!("dangling link: {}", e),
        }
    }
}
