// Head-to-tail traversal

use std::iter::FusedIterator;

use crate::memory::heap::Heap;
use crate::memory::node::Link;

/// Iterator over payloads from head to tail
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    heap: &'a Heap,
    cur: Link,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(heap: &'a Heap, head: Link, size: usize) -> Self {
        Iter {
            heap,
            cur: head,
            remaining: size,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let addr = self.cur?;
        let heap: &'a Heap = self.heap;
        let node = &heap[addr];
        self.cur = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&*node.payload)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
