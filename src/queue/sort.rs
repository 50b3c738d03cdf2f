//! Stable merge sort over the chain
//!
//! The chain is split at its midpoint with a slow/fast walk, each half is sorted
//! recursively, and the halves are merged by splicing nodes onto a result chain.
//! Only links change: nodes stay at their heap addresses and payloads never move.
//!
//! ```text
//! split:  a ─ b ─ c ─ d ─ e      slow stops on c
//!         a ─ b ─ c   d ─ e      link c→d severed
//! merge:  front of left wins unless it compares greater than front of right
//! ```
//!
//! Recursion depth is O(log n); comparisons are O(n log n).

use std::cmp::Ordering;

use tracing::debug;

use super::Queue;
use crate::memory::heap::Heap;
use crate::memory::node::{Address, Link};

/// Case-insensitive (ASCII) lexicographic comparison of two payloads
///
/// Bytes are compared after ASCII lowercasing; a payload that is a prefix of the
/// other orders first.
pub fn compare_ignore_ascii_case(a: &[u8], b: &[u8]) -> Ordering {
    a.iter()
        .map(u8::to_ascii_lowercase)
        .cmp(b.iter().map(u8::to_ascii_lowercase))
}

impl Queue {
    /// Sort ascending by case-insensitive lexicographic order
    ///
    /// The sort is stable. No effect on queues with fewer than two elements.
    pub fn sort(&mut self) {
        self.sort_by(compare_ignore_ascii_case);
    }

    /// Sort with a caller-supplied comparator, keeping equal elements in order
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        if self.size < 2 {
            return;
        }

        self.head = merge_sort(&mut self.heap, self.head, &mut compare);
        self.tail = last_node(&self.heap, self.head);

        debug!("sorted {} elements", self.size);
    }
}

fn merge_sort<F>(heap: &mut Heap, head: Link, compare: &mut F) -> Link
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let first = head?;
    if heap[first].is_last() {
        return head;
    }

    let right = split(heap, first);
    let left = merge_sort(heap, head, compare);
    let right = merge_sort(heap, right, compare);
    merge(heap, left, right, compare)
}

/// Sever the chain after its midpoint and return the second half
fn split(heap: &mut Heap, first: Address) -> Link {
    let mut slow = first;
    let mut fast = heap[first].next;

    while let Some(f) = fast {
        let Some(after) = heap[f].next else {
            break;
        };
        slow = match heap[slow].next {
            Some(next) => next,
            None => break,
        };
        fast = heap[after].next;
    }

    heap[slow].next.take()
}

fn merge<F>(heap: &mut Heap, mut left: Link, mut right: Link, compare: &mut F) -> Link
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let mut head: Link = None;
    let mut tail: Link = None;

    loop {
        let (l, r) = match (left, right) {
            (Some(l), Some(r)) => (l, r),
            (rest, None) | (None, rest) => {
                match tail {
                    Some(t) => heap[t].next = rest,
                    None => head = rest,
                }
                return head;
            }
        };

        let winner = if compare(&*heap[l].payload, &*heap[r].payload) != Ordering::Greater {
            left = heap[l].next;
            l
        } else {
            right = heap[r].next;
            r
        };

        match tail {
            Some(t) => heap[t].next = Some(winner),
            None => head = Some(winner),
        }
        tail = Some(winner);
    }
}

fn last_node(heap: &Heap, head: Link) -> Link {
    let mut last = head?;
    while let Some(next) = heap[last].next {
        last = next;
    }
    Some(last)
}
