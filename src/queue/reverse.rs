// In-place reversal of the chain

use tracing::debug;

use super::Queue;
use crate::memory::node::Link;

impl Queue {
    /// Reverse the order of the elements in place
    ///
    /// Walks the chain once with previous/current/next links, pointing every node
    /// back at its predecessor, then swaps head and tail. Nothing is allocated or
    /// freed and payloads are not touched. No effect on an empty queue.
    pub fn reverse(&mut self) {
        let Some(first) = self.head else {
            return;
        };

        let mut prev: Link = None;
        let mut cur: Link = Some(first);
        while let Some(addr) = cur {
            let next = std::mem::replace(&mut self.heap[addr].next, prev);
            prev = Some(addr);
            cur = next;
        }

        self.tail = Some(first);
        self.head = prev;

        debug!("reversed {} elements", self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(queue: &Queue) -> Vec<Vec<u8>> {
        queue.iter().map(<[u8]>::to_vec).collect()
    }

    #[test]
    fn test_reverse_empty_is_noop() {
        let mut queue = Queue::new();
        queue.reverse();

        assert!(queue.is_empty());
        queue.check_invariants().unwrap();
    }

    #[test]
    fn test_reverse_single() {
        let mut queue = Queue::new();
        queue.insert_tail("solo").unwrap();
        let before = queue.head;
        queue.reverse();

        assert_eq!(queue.head, before);
        assert_eq!(queue.tail, before);
        queue.check_invariants().unwrap();
    }

    #[test]
    fn test_reverse_swaps_head_and_tail() {
        let mut queue = Queue::new();
        for s in ["1", "2", "3", "4"] {
            queue.insert_tail(s).unwrap();
        }
        let (head, tail) = (queue.head, queue.tail);
        queue.reverse();

        assert_eq!(queue.head, tail);
        assert_eq!(queue.tail, head);
        assert_eq!(
            contents(&queue),
            [b"4".to_vec(), b"3".to_vec(), b"2".to_vec(), b"1".to_vec()]
        );
        queue.check_invariants().unwrap();
    }
}
