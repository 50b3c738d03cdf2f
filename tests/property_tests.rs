//! Property-based tests for the queue operations.
mod common;

use std::collections::VecDeque;

use common::queue_of;
use linkq::queue::sort::compare_ignore_ascii_case;
use linkq::Queue;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    InsertHead(String),
    InsertTail(String),
    RemoveHead,
    Reverse,
    Sort,
}

mod strategies {
    use super::*;

    /// Short mixed-case words, sometimes empty
    pub fn word() -> impl Strategy<Value = String> {
        "[a-cA-C]{0,4}"
    }

    pub fn words() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-dA-D]{1,5}", 0..64)
    }

    pub fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => word().prop_map(Op::InsertHead),
            3 => word().prop_map(Op::InsertTail),
            3 => Just(Op::RemoveHead),
            1 => Just(Op::Reverse),
            1 => Just(Op::Sort),
        ]
    }
}

fn snapshot(queue: &Queue) -> Vec<Vec<u8>> {
    queue.iter().map(<[u8]>::to_vec).collect()
}

fn build(words: &[String]) -> Queue {
    let items: Vec<&str> = words.iter().map(String::as_str).collect();
    queue_of(&items)
}

proptest! {
    #[test]
    fn matches_model(ops in prop::collection::vec(strategies::op(), 0..200)) {
        let mut queue = Queue::new();
        let mut model: VecDeque<Vec<u8>> = VecDeque::new();
        let mut inserted = 0usize;
        let mut removed = 0usize;

        for op in ops {
            match op {
                Op::InsertHead(s) => {
                    let ok = queue.insert_head(&s).is_ok();
                    prop_assert_eq!(ok, !s.is_empty());
                    if ok {
                        model.push_front(s.into_bytes());
                        inserted += 1;
                    }
                }
                Op::InsertTail(s) => {
                    let ok = queue.insert_tail(&s).is_ok();
                    prop_assert_eq!(ok, !s.is_empty());
                    if ok {
                        model.push_back(s.into_bytes());
                        inserted += 1;
                    }
                }
                Op::RemoveHead => {
                    let got = queue.remove_head().ok();
                    prop_assert_eq!(&got, &model.pop_front());
                    if got.is_some() {
                        removed += 1;
                    }
                }
                Op::Reverse => {
                    queue.reverse();
                    model.make_contiguous().reverse();
                }
                Op::Sort => {
                    queue.sort();
                    model
                        .make_contiguous()
                        .sort_by(|a, b| compare_ignore_ascii_case(a, b));
                }
            }

            prop_assert_eq!(queue.len(), inserted - removed);
            prop_assert!(queue.check_invariants().is_ok());
        }

        prop_assert_eq!(snapshot(&queue), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn reverse_is_involution(words in strategies::words()) {
        let mut queue = build(&words);
        let before = snapshot(&queue);

        queue.reverse();
        queue.reverse();

        prop_assert_eq!(snapshot(&queue), before);
        prop_assert!(queue.check_invariants().is_ok());
    }

    #[test]
    fn sort_is_stable_and_complete(words in strategies::words()) {
        let mut queue = build(&words);
        queue.sort();

        // std's sort_by is stable, so equal-ignoring-case runs keep insertion order
        let mut expected: Vec<Vec<u8>> = words.iter().map(|w| w.as_bytes().to_vec()).collect();
        expected.sort_by(|a, b| compare_ignore_ascii_case(a, b));

        let sorted = snapshot(&queue);
        prop_assert_eq!(&sorted, &expected);
        prop_assert!(sorted
            .windows(2)
            .all(|w| compare_ignore_ascii_case(&w[0], &w[1]).is_le()));
        prop_assert!(queue.check_invariants().is_ok());
    }

    #[test]
    fn sort_is_idempotent(words in strategies::words()) {
        let mut queue = build(&words);
        queue.sort();
        let once = snapshot(&queue);
        let stats = queue.heap_stats();

        queue.sort();

        prop_assert_eq!(snapshot(&queue), once);
        prop_assert_eq!(queue.heap_stats(), stats);
    }

    #[test]
    fn remove_returns_inserted(word in "[ -~]{1,32}", capacity in 0usize..40) {
        let mut queue = Queue::new();
        queue.insert_head(&word).unwrap();

        let mut buf = vec![0xffu8; capacity];
        let copied = queue.remove_head_into(&mut buf).unwrap();

        let expected = &word.as_bytes()[..word.len().min(capacity.saturating_sub(1))];
        prop_assert_eq!(&buf[..copied], expected);
        if capacity > 0 {
            prop_assert_eq!(buf[copied], 0);
        }
        prop_assert!(queue.is_empty());
    }
}
