// Shared helpers for the integration tests
#![allow(dead_code)]

use linkq::Queue;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test writer, filtered by RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a queue by inserting each item at the tail
pub fn queue_of(items: &[&str]) -> Queue {
    let mut queue = Queue::new();
    for item in items {
        queue.insert_tail(item).expect("Insertion failed");
    }
    queue
}

/// Payloads from head to tail
pub fn contents(queue: &Queue) -> Vec<String> {
    queue
        .iter()
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .collect()
}

/// Addresses of the payload buffers, head to tail
pub fn payload_addresses(queue: &Queue) -> Vec<usize> {
    queue.iter().map(|p| p.as_ptr() as usize).collect()
}
