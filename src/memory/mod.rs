//! Memory model for the queue
//!
//! This module provides the storage the queue's chain lives in:
//! - [`node`]: The list node (payload + forward link) and the [`node::Address`] type
//! - [`heap`]: Node allocation/deallocation with byte accounting and
//!   use-after-free detection
//! - [`constants`]: Address range and per-block byte sizes
//!
//! # Sizes
//!
//! Every block is charged a fixed, platform-independent size:
//! - queue header: 24 bytes (head link, tail link, size)
//! - node header: 16 bytes (payload pointer, next link)
//! - payload copy: `len + 1` bytes (terminator included)
//!
//! A heap limit therefore behaves the same on every target.

pub mod constants;
pub mod heap;
pub mod node;
