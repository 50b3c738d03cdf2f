// Memory layout constants for the queue heap

/// Starting address for node allocations
/// Node addresses start at 0x10000000 so a zeroed link is never a valid address
pub const HEAP_ADDRESS_START: u64 = 0x1000_0000;

/// Bytes charged for a node header (payload pointer + next link)
pub const NODE_HEADER_SIZE: usize = 16;

/// Bytes charged for the queue header (head link, tail link, size)
pub const QUEUE_HEADER_SIZE: usize = 24;

/// Bytes charged on top of a payload's length for its terminator
pub const PAYLOAD_TERMINATOR_SIZE: usize = 1;
