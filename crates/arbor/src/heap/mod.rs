//! Linked binary min-heap.

pub mod queue;
pub mod types;

pub use queue::PriorityQueue;
pub use types::HeapNode;
