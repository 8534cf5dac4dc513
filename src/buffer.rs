/*!
Chunk buffer allocation for the SFP protocol.

The buffer pool is the only resource shared between concurrent transfers.
Acquire/release must be callable from independent threads, and exhaustion
is reported rather than blocking.
*/

use std::sync::Mutex;

use crate::{
    chunk::Chunk,
    constants::{DEFAULT_CHUNK_CAPACITY, DEFAULT_POOL_BUFFERS},
};

/// Allocator for chunk buffers
///
/// Implementations must tolerate concurrent acquire/release from
/// independent transfers and signal exhaustion with `None` instead of
/// blocking.
pub trait BufferPool {
    /// Capacity in bytes of the buffers this pool hands out
    fn chunk_capacity(&self) -> usize;

    /// Take a buffer from the pool, or `None` if the pool is exhausted
    fn acquire(&self) -> Option<Chunk>;

    /// Return a buffer to the pool
    fn release(&self, chunk: Chunk);
}

/// A pool holding a fixed number of fixed-capacity chunk buffers
pub struct FixedBufferPool {
    /// Buffers currently available for acquisition
    free: Mutex<Vec<Chunk>>,
    /// Capacity of every buffer in the pool
    chunk_capacity: usize,
}

impl FixedBufferPool {
    /// Create a pool of `buffers` chunk buffers, each of `chunk_capacity` bytes
    pub fn new(buffers: usize, chunk_capacity: usize) -> Self {
        let free = (0..buffers)
            .map(|_| Chunk::with_capacity(chunk_capacity))
            .collect();
        Self {
            free: Mutex::new(free),
            chunk_capacity,
        }
    }

    /// Number of buffers currently available
    pub fn available(&self) -> usize {
        self.free.lock().unwrap().len()
    }
}

impl Default for FixedBufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_BUFFERS, DEFAULT_CHUNK_CAPACITY)
    }
}

impl BufferPool for FixedBufferPool {
    fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    fn acquire(&self) -> Option<Chunk> {
        let chunk = self.free.lock().unwrap().pop();
        if chunk.is_none() {
            log::warn!("Chunk buffer pool exhausted");
        }
        chunk
    }

    fn release(&self, mut chunk: Chunk) {
        // Foreign buffers (e.g. from a peer's pool) are dropped instead of
        // polluting the free list with a mismatched capacity.
        if chunk.capacity() != self.chunk_capacity {
            return;
        }
        chunk.reset();
        self.free.lock().unwrap().push(chunk);
    }
}
