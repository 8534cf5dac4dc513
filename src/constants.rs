/*!
Constants for the SFP protocol.
*/

/// Size of the SFP header trailer in bytes
pub const HEADER_SIZE: usize = 8;

/// Default capacity of a chunk buffer in bytes
pub const DEFAULT_CHUNK_CAPACITY: usize = 256;

/// Default number of chunk buffers in a pool
pub const DEFAULT_POOL_BUFFERS: usize = 15;

/// Largest payload a chunk buffer of the given capacity can carry
/// alongside the header trailer.
pub fn max_chunk_payload(chunk_capacity: usize) -> usize {
    chunk_capacity.saturating_sub(HEADER_SIZE)
}
