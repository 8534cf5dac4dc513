/*!
Receiving side of the SFP protocol.

Reassembles a transfer from an in-order chunk stream, validating every
header against the running state and pushing payload bytes to the sink
until the declared total size has been delivered.
*/

use std::time::Duration;

use crate::{
    buffer::BufferPool,
    constants::max_chunk_payload,
    error::{Error, Result, protocol_err},
    io::{DataSink, VecSink},
    transport::Transport,
};
use crate::chunk::Chunk;

/// Receive one transfer, pushing its bytes into `sink`
///
/// Counterpart to [`send`](crate::send::send). Blocks up to `timeout`
/// for each chunk; the timeout applies per chunk, not to the transfer as
/// a whole. Returns the number of bytes delivered on success.
///
/// On a protocol violation the transfer is abandoned immediately; bytes
/// already pushed to the sink are not rolled back.
pub fn recv<T, P, K>(transport: &mut T, pool: &P, sink: &mut K, timeout: Duration) -> Result<u32>
where
    T: Transport,
    P: BufferPool + ?Sized,
    K: DataSink + ?Sized,
{
    recv_fp(transport, pool, sink, timeout, None)
}

/// Receive one transfer whose first chunk may already be in hand
///
/// Same contract as [`recv`], except that when `first_chunk` is supplied
/// the first loop iteration consumes it instead of reading from the
/// transport. Useful when the caller had to peek at a connection's first
/// message to recognize it as an SFP transfer.
pub fn recv_fp<T, P, K>(
    transport: &mut T,
    pool: &P,
    sink: &mut K,
    timeout: Duration,
    first_chunk: Option<Chunk>,
) -> Result<u32>
where
    T: Transport,
    P: BufferPool + ?Sized,
    K: DataSink + ?Sized,
{
    let mut chunk = match first_chunk {
        Some(chunk) => chunk,
        None => transport.receive(timeout)?.ok_or(Error::Timeout)?,
    };

    let max_payload = max_chunk_payload(pool.chunk_capacity());
    let mut expected_offset: u32 = 0;
    let mut declared_total: Option<u32> = None;

    loop {
        let header = match chunk.take_header() {
            Ok(header) => header,
            Err(err) => {
                log::debug!("Rejecting chunk: {}", err);
                pool.release(chunk);
                return Err(err);
            }
        };

        if header.offset != expected_offset || chunk.is_empty() || chunk.len() > max_payload {
            log::debug!(
                "Rejecting chunk: offset {} (expected {}), length {}, total size {}",
                header.offset,
                expected_offset,
                chunk.len(),
                header.total_size
            );
            let len = chunk.len();
            pool.release(chunk);
            return protocol_err(format!(
                "Inconsistent chunk: offset {} (expected {}), length {}",
                header.offset, expected_offset, len
            ));
        }

        let total = match declared_total {
            Some(total) => total,
            None => {
                if header.total_size == 0 {
                    pool.release(chunk);
                    return protocol_err("Transfer declared zero total size");
                }
                declared_total = Some(header.total_size);
                header.total_size
            }
        };

        let written = sink.write(chunk.payload(), expected_offset, total);
        if written != chunk.len() {
            log::debug!(
                "Sink accepted {} of {} bytes at offset {}",
                written,
                chunk.len(),
                expected_offset
            );
            let len = chunk.len();
            pool.release(chunk);
            return protocol_err(format!(
                "Short write to sink: {} of {} bytes at offset {}",
                written, len, expected_offset
            ));
        }

        expected_offset += chunk.len() as u32;
        pool.release(chunk);

        if expected_offset >= total {
            log::trace!("Transfer complete: {} bytes", total);
            return Ok(total);
        }

        chunk = transport.receive(timeout)?.ok_or(Error::Timeout)?;
    }
}

/// Receive one transfer into a fresh `Vec<u8>`
pub fn recv_to_vec<T, P>(transport: &mut T, pool: &P, timeout: Duration) -> Result<Vec<u8>>
where
    T: Transport,
    P: BufferPool + ?Sized,
{
    let mut sink = VecSink::new();
    recv(transport, pool, &mut sink, timeout)?;
    Ok(sink.into_inner())
}
