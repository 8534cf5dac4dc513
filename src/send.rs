/*!
Sending side of the SFP protocol.

Splits a transfer into MTU-sized chunks, appends the SFP header to each
and hands them to the transport in order.
*/

use crate::{
    buffer::BufferPool,
    constants::max_chunk_payload,
    error::{Error, Result, invalid_argument_err, protocol_err},
    header::SfpHeader,
    io::{DataSource, SliceSource},
    transport::Transport,
};

/// Send a transfer of `total_size` bytes pulled from `source`
///
/// The transfer is sent as a sequence of chunks of at most `mtu` payload
/// bytes each, in order, every one carrying the SFP header trailer and
/// the fragment flag. `mtu` must be positive and leave room for the
/// header within the pool's chunk capacity.
///
/// A `total_size` of zero sends no chunks and succeeds; note the peer's
/// receiver treats a transfer that never declares a positive size as a
/// protocol violation.
pub fn send<T, P, S>(
    transport: &mut T,
    pool: &P,
    source: &mut S,
    total_size: u32,
    mtu: u16,
) -> Result<()>
where
    T: Transport,
    P: BufferPool + ?Sized,
    S: DataSource + ?Sized,
{
    let max_payload = max_chunk_payload(pool.chunk_capacity());
    if mtu == 0 || mtu as usize > max_payload {
        return invalid_argument_err(format!(
            "MTU {} outside valid range 1..={}",
            mtu, max_payload
        ));
    }

    let mut count: u32 = 0;
    while count < total_size {
        let Some(mut chunk) = pool.acquire() else {
            return Err(Error::OutOfMemory);
        };

        let size = (total_size - count).min(mtu as u32) as u16;

        let read = source.read(&mut chunk.buffer_mut()[..size as usize], count);
        if read != size as usize {
            log::debug!(
                "Source returned {} of {} bytes at offset {}",
                read,
                size,
                count
            );
            pool.release(chunk);
            return protocol_err(format!(
                "Short read from source: {} of {} bytes at offset {}",
                read, size, count
            ));
        }

        if let Err(err) = chunk.set_len(size) {
            pool.release(chunk);
            return Err(err);
        }
        chunk.set_fragment(true);
        if let Err(err) = chunk.push_header(&SfpHeader::new(count, total_size)) {
            pool.release(chunk);
            return Err(err);
        }

        // Ownership of the buffer passes to the transport.
        transport.send(chunk)?;
        log::trace!("Sent chunk offset {} length {} of {}", count, size, total_size);

        count += size as u32;
    }

    Ok(())
}

/// Send the contents of a byte slice as one transfer
pub fn send_slice<T, P>(transport: &mut T, pool: &P, data: &[u8], mtu: u16) -> Result<()>
where
    T: Transport,
    P: BufferPool + ?Sized,
{
    let total_size = u32::try_from(data.len())
        .map_err(|_| Error::InvalidArgument(format!("Transfer of {} bytes too large", data.len())))?;
    let mut source = SliceSource::new(data);
    send(transport, pool, &mut source, total_size, mtu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buffer::FixedBufferPool, transport::ChannelTransport};
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[test]
    fn test_invalid_mtu_rejected() {
        let (mut tx, mut rx) = ChannelTransport::pair();
        let pool = FixedBufferPool::new(4, 64);

        let err = send_slice(&mut tx, &pool, b"hello", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        // 64-byte buffers leave 56 bytes of payload room
        let err = send_slice(&mut tx, &pool, b"hello", 57).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        assert!(send_slice(&mut tx, &pool, b"hello", 56).is_ok());

        // nothing was sent before the validation failures
        let first = rx.receive(TIMEOUT).unwrap().unwrap();
        assert_eq!(first.len(), 5 + crate::constants::HEADER_SIZE);
        assert!(rx.receive(Duration::from_millis(10)).unwrap().is_none());
    }

    #[test]
    fn test_chunk_layout() {
        let (mut tx, mut rx) = ChannelTransport::pair();
        let pool = FixedBufferPool::new(4, 64);

        send_slice(&mut tx, &pool, b"0123456789", 4).unwrap();

        let mut expected = [(0u32, 4usize), (4, 4), (8, 2)].into_iter();
        while let Some(mut chunk) = rx.receive(Duration::from_millis(10)).unwrap() {
            let (offset, len) = expected.next().unwrap();
            assert!(chunk.is_fragment());

            let header = chunk.take_header().unwrap();
            assert_eq!(header.offset, offset);
            assert_eq!(header.total_size, 10);
            assert_eq!(chunk.len(), len);
        }
        assert!(expected.next().is_none());
    }

    #[test]
    fn test_zero_size_sends_nothing() {
        let (mut tx, mut rx) = ChannelTransport::pair();
        let pool = FixedBufferPool::new(4, 64);

        send_slice(&mut tx, &pool, b"", 16).unwrap();
        assert!(rx.receive(Duration::from_millis(10)).unwrap().is_none());
    }

    #[test]
    fn test_short_source_aborts() {
        let (mut tx, mut rx) = ChannelTransport::pair();
        let pool = FixedBufferPool::new(4, 64);

        // claim 20 bytes but back them with only 10
        let mut source = SliceSource::new(b"0123456789");
        let err = send(&mut tx, &pool, &mut source, 20, 16).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));

        // the failed chunk was released, not transmitted
        assert!(rx.receive(Duration::from_millis(10)).unwrap().is_none());
        assert_eq!(pool.available(), 4);
    }

    #[test]
    fn test_pool_exhaustion() {
        let (mut tx, _rx) = ChannelTransport::pair();
        let pool = FixedBufferPool::new(0, 64);

        let err = send_slice(&mut tx, &pool, b"hello", 16).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory));
    }
}
