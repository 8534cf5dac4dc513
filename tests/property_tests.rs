use sfp_protocol::{
    BufferPool, ChannelTransport, Error, FixedBufferPool, HEADER_SIZE, SfpHeader, Transport,
    recv_to_vec, send_slice,
};

use proptest::prelude::*;
use std::time::Duration;

const CHUNK_CAPACITY: usize = 64;
const TIMEOUT: Duration = Duration::from_millis(100);

// Strategy for generating transfer payloads
fn transfer_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..2000)
}

// Strategy for generating MTUs valid for CHUNK_CAPACITY buffers
fn valid_mtus() -> impl Strategy<Value = u16> {
    1..=(CHUNK_CAPACITY - HEADER_SIZE) as u16
}

proptest! {
    #[test]
    fn prop_header_roundtrip(offset in any::<u32>(), total_size in any::<u32>()) {
        let header = SfpHeader::new(offset, total_size);
        let parsed = SfpHeader::from_bytes(&header.to_bytes()).unwrap();
        prop_assert_eq!(header, parsed);
    }

    #[test]
    fn prop_send_recv_roundtrip(data in transfer_data(), mtu in valid_mtus()) {
        let (mut tx, mut rx) = ChannelTransport::pair();
        let buffers = data.len() / mtu as usize + 2;
        let pool = FixedBufferPool::new(buffers, CHUNK_CAPACITY);

        send_slice(&mut tx, &pool, &data, mtu).unwrap();
        let received = recv_to_vec(&mut rx, &pool, TIMEOUT).unwrap();

        prop_assert_eq!(received, data);
        prop_assert_eq!(pool.available(), buffers);
    }

    #[test]
    fn prop_dropped_chunk_rejected(data in transfer_data(), mtu in valid_mtus(), drop_seed in any::<prop::sample::Index>()) {
        let (mut tx, mut rx) = ChannelTransport::pair();
        let (mut relay_tx, mut relay_rx) = ChannelTransport::pair();
        let buffers = data.len() / mtu as usize + 2;
        let pool = FixedBufferPool::new(buffers, CHUNK_CAPACITY);

        send_slice(&mut tx, &pool, &data, mtu).unwrap();

        // relay the chunk stream, dropping exactly one chunk
        let chunk_count = data.len().div_ceil(mtu as usize);
        let dropped = drop_seed.index(chunk_count);
        let mut index = 0;
        while let Some(chunk) = rx.receive(Duration::from_millis(10)).unwrap() {
            if index != dropped {
                relay_tx.send(chunk).unwrap();
            } else {
                pool.release(chunk);
            }
            index += 1;
        }
        drop(relay_tx);

        let err = recv_to_vec(&mut relay_rx, &pool, Duration::from_millis(10)).unwrap_err();
        if dropped + 1 == chunk_count {
            // a missing final chunk only ever shows up as silence
            prop_assert!(matches!(err, Error::Timeout));
        } else {
            prop_assert!(matches!(err, Error::Protocol(_)));
        }
    }
}
