/*!
# SFP Protocol

Simple Fragmentation Protocol (SFP): moves an arbitrarily large byte blob
across a transport that only delivers bounded-size messages, by splitting
the blob into ordered chunks on the sending side and reassembling them on
the receiving side.

## Overview

Every chunk carries an 8-byte big-endian trailer with the chunk's byte
offset within the transfer and the transfer's total size, plus a
transport-level fragment flag distinguishing SFP chunks from unrelated
traffic. The receiver validates each chunk against its running state and
aborts the whole transfer on the first inconsistency; there is no
retransmission, reordering or flow control.

The crate implements only the fragmentation core. The message transport,
the chunk buffer allocator and the storage backing a transfer are
supplied by the caller behind the [`Transport`], [`BufferPool`],
[`DataSource`] and [`DataSink`] traits; memory- and stream-backed
source/sink implementations and an in-process loopback transport are
included for convenience.

## Example

```
use sfp_protocol::{FixedBufferPool, ChannelTransport, send_slice, recv_to_vec};
use std::time::Duration;

let (mut tx, mut rx) = ChannelTransport::pair();
let pool = FixedBufferPool::new(8, 256);

send_slice(&mut tx, &pool, b"hello, fragmented world", 16).unwrap();
let data = recv_to_vec(&mut rx, &pool, Duration::from_millis(100)).unwrap();
assert_eq!(data, b"hello, fragmented world");
```
*/

pub mod buffer;
pub mod chunk;
pub mod constants;
pub mod error;
pub mod header;
pub mod io;
pub mod recv;
pub mod send;
pub mod transport;

// Re-export commonly used types for convenience
pub use buffer::{BufferPool, FixedBufferPool};
pub use chunk::Chunk;
pub use constants::{DEFAULT_CHUNK_CAPACITY, DEFAULT_POOL_BUFFERS, HEADER_SIZE, max_chunk_payload};
pub use error::{Error, Result};
pub use header::SfpHeader;
pub use io::{DataSink, DataSource, ReaderSource, SliceSource, VecSink, WriterSink};
pub use recv::{recv, recv_fp, recv_to_vec};
pub use send::{send, send_slice};
pub use transport::{ChannelTransport, Transport};
