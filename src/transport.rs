/*!
Transport interface for the SFP protocol.

The core hands fully formed chunks to a [`Transport`] and pulls incoming
chunks from it; connection management, delivery guarantees and framing
below the chunk level all live behind this trait. The protocol assumes
in-order delivery.

[`ChannelTransport`] is an in-process loopback implementation used by the
tests and by callers wiring a sender and receiver together in one
process.
*/

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::{chunk::Chunk, error::Result};

/// Message transport carrying chunks between two endpoints
pub trait Transport {
    /// Hand a chunk to the transport for delivery
    fn send(&mut self, chunk: Chunk) -> Result<()>;

    /// Wait up to `timeout` for the next incoming chunk
    ///
    /// Returns `None` when no chunk arrived within the timeout or the
    /// peer closed the connection; transport failures are returned as
    /// errors and pass through the protocol unmodified.
    fn receive(&mut self, timeout: Duration) -> Result<Option<Chunk>>;
}

/// One endpoint of an in-process chunk channel
pub struct ChannelTransport {
    tx: Sender<Chunk>,
    rx: Receiver<Chunk>,
}

impl ChannelTransport {
    /// Create a connected pair of endpoints
    pub fn pair() -> (ChannelTransport, ChannelTransport) {
        let (a_tx, b_rx) = mpsc::channel();
        let (b_tx, a_rx) = mpsc::channel();
        (
            ChannelTransport { tx: a_tx, rx: a_rx },
            ChannelTransport { tx: b_tx, rx: b_rx },
        )
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, chunk: Chunk) -> Result<()> {
        self.tx
            .send(chunk)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "Peer disconnected").into())
    }

    fn receive(&mut self, timeout: Duration) -> Result<Option<Chunk>> {
        match self.rx.recv_timeout(timeout) {
            Ok(chunk) => Ok(Some(chunk)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback() {
        let (mut a, mut b) = ChannelTransport::pair();

        let mut chunk = Chunk::with_capacity(16);
        chunk.set_len(3).unwrap();
        chunk.buffer_mut()[..3].copy_from_slice(b"abc");
        a.send(chunk).unwrap();

        let received = b.receive(Duration::from_millis(100)).unwrap().unwrap();
        assert_eq!(received.payload(), b"abc");
    }

    #[test]
    fn test_receive_timeout() {
        let (_a, mut b) = ChannelTransport::pair();

        let received = b.receive(Duration::from_millis(10)).unwrap();
        assert!(received.is_none());
    }

    #[test]
    fn test_receive_after_disconnect() {
        let (a, mut b) = ChannelTransport::pair();
        drop(a);

        let received = b.receive(Duration::from_millis(10)).unwrap();
        assert!(received.is_none());
    }

    #[test]
    fn test_send_after_disconnect() {
        let (mut a, b) = ChannelTransport::pair();
        drop(b);

        let chunk = Chunk::with_capacity(16);
        assert!(a.send(chunk).is_err());
    }
}
