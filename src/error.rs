/*!
Error handling for the SFP protocol.
*/

use std::io;
use thiserror::Error;

/// Result type for the SFP protocol
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the SFP protocol
#[derive(Error, Debug)]
pub enum Error {
    /// Bad caller-supplied argument (invalid MTU)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Chunk buffer pool exhausted
    #[error("Out of chunk buffers")]
    OutOfMemory,

    /// Header, offset or length inconsistency in the chunk stream
    #[error("Protocol violation: {0}")]
    Protocol(String),

    /// No chunk arrived within the deadline, or the transport closed
    /// mid-transfer
    #[error("Timed out waiting for chunk")]
    Timeout,

    /// Transport-layer error, passed through unmodified
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidArgument(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            Error::OutOfMemory => io::Error::new(io::ErrorKind::OutOfMemory, "Out of chunk buffers"),
            Error::Protocol(msg) => io::Error::new(io::ErrorKind::InvalidData, msg),
            Error::Timeout => io::Error::new(io::ErrorKind::TimedOut, "Timed out waiting for chunk"),
            Error::Io(io_error) => io_error,
        }
    }
}

/// Convert a string to an Error::Protocol
pub fn protocol_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::Protocol(msg.into()))
}

/// Convert a string to an Error::InvalidArgument
pub fn invalid_argument_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::InvalidArgument(msg.into()))
}
