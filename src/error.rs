use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::mask::Mask;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit status for a clean end of stream.
pub const EXIT_OK: i32 = 0;
/// Exit status for malformed arguments (matches clap's own usage errors).
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_CONNECTION: i32 = 3;
pub const EXIT_TRANSMIT: i32 = 4;
pub const EXIT_TRANSPORT: i32 = 5;
/// Exit status when stdout fails for a reason other than a closed pipe.
pub const EXIT_OUTPUT: i32 = 6;

/// Fatal conditions of a subscription. None of them is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint could not be reached or refused the connection.
    #[error("failed to connect to {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The handshake could not be written in full.
    #[error("failed to send subscription mask {mask}: {source}")]
    Transmit {
        mask: Mask,
        #[source]
        source: io::Error,
    },

    /// The connection failed while streaming. A peer that merely closes is
    /// not reported here.
    #[error("transport failed after {received} records: {source}")]
    Transport {
        received: u64,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Connection { .. } => EXIT_CONNECTION,
            Error::Transmit { .. } => EXIT_TRANSMIT,
            Error::Transport { .. } => EXIT_TRANSPORT,
        }
    }
}
