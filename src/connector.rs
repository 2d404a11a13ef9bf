//! Connection setup and the one-shot subscription handshake.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;

use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::reader::Records;

/// Default endpoint when none is given on the command line.
pub const DEFAULT_ENDPOINT: &str = "./socket";

/// A connection on which the mask has been sent. The next byte read from
/// the stream is the first byte of the first record.
#[derive(Debug)]
pub struct Subscription<S> {
    stream: S,
    mask: Mask,
}

/// Connects to the producer listening at `path` and subscribes with `mask`.
pub fn connect<P: AsRef<Path>>(path: P, mask: Mask) -> Result<Subscription<UnixStream>> {
    let path = path.as_ref();
    let stream = UnixStream::connect(path).map_err(|source| Error::Connection {
        path: path.to_path_buf(),
        source,
    })?;
    Subscription::handshake(stream, mask)
}

impl<S> Subscription<S>
where
    S: Read + Write,
{
    /// Sends `mask` on an already-connected stream. On failure the stream
    /// is dropped, and with it the connection.
    pub fn handshake(mut stream: S, mask: Mask) -> Result<Subscription<S>> {
        // write_all loops over short writes and retries on EINTR.
        stream
            .write_all(&mask.to_wire())
            .and_then(|()| stream.flush())
            .map_err(|source| Error::Transmit { mask, source })?;
        Ok(Subscription { stream, mask })
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_records(self) -> Records<S> {
        Records::new(self.stream)
    }
}
