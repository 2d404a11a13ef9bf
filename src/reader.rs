//! The receive loop: a forward-only sequence of records read off the
//! connection until the producer goes away.

use std::io::{self, Read};
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::error::Error;
use crate::record::EventRecord;

/// How a record sequence ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The peer closed on a record boundary.
    Closed,
    /// The peer closed partway through a record. The partial bytes were
    /// discarded.
    Truncated { bytes: usize },
    /// The stop signal was raised between two records.
    Cancelled,
}

enum Fill {
    Full,
    Short(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Streaming,
    Ended(StreamEnd),
    Failed,
}

/// Lazily decodes [`EventRecord`]s from `reader`.
///
/// Yields `Ok` per record in arrival order. A clean close, a truncated tail
/// or a cancellation ends the sequence with `None`; see [`Records::end`] for
/// which. A transport failure is yielded once as `Err(Error::Transport)`.
/// Either way every later call returns `None`.
#[derive(Debug)]
pub struct Records<R> {
    reader: R,
    state: State,
    received: u64,
    cancel: Option<Arc<AtomicBool>>,
}

impl<R> Records<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Records<R> {
        Records {
            reader,
            state: State::Streaming,
            received: 0,
            cancel: None,
        }
    }

    /// Ends the sequence once `flag` is set. The flag is checked before each
    /// record read, so a read already blocked waits for data or close.
    pub fn cancel_on(mut self, flag: Arc<AtomicBool>) -> Records<R> {
        self.cancel = Some(flag);
        self
    }

    /// Records yielded so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// `Some` once the sequence has ended cleanly.
    pub fn end(&self) -> Option<StreamEnd> {
        match self.state {
            State::Ended(end) => Some(end),
            _ => None,
        }
    }

    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        let mut pos = 0;
        while pos < buf.len() {
            match self.reader.read(&mut buf[pos..]) {
                Ok(0) => return Ok(Fill::Short(pos)),
                Ok(n) => pos += n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(Fill::Full)
    }

    fn finish(&mut self, end: StreamEnd) {
        if let StreamEnd::Truncated { bytes } = end {
            warn!(
                bytes,
                received = self.received,
                "peer closed mid-record, discarding partial record"
            );
        }
        self.state = State::Ended(end);
    }
}

impl<R> Iterator for Records<R>
where
    R: Read,
{
    type Item = Result<EventRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Streaming {
            return None;
        }
        let cancelled = self
            .cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Acquire));
        if cancelled {
            self.finish(StreamEnd::Cancelled);
            return None;
        }

        let mut buf = [0u8; EventRecord::SIZE];
        match self.fill(&mut buf) {
            Ok(Fill::Full) => {
                self.received += 1;
                Some(Ok(EventRecord::decode(&buf)))
            }
            Ok(Fill::Short(0)) => {
                self.finish(StreamEnd::Closed);
                None
            }
            Ok(Fill::Short(bytes)) => {
                self.finish(StreamEnd::Truncated { bytes });
                None
            }
            Err(source) => {
                self.state = State::Failed;
                Some(Err(Error::Transport {
                    received: self.received,
                    source,
                }))
            }
        }
    }
}

impl<R> FusedIterator for Records<R> where R: Read {}
