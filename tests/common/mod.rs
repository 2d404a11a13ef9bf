#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use eventtap::EventRecord;
use tempfile::TempDir;

/// A one-shot producer: accepts a single subscriber, reads its mask, plays
/// back `chunks` with a short pause between writes and then hangs up.
pub struct Producer {
    _dir: TempDir,
    path: PathBuf,
    handle: Option<JoinHandle<io::Result<[u8; 8]>>>,
}

impl Producer {
    pub fn spawn(chunks: Vec<Vec<u8>>) -> Producer {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("socket");
        let listener = UnixListener::bind(&path).expect("bind");

        let handle = thread::spawn(move || {
            let (mut stream, _addr) = listener.accept()?;
            let mut mask = [0u8; 8];
            stream.read_exact(&mut mask)?;
            for chunk in chunks {
                stream.write_all(&chunk)?;
                stream.flush()?;
                thread::sleep(Duration::from_millis(2));
            }
            Ok(mask)
        });

        Producer { _dir: dir, path, handle: Some(handle) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits for the producer to finish and returns the mask bytes it got.
    pub fn join(mut self) -> [u8; 8] {
        self.handle
            .take()
            .expect("joined twice")
            .join()
            .expect("producer thread panicked")
            .expect("producer i/o")
    }
}

pub fn wire(records: &[EventRecord]) -> Vec<u8> {
    records.iter().flat_map(|r| r.encode()).collect()
}

pub fn sample(n: usize) -> Vec<EventRecord> {
    (0..n)
        .map(|i| {
            let value = (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
            EventRecord::new(i as f64 * 0.125 + 1e-9, value)
        })
        .collect()
}
