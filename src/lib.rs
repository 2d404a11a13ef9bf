//! Client for a local event producer.
//!
//! The producer listens on a Unix stream socket. A client connects, writes
//! an 8-byte little-endian channel mask, and from then on reads 16-byte
//! records (`f64` timestamp, `u64` value, both little-endian) until the
//! producer closes the connection.
//!
//! ```no_run
//! use eventtap::Mask;
//!
//! let subscription = eventtap::connect("./socket", Mask::ALL)?;
//! for record in subscription.into_records() {
//!     println!("{}", record?);
//! }
//! # Ok::<(), eventtap::Error>(())
//! ```

pub mod connector;
pub mod error;
pub mod logging;
pub mod mask;
pub mod reader;
pub mod record;

pub use connector::{connect, Subscription, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use mask::{Mask, ParseMaskError};
pub use reader::{Records, StreamEnd};
pub use record::EventRecord;
