//! Market data and venue events for the pair market maker.
//!
//! Keeps the latest ladder per instrument and defines the already-decoded
//! inbound events the engine consumes.

pub mod book_store;
pub mod error;
pub mod event;

pub use book_store::{BookEntry, OrderBookStore, SequenceCheck};
pub use error::{FeedError, FeedResult};
pub use event::{EngineEvent, EventParser};
