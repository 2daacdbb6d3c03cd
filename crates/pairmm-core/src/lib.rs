//! Core domain types for the pair market maker.
//!
//! This crate provides fundamental types used throughout the engine:
//! - `Instrument`: the traded instrument and its hedge
//! - `Ladder`: five-level bid/ask book view in integer ticks
//! - `OrderSide`, `Lifespan`, `OrderRole`: order enums
//! - `InsertOrder`, `CancelOrder`, `OrderRequest`: outbound venue requests

pub mod error;
pub mod execution;
pub mod instrument;
pub mod order;
pub mod types;

pub use error::{CoreError, Result};
pub use execution::{CancelOrder, InsertOrder, OrderRequest};
pub use instrument::Instrument;
pub use order::{Lifespan, OrderRole, OrderSide};
pub use types::{Ladder, LADDER_DEPTH};

/// Price in integer minor currency units.
pub type Price = i64;

/// Volume in lots.
pub type Volume = u64;

/// Client order identifier, unique for the process lifetime.
pub type OrderId = u64;

/// Signed net position in lots (positive = long).
pub type Position = i64;

/// Standard quote size in lots.
pub const LOT_SIZE: Volume = 100;

/// Absolute cap on net position for quote placement.
pub const POSITION_LIMIT: Position = 1000;

/// Minimum price increment in minor currency units.
pub const TICK_SIZE: Price = 100;

/// Hedge spread must exceed this many ticks before we quote inside it.
pub const SPREAD_THRESHOLD_TICKS: Price = 2;
