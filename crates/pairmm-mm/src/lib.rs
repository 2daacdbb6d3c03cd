//! Market making strategy for the pair market maker.
//!
//! Quotes the traded instrument one tick inside the hedge instrument's
//! market and offsets every fill on the hedge instrument:
//! - Quote calculation from the hedge ladder
//! - Per-side quote lifecycle (place/cancel, one order per side)
//! - Hedge pricing after fills
//! - Net position tracking for the placement guard
//!
//! # Architecture
//!
//! ```text
//! Hedge book update → Engine.on_order_book_update()
//!                      ├─ compute_quotes(): target bid/ask
//!                      └─ OrderLifecycleManager: cancel / insert per side
//!                           ↓
//!                      OrderGateway.insert_order() / cancel_order()
//!
//! Quote fill → Engine.on_order_filled()
//!               ├─ OrderLifecycleManager: cap at open volume, resolve when done
//!               ├─ PositionTracker: update net position
//!               └─ HedgeExecutor: offsetting order on hedge instrument
//! ```

pub mod config;
pub mod engine;
pub mod gateway;
pub mod hedge;
pub mod lifecycle;
pub mod position;
pub mod quote_engine;

pub use config::MakerConfig;
pub use engine::{Engine, EngineSnapshot};
pub use gateway::{OrderGateway, RecordingGateway};
pub use hedge::{HedgeError, HedgeExecutor};
pub use lifecycle::{
    AppliedFill, OrderLifecycleManager, Resolution, SideSlot, TrackedOrder, WorkingQuote,
};
pub use position::PositionTracker;
pub use quote_engine::{compute_quotes, weighted_average_price, QuotePair};
