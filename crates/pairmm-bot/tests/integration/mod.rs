//! Integration tests for pairmm-bot.
//!
//! These tests drive the engine end to end:
//! - Quote placement and replacement from hedge book updates
//! - Fill handling and hedging
//! - Replay through the application event loop

pub mod common;
