//! Builders for ladders and JSON-lines events.

use pairmm_core::{Instrument, Ladder, OrderId, Price, Volume};
use pairmm_feed::EngineEvent;

/// Ladder with only the top level populated on each side.
pub fn top_ladder(bid: Price, ask: Price) -> Ladder {
    Ladder::new(
        [ask, 0, 0, 0, 0],
        [if ask > 0 { 500 } else { 0 }, 0, 0, 0, 0],
        [bid, 0, 0, 0, 0],
        [if bid > 0 { 500 } else { 0 }, 0, 0, 0, 0],
    )
}

/// Ladder with two populated levels per side.
pub fn deep_ladder(bids: [(Price, Volume); 2], asks: [(Price, Volume); 2]) -> Ladder {
    Ladder::new(
        [asks[0].0, asks[1].0, 0, 0, 0],
        [asks[0].1, asks[1].1, 0, 0, 0],
        [bids[0].0, bids[1].0, 0, 0, 0],
        [bids[0].1, bids[1].1, 0, 0, 0],
    )
}

pub fn book(instrument: Instrument, sequence: u64, ladder: Ladder) -> EngineEvent {
    EngineEvent::book(instrument, sequence, ladder)
}

pub fn filled(order_id: OrderId, price: Price, volume: Volume) -> EngineEvent {
    EngineEvent::OrderFilled {
        order_id,
        price,
        volume,
    }
}

pub fn status(order_id: OrderId, fill_volume: Volume, remaining_volume: Volume) -> EngineEvent {
    EngineEvent::OrderStatus {
        order_id,
        fill_volume,
        remaining_volume,
        fees: 0,
    }
}

/// Encode events as a JSON-lines session.
pub fn to_jsonl(events: &[EngineEvent]) -> String {
    let mut out = String::from("# recorded session\n");
    for event in events {
        out.push_str(&serde_json::to_string(event).unwrap());
        out.push('\n');
    }
    out
}
