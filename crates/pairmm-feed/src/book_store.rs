//! Latest order book ladder per instrument.
//!
//! Updates replace the stored ladder unconditionally. Sequence numbers
//! are kept so callers can see gaps or reordering, but they never cause
//! an update to be dropped.

use chrono::{DateTime, Utc};
use pairmm_core::{Instrument, Ladder};
use tracing::{debug, warn};

/// How an update's sequence number relates to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceCheck {
    /// First update seen for this instrument.
    First,
    /// Exactly one past the previous sequence number.
    InOrder,
    /// Skipped ahead; `missed` updates were never seen.
    Gap { missed: u64 },
    /// Not newer than the previous sequence number.
    Stale { last: u64 },
}

/// Stored book state for one instrument.
#[derive(Debug, Clone)]
pub struct BookEntry {
    /// Latest ladder.
    pub ladder: Ladder,
    /// Sequence number of the latest update.
    pub sequence: u64,
    /// Wall-clock time the update was stored.
    pub updated_at: DateTime<Utc>,
}

/// Holds the latest 5-level ladder for each instrument.
#[derive(Debug, Default)]
pub struct OrderBookStore {
    entries: [Option<BookEntry>; 2],
}

impl OrderBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ladder for `instrument`.
    ///
    /// Always stores the update; the returned check is informational.
    pub fn update(
        &mut self,
        instrument: Instrument,
        sequence: u64,
        ladder: Ladder,
    ) -> SequenceCheck {
        let now = Utc::now();
        let slot = &mut self.entries[instrument.index()];
        let since_last_ms = slot
            .as_ref()
            .map(|e| (now - e.updated_at).num_milliseconds());

        let check = match slot.as_ref().map(|e| e.sequence) {
            None => SequenceCheck::First,
            Some(last) if last.checked_add(1) == Some(sequence) => SequenceCheck::InOrder,
            Some(last) if sequence > last => SequenceCheck::Gap {
                missed: sequence - last - 1,
            },
            Some(last) => SequenceCheck::Stale { last },
        };

        match check {
            SequenceCheck::Gap { missed } => {
                warn!(
                    %instrument,
                    sequence,
                    missed,
                    ?since_last_ms,
                    "Book update sequence gap"
                );
            }
            SequenceCheck::Stale { last } => {
                warn!(
                    %instrument,
                    sequence,
                    last,
                    ?since_last_ms,
                    "Book update out of order"
                );
            }
            SequenceCheck::First | SequenceCheck::InOrder => {
                debug!(
                    %instrument,
                    sequence,
                    best_bid = ladder.best_bid(),
                    best_ask = ladder.best_ask(),
                    "Book updated"
                );
            }
        }

        *slot = Some(BookEntry {
            ladder,
            sequence,
            updated_at: now,
        });

        check
    }

    /// Latest ladder for `instrument`; empty until the first update.
    pub fn ladder(&self, instrument: Instrument) -> Ladder {
        self.entries[instrument.index()]
            .as_ref()
            .map(|e| e.ladder)
            .unwrap_or_default()
    }

    /// Stored entry for `instrument`, if any update was received.
    pub fn get(&self, instrument: Instrument) -> Option<&BookEntry> {
        self.entries[instrument.index()].as_ref()
    }

    /// Last sequence number seen for `instrument`.
    pub fn last_sequence(&self, instrument: Instrument) -> Option<u64> {
        self.get(instrument).map(|e| e.sequence)
    }

    /// Milliseconds since the last update for `instrument`.
    pub fn age_ms(&self, instrument: Instrument) -> Option<i64> {
        self.get(instrument)
            .map(|e| (Utc::now() - e.updated_at).num_milliseconds())
    }

    /// True when every instrument shows a nonzero top price on some side.
    pub fn all_quoted(&self) -> bool {
        Instrument::ALL.iter().all(|i| self.ladder(*i).has_top())
    }
}
