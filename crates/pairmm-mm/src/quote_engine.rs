//! Quote price calculation engine.
//!
//! Derives target bid/ask prices for the traded instrument from the
//! hedge instrument's ladder:
//! - Quote one tick inside the hedge market when its spread is wide enough
//! - Otherwise withdraw both sides
//!
//! Also provides the volume-weighted ladder price used for hedging.

use pairmm_core::{CoreError, Ladder, OrderSide, Price, Volume};

use crate::config::MakerConfig;

/// Target prices for both sides. A price of 0 withdraws that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuotePair {
    /// Target bid price.
    pub bid: Price,
    /// Target ask price.
    pub ask: Price,
}

impl QuotePair {
    pub fn new(bid: Price, ask: Price) -> Self {
        Self { bid, ask }
    }

    /// Withdraw interest on both sides.
    pub fn withdrawn() -> Self {
        Self::default()
    }

    /// True if neither side is quoted.
    pub fn is_withdrawn(&self) -> bool {
        self.bid == 0 && self.ask == 0
    }

    /// Target price for one side.
    pub fn price(&self, side: OrderSide) -> Price {
        match side {
            OrderSide::Buy => self.bid,
            OrderSide::Sell => self.ask,
        }
    }
}

/// Calculate target quotes from the hedge instrument's ladder.
///
/// Quotes `(bid + tick, ask - tick)` when the hedge spread strictly
/// exceeds the configured threshold, otherwise `(0, 0)`. A one-sided
/// hedge book has no spread and also withdraws. No inventory skew is
/// applied.
pub fn compute_quotes(hedge: &Ladder, config: &MakerConfig) -> QuotePair {
    if hedge.best_bid() == 0 || hedge.best_ask() == 0 {
        return QuotePair::withdrawn();
    }
    let spread = hedge.spread();
    if spread > config.spread_threshold() {
        QuotePair::new(
            hedge.best_bid() + config.tick_size,
            hedge.best_ask() - config.tick_size,
        )
    } else {
        QuotePair::withdrawn()
    }
}

/// Volume-weighted average price of a ladder side, truncated toward zero.
///
/// `Σ(price·volume) / Σ(volume)` in exact integer arithmetic. Fails with
/// `InvalidInput` if the slices differ in length or total volume is zero;
/// callers check the top price first.
pub fn weighted_average_price(prices: &[Price], volumes: &[Volume]) -> Result<Price, CoreError> {
    if prices.len() != volumes.len() {
        return Err(CoreError::InvalidInput(format!(
            "{} prices but {} volumes",
            prices.len(),
            volumes.len()
        )));
    }

    let (notional, total) = prices.iter().zip(volumes).fold(
        (0i128, 0i128),
        |(notional, total), (&price, &volume)| {
            (
                notional + i128::from(price) * i128::from(volume),
                total + i128::from(volume),
            )
        },
    );

    if total == 0 {
        return Err(CoreError::InvalidInput(
            "weighted average over zero total volume".into(),
        ));
    }

    Price::try_from(notional / total)
        .map_err(|_| CoreError::InvalidInput("weighted average out of range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hedge(bid: Price, ask: Price) -> Ladder {
        Ladder::new(
            [ask, ask + 100, 0, 0, 0],
            [10, 10, 0, 0, 0],
            [bid, bid - 100, 0, 0, 0],
            [10, 10, 0, 0, 0],
        )
    }

    #[test]
    fn test_wide_spread_quotes_inside() {
        let quotes = compute_quotes(&hedge(10000, 10300), &MakerConfig::default());
        assert_eq!(quotes, QuotePair::new(10100, 10200));
        assert!(!quotes.is_withdrawn());
    }

    #[test]
    fn test_spread_at_threshold_withdraws() {
        let quotes = compute_quotes(&hedge(10000, 10200), &MakerConfig::default());
        assert!(quotes.is_withdrawn());
    }

    #[test]
    fn test_narrow_or_crossed_spread_withdraws() {
        let config = MakerConfig::default();
        for (bid, ask) in [(10000, 10100), (10000, 10000), (10100, 10000)] {
            assert_eq!(
                compute_quotes(&hedge(bid, ask), &config),
                QuotePair::withdrawn(),
                "bid={bid} ask={ask}"
            );
        }
    }

    #[test]
    fn test_spread_threshold_sweep() {
        let config = MakerConfig::default();
        for spread in (0..=200).step_by(10) {
            let quotes = compute_quotes(&hedge(10000, 10000 + spread), &config);
            assert!(quotes.is_withdrawn(), "spread={spread}");
        }
        let quotes = compute_quotes(&hedge(10000, 10201), &config);
        assert_eq!(quotes, QuotePair::new(10100, 10101));
    }

    #[test]
    fn test_one_sided_hedge_book_withdraws() {
        let config = MakerConfig::default();
        let no_bids = Ladder::new([10500, 0, 0, 0, 0], [10, 0, 0, 0, 0], [0; 5], [0; 5]);
        let no_asks = Ladder::new([0; 5], [0; 5], [10000, 0, 0, 0, 0], [10, 0, 0, 0, 0]);
        assert!(compute_quotes(&no_bids, &config).is_withdrawn());
        assert!(compute_quotes(&no_asks, &config).is_withdrawn());
    }

    #[test]
    fn test_quote_pair_price_by_side() {
        let quotes = QuotePair::new(10100, 10200);
        assert_eq!(quotes.price(OrderSide::Buy), 10100);
        assert_eq!(quotes.price(OrderSide::Sell), 10200);
    }

    #[test]
    fn test_weighted_average_price() {
        assert_eq!(weighted_average_price(&[10000, 10100], &[5, 5]), Ok(10050));
    }

    #[test]
    fn test_weighted_average_truncates() {
        // (10000*2 + 10100*1) / 3 = 10033.33...
        assert_eq!(weighted_average_price(&[10000, 10100], &[2, 1]), Ok(10033));
    }

    #[test]
    fn test_weighted_average_ignores_empty_levels() {
        let prices = [10300, 10400, 0, 0, 0];
        let volumes = [10, 30, 0, 0, 0];
        assert_eq!(weighted_average_price(&prices, &volumes), Ok(10375));
    }

    #[test]
    fn test_weighted_average_zero_volume_rejected() {
        assert!(matches!(
            weighted_average_price(&[10000, 10100], &[0, 0]),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            weighted_average_price(&[], &[]),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_weighted_average_length_mismatch_rejected() {
        assert!(matches!(
            weighted_average_price(&[10000], &[1, 2]),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
