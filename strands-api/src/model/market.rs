//! Board and strike listings as reported by the Options Market.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a board, i.e. a group of strikes sharing an expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardId(pub u64);

/// Identifies a strike listing under a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrikeId(pub u64);

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StrikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a strike and its aggregate open interest.
///
/// Owned and mutated by the market only; consumers get copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub id: StrikeId,
    pub board_id: BoardId,
    pub strike_price: Decimal,
    pub long_call: Decimal,
    pub long_put: Decimal,
    pub short_call_base: Decimal,
    pub short_call_quote: Decimal,
    pub short_put: Decimal,
}

impl Strike {
    /// A freshly listed strike with no open interest.
    pub fn new(id: StrikeId, board_id: BoardId, strike_price: Decimal) -> Self {
        Self {
            id,
            board_id,
            strike_price,
            long_call: Decimal::ZERO,
            long_put: Decimal::ZERO,
            short_call_base: Decimal::ZERO,
            short_call_quote: Decimal::ZERO,
            short_put: Decimal::ZERO,
        }
    }

    /// Total short call open interest, whichever asset collateralises it.
    pub fn short_call(&self) -> Decimal {
        self.short_call_base + self.short_call_quote
    }
}
