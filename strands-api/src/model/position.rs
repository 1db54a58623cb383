//! Option positions and the requests that open them.

use crate::model::market::StrikeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position token id. Assigned by the market, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of option held by a position. Declaration order matches the
/// market's wire ordinals (`LongCall = 0` .. `ShortPutQuote = 4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    LongCall,
    LongPut,
    ShortCallBase,
    ShortCallQuote,
    ShortPutQuote,
}

impl OptionType {
    pub fn is_long(&self) -> bool {
        matches!(self, OptionType::LongCall | OptionType::LongPut)
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OptionType::LongCall => "LONG_CALL",
            OptionType::LongPut => "LONG_PUT",
            OptionType::ShortCallBase => "SHORT_CALL_BASE",
            OptionType::ShortCallQuote => "SHORT_CALL_QUOTE",
            OptionType::ShortPutQuote => "SHORT_PUT_QUOTE",
        };
        f.write_str(label)
    }
}

/// Lifecycle state of a position. Only `Active` positions are transferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionState {
    Empty,
    Active,
    Closed,
    Liquidated,
    Settled,
    Merged,
}

/// The market's record for a single position token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub position_id: PositionId,
    pub strike_id: StrikeId,
    pub option_type: OptionType,
    pub amount: Decimal,
    pub collateral: Decimal,
    pub state: PositionState,
}

/// Arguments of an open request.
///
/// `position_id: None` asks the market to mint a new position.
/// `max_total_cost: None` leaves the upper price bound open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPositionParams {
    pub strike_id: StrikeId,
    pub position_id: Option<PositionId>,
    pub option_type: OptionType,
    pub amount: Decimal,
    pub set_collateral_to: Decimal,
    pub iterations: u32,
    pub min_total_cost: Decimal,
    pub max_total_cost: Option<Decimal>,
}

impl OpenPositionParams {
    /// A request for a brand new, uncollateralised position with no price bounds.
    pub fn open_new(strike_id: StrikeId, option_type: OptionType, amount: Decimal) -> Self {
        Self {
            strike_id,
            position_id: None,
            option_type,
            amount,
            set_collateral_to: Decimal::ZERO,
            iterations: 1,
            min_total_cost: Decimal::ZERO,
            max_total_cost: None,
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_cost_bounds(mut self, min: Decimal, max: Option<Decimal>) -> Self {
        self.min_total_cost = min;
        self.max_total_cost = max;
        self
    }
}

/// Outcome of a successful open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub position_id: PositionId,
    pub total_cost: Decimal,
    pub total_fee: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_option_type_ordinals() {
        assert_eq!(OptionType::LongCall.ordinal(), 0);
        assert_eq!(OptionType::LongPut.ordinal(), 1);
        assert_eq!(OptionType::ShortPutQuote.ordinal(), 4);
        assert!(OptionType::LongPut.is_long());
        assert!(!OptionType::ShortCallBase.is_long());
    }

    #[test]
    fn test_open_new_defaults() {
        let params = OpenPositionParams::open_new(StrikeId(3), OptionType::LongCall, dec!(1))
            .with_iterations(4)
            .with_cost_bounds(dec!(0), Some(dec!(250)));

        assert_eq!(params.position_id, None);
        assert_eq!(params.set_collateral_to, Decimal::ZERO);
        assert_eq!(params.iterations, 4);
        assert_eq!(params.max_total_cost, Some(dec!(250)));
    }
}
