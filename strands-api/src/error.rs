use crate::model::address::Address;
use crate::model::market::{BoardId, StrikeId};
use crate::model::position::PositionId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures reported by an Options Market or its position-token ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Board {0} does not exist")]
    UnknownBoard(BoardId),

    #[error("Strike {0} does not exist")]
    UnknownStrike(StrikeId),

    #[error("Position {0} does not exist")]
    UnknownPosition(PositionId),

    /// The strike exists but its board is no longer live.
    #[error("Strike {0} is not listed on a live board")]
    StrikeNotListed(StrikeId),

    #[error("Invalid trade amount {0}")]
    InvalidAmount(Decimal),

    #[error("Total cost {cost} outside of bounds [{min}, {max:?}]")]
    TotalCostOutsideBounds {
        cost: Decimal,
        min: Decimal,
        max: Option<Decimal>,
    },

    #[error("{operator} is neither owner nor approved for position {position_id}")]
    NotOwnerNorApproved {
        operator: Address,
        position_id: PositionId,
    },

    /// An adjustment named a position on another strike or of another type.
    #[error("Position {0} does not match the requested strike and option type")]
    PositionMismatch(PositionId),

    #[error("Position {0} is not active")]
    PositionNotActive(PositionId),

    #[error("Cannot transfer position {0} to the zero address")]
    TransferToZeroAddress(PositionId),

    /// The recipient carries code whose receive hook refused the token.
    #[error("Transfer to non ERC721Receiver implementer {0}")]
    NonReceiver(Address),
}

/// Failures reported by the stable-asset collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("{owner} balance {available} is below {required}")]
    InsufficientBalance {
        owner: Address,
        available: Decimal,
        required: Decimal,
    },

    #[error("{spender} allowance from {owner} is {available}, needs {required}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        available: Decimal,
        required: Decimal,
    },
}
