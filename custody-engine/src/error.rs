use rust_decimal::Decimal;
use strands::{Address, AssetError, MarketError, OptionType, PositionId, StrikeId};
use thiserror::Error;

/// Every way a custody operation can be refused.
///
/// A returned error always means the operation had no effect.
#[derive(Error, Debug)]
pub enum StrandsError {
    /// The strike is not listed under any live board.
    #[error("Strike {0} is not live")]
    StrikeNotLive(StrikeId),

    #[error("Straddle amount must be greater than zero")]
    ZeroAmount,

    #[error("Collateral for {amount} at strike price {strike_price} overflows")]
    CollateralOverflow { strike_price: Decimal, amount: Decimal },

    /// The payer's balance or allowance did not cover the collateral.
    #[error("Collateral pull failed: {0}")]
    CollateralPullFailed(#[source] AssetError),

    /// The market rejected one of the straddle legs.
    #[error("Market rejected {option_type} open: {source}")]
    UpstreamOpenFailed {
        option_type: OptionType,
        #[source]
        source: MarketError,
    },

    /// A read against the market failed while checking preconditions.
    #[error("Market query failed: {0}")]
    MarketQueryFailed(#[source] MarketError),

    #[error("{caller} is not the beneficiary of position {position_id}")]
    UnauthorizedRelease {
        position_id: PositionId,
        caller: Address,
    },

    #[error("Position {position_id} cannot be released to the ledger itself")]
    ReleaseToLedger { position_id: PositionId },

    /// The recipient carries code that does not accept position tokens.
    #[error("Not a valid IERC721Receiver address: {0}")]
    IncompatibleRecipient(Address),

    #[error("Position transfer failed: {0}")]
    TransferFailed(#[source] MarketError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StrandsError>;
