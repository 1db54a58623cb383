pub mod error;
pub mod model;
pub mod traits;

pub use error::{AssetError, MarketError};
pub use model::address::{Address, ParseAddressError};
pub use model::market::{BoardId, Strike, StrikeId};
pub use model::position::{
    OpenPositionParams, OptionType, PositionId, PositionRecord, PositionState, TradeResult,
};

pub use traits::checkpoint::Checkpoint;
pub use traits::option_market::OptionMarket;
pub use traits::position_token::PositionToken;
pub use traits::receiver::{ContractDirectory, Selector, TokenReceiver, ERC721_RECEIVED};
pub use traits::stable_asset::StableAsset;

