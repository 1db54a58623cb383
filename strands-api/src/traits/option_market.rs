use crate::error::MarketError;
use crate::model::address::Address;
use crate::model::market::{BoardId, Strike, StrikeId};
use crate::model::position::{OpenPositionParams, TradeResult};
use crate::traits::position_token::PositionToken;
use crate::traits::receiver::ContractDirectory;

/// Interface of the Options Market the ledger trades against.
///
/// The market owns listings, pricing and open interest. Opening a position
/// mints a token to `caller` on the market's own `PositionToken` ledger.
pub trait OptionMarket: PositionToken {
    /// Ids of the boards currently open for trading.
    fn live_boards(&self) -> Vec<BoardId>;

    /// Ids of the strikes listed under `board`.
    fn board_strikes(&self, board: BoardId) -> Result<Vec<StrikeId>, MarketError>;

    /// Current snapshot of a strike, including open interest.
    fn strike(&self, id: StrikeId) -> Result<Strike, MarketError>;

    /// Opens (or adjusts) a position on behalf of `caller`.
    ///
    /// # Arguments
    ///
    /// * `caller` - The account that will own a newly minted position.
    /// * `params` - Trade request. `iterations` and the cost bounds are
    ///   interpreted by the market only.
    /// * `receivers` - Code lookup used to run `caller`'s receive hook when a
    ///   new token is minted to it.
    ///
    /// # Returns
    ///
    /// * `Result<TradeResult, MarketError>` - The resulting position id and cost.
    fn open_position(
        &mut self,
        caller: Address,
        params: OpenPositionParams,
        receivers: &dyn ContractDirectory,
    ) -> Result<TradeResult, MarketError>;
}
