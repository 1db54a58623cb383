use crate::error::MarketError;
use crate::model::address::Address;
use crate::model::position::{PositionId, PositionRecord};
use crate::traits::receiver::ContractDirectory;

/// Non-fungible ledger of position tokens: unique ids, one owner each.
pub trait PositionToken {
    /// Number of position tokens held by `owner`.
    fn balance_of(&self, owner: Address) -> u64;

    /// Current holder of `id`.
    fn owner_of(&self, id: PositionId) -> Result<Address, MarketError>;

    /// The market's record for `id`.
    fn position(&self, id: PositionId) -> Result<PositionRecord, MarketError>;

    /// Moves `id` from `from` to `to`, initiated by `operator`.
    ///
    /// Fails without side effects if `operator` may not move the token, if
    /// `from` is not the holder, or if the position is no longer transferable.
    fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        id: PositionId,
    ) -> Result<(), MarketError>;

    /// Like `transfer_from`, but a contract-like `to` found in `receivers`
    /// must accept the token through its receive hook, which is passed
    /// `operator`, `from`, `id` and `data`.
    fn safe_transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        id: PositionId,
        data: &[u8],
        receivers: &dyn ContractDirectory,
    ) -> Result<(), MarketError>;
}
