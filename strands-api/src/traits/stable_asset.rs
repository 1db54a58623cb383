use crate::error::AssetError;
use crate::model::address::Address;
use rust_decimal::Decimal;

/// Allowance-gated fungible asset used to pay for straddles.
pub trait StableAsset {
    fn balance_of(&self, owner: Address) -> Decimal;

    fn allowance(&self, owner: Address, spender: Address) -> Decimal;

    /// Lets `spender` pull up to `amount` from `owner`. Overwrites any
    /// previous allowance.
    fn approve(&mut self, owner: Address, spender: Address, amount: Decimal);

    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<(), AssetError>;
}
