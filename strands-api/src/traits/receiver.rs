//! Receiver capability for position tokens.
//!
//! A contract-like account may only be handed a position if it declares that
//! it can hold one: its receive hook must answer with `ERC721_RECEIVED`.
//! Plain accounts have no code and are always acceptable.

use crate::model::address::Address;
use crate::model::position::PositionId;

/// Four-byte function selector returned by receive hooks.
pub type Selector = [u8; 4];

/// Selector of `onERC721Received(address,address,uint256,bytes)`.
pub const ERC721_RECEIVED: Selector = [0x15, 0x0b, 0x7a, 0x02];

/// Code running at a contract-like address that may receive positions.
pub trait TokenReceiver {
    /// Called when a position token is moved to this account.
    ///
    /// # Arguments
    ///
    /// * `operator` - The account that initiated the transfer.
    /// * `from` - The previous holder.
    /// * `id` - The transferred position.
    /// * `data` - Opaque payload forwarded by the operator.
    ///
    /// # Returns
    ///
    /// * `Option<Selector>` - `None` when the code has no receive hook at all,
    ///   otherwise the value it answered with.
    fn on_erc721_received(
        &self,
        operator: Address,
        from: Address,
        id: PositionId,
        data: &[u8],
    ) -> Option<Selector>;
}

impl TokenReceiver for Box<dyn TokenReceiver> {
    fn on_erc721_received(
        &self,
        operator: Address,
        from: Address,
        id: PositionId,
        data: &[u8],
    ) -> Option<Selector> {
        (**self).on_erc721_received(operator, from, id, data)
    }
}

/// The host's view of which addresses carry code.
pub trait ContractDirectory {
    /// Receiver code deployed at `address`, or `None` for a plain account.
    fn code_at(&self, address: Address) -> Option<&dyn TokenReceiver>;

    /// Whether `to` may be handed position `id`.
    ///
    /// Plain accounts always may. Contract-like accounts must answer their
    /// receive hook with `ERC721_RECEIVED`.
    fn accepts(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        id: PositionId,
        data: &[u8],
    ) -> bool {
        match self.code_at(to) {
            None => true,
            Some(code) => code.on_erc721_received(operator, from, id, data) == Some(ERC721_RECEIVED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Fixed(Option<Selector>);

    impl TokenReceiver for Fixed {
        fn on_erc721_received(&self, _: Address, _: Address, _: PositionId, _: &[u8]) -> Option<Selector> {
            self.0
        }
    }

    struct Registry(HashMap<Address, Fixed>);

    impl ContractDirectory for Registry {
        fn code_at(&self, address: Address) -> Option<&dyn TokenReceiver> {
            self.0.get(&address).map(|code| code as &dyn TokenReceiver)
        }
    }

    #[test]
    fn test_accepts_plain_accounts_and_valid_hooks() {
        let good = Address::from_low_u64(1);
        let wrong = Address::from_low_u64(2);
        let silent = Address::from_low_u64(3);
        let plain = Address::from_low_u64(4);
        let registry = Registry(HashMap::from([
            (good, Fixed(Some(ERC721_RECEIVED))),
            (wrong, Fixed(Some([0, 0, 0, 0]))),
            (silent, Fixed(None)),
        ]));
        let op = Address::from_low_u64(9);

        assert!(registry.accepts(op, op, good, PositionId(1), &[]));
        assert!(registry.accepts(op, op, plain, PositionId(1), &[]));
        assert!(!registry.accepts(op, op, wrong, PositionId(1), &[]));
        assert!(!registry.accepts(op, op, silent, PositionId(1), &[]));
    }
}
