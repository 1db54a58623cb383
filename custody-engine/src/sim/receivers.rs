//! Receiver code for contract-like recipients.

use strands::{Address, PositionId, Selector, TokenReceiver, ERC721_RECEIVED};

/// Implements the receive hook correctly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptingReceiver;

/// Implements the receive hook but answers with the wrong selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingReceiver;

/// Contract code without any receive hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonReceiver;

impl TokenReceiver for AcceptingReceiver {
    fn on_erc721_received(
        &self,
        _operator: Address,
        _from: Address,
        _id: PositionId,
        _data: &[u8],
    ) -> Option<Selector> {
        Some(ERC721_RECEIVED)
    }
}

impl TokenReceiver for RejectingReceiver {
    fn on_erc721_received(
        &self,
        _operator: Address,
        _from: Address,
        _id: PositionId,
        _data: &[u8],
    ) -> Option<Selector> {
        Some([0xde, 0xad, 0xbe, 0xef])
    }
}

impl TokenReceiver for NonReceiver {
    fn on_erc721_received(
        &self,
        _operator: Address,
        _from: Address,
        _id: PositionId,
        _data: &[u8],
    ) -> Option<Selector> {
        None
    }
}
