use std::collections::HashMap;
use strands::{Address, ContractDirectory, TokenReceiver};

/// Registry of contract-like accounts and the receiver code they run.
///
/// Any address not deployed here is treated as a plain account.
#[derive(Default)]
pub struct Deployments {
    contracts: HashMap<Address, Box<dyn TokenReceiver>>,
}

impl Deployments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `code` at `address`, replacing whatever was there.
    pub fn deploy(&mut self, address: Address, code: Box<dyn TokenReceiver>) {
        self.contracts.insert(address, code);
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl ContractDirectory for Deployments {
    fn code_at(&self, address: Address) -> Option<&dyn TokenReceiver> {
        self.contracts.get(&address).map(|code| code.as_ref())
    }
}
