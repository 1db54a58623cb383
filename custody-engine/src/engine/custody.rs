use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strands::{Address, PositionId};

/// Beneficiary registry for positions held by the ledger.
///
/// An id is present exactly while the ledger holds its token. Each id maps to
/// a single beneficiary; there is no shared custody.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustodyBook {
    records: BTreeMap<PositionId, Address>,
}

impl CustodyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Beneficiary of `id`, or `Address::ZERO` when the id is not custodied.
    pub fn beneficiary_of(&self, id: PositionId) -> Address {
        self.records.get(&id).copied().unwrap_or(Address::ZERO)
    }

    pub fn contains(&self, id: PositionId) -> bool {
        self.records.contains_key(&id)
    }

    /// Records `beneficiary` for `id`. Returns the previous beneficiary, if any.
    pub fn assign(&mut self, id: PositionId, beneficiary: Address) -> Option<Address> {
        self.records.insert(id, beneficiary)
    }

    /// Clears the record for `id`, returning who it belonged to.
    pub fn release(&mut self, id: PositionId) -> Option<Address> {
        self.records.remove(&id)
    }

    /// Ids held for `beneficiary`, ascending.
    pub fn held_for(&self, beneficiary: Address) -> Vec<PositionId> {
        self.records
            .iter()
            .filter(|(_, owner)| **owner == beneficiary)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PositionId, &Address)> {
        self.records.iter()
    }
}
