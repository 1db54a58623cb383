use rust_decimal::Decimal;
use std::collections::BTreeMap;
use strands::{Address, AssetError, Checkpoint, StableAsset};

#[derive(Debug, Clone, Default)]
struct Ledger {
    balances: BTreeMap<Address, Decimal>,
    allowances: BTreeMap<(Address, Address), Decimal>,
}

/// Fungible test asset with ERC-20 style allowances.
pub struct SimulatedStable {
    address: Address,
    ledger: Ledger,
    checkpoints: Vec<Ledger>,
}

impl SimulatedStable {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            ledger: Ledger::default(),
            checkpoints: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Credits `amount` to `to` out of thin air.
    pub fn mint(&mut self, to: Address, amount: Decimal) {
        *self.ledger.balances.entry(to).or_insert(Decimal::ZERO) += amount;
    }

    pub fn total_supply(&self) -> Decimal {
        self.ledger.balances.values().copied().sum()
    }
}

impl StableAsset for SimulatedStable {
    fn balance_of(&self, owner: Address) -> Decimal {
        self.ledger
            .balances
            .get(&owner)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn allowance(&self, owner: Address, spender: Address) -> Decimal {
        self.ledger
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: Decimal) {
        self.ledger.allowances.insert((owner, spender), amount);
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<(), AssetError> {
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(AssetError::InsufficientAllowance {
                owner: from,
                spender,
                available: allowance,
                required: amount,
            });
        }

        let balance = self.balance_of(from);
        if balance < amount {
            return Err(AssetError::InsufficientBalance {
                owner: from,
                available: balance,
                required: amount,
            });
        }

        self.ledger
            .allowances
            .insert((from, spender), allowance - amount);
        self.ledger.balances.insert(from, balance - amount);
        *self.ledger.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }
}

impl Checkpoint for SimulatedStable {
    fn checkpoint(&mut self) {
        self.checkpoints.push(self.ledger.clone());
    }

    fn commit(&mut self) {
        self.checkpoints.pop();
    }

    fn rollback(&mut self) {
        if let Some(saved) = self.checkpoints.pop() {
            self.ledger = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup() -> (SimulatedStable, Address, Address) {
        let owner = Address::from_low_u64(1);
        let spender = Address::from_low_u64(2);
        let mut stable = SimulatedStable::new(Address::from_low_u64(0x5d));
        stable.mint(owner, dec!(1000));
        (stable, owner, spender)
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let (mut stable, owner, spender) = setup();
        stable.approve(owner, spender, dec!(600));

        stable.transfer_from(spender, owner, spender, dec!(400)).unwrap();

        assert_eq!(stable.balance_of(owner), dec!(600));
        assert_eq!(stable.balance_of(spender), dec!(400));
        assert_eq!(stable.allowance(owner, spender), dec!(200));
        assert_eq!(stable.total_supply(), dec!(1000));
    }

    #[test]
    fn test_allowance_checked_before_balance() {
        let (mut stable, owner, spender) = setup();

        let err = stable
            .transfer_from(spender, owner, spender, dec!(5000))
            .unwrap_err();
        assert!(matches!(err, AssetError::InsufficientAllowance { .. }));

        stable.approve(owner, spender, dec!(5000));
        let err = stable
            .transfer_from(spender, owner, spender, dec!(5000))
            .unwrap_err();
        assert!(matches!(err, AssetError::InsufficientBalance { .. }));
        assert_eq!(stable.balance_of(owner), dec!(1000));
    }

    #[test]
    fn test_rollback_restores_balances() {
        let (mut stable, owner, spender) = setup();
        stable.approve(owner, spender, dec!(100));

        stable.checkpoint();
        stable.transfer_from(spender, owner, spender, dec!(100)).unwrap();
        stable.rollback();

        assert_eq!(stable.balance_of(owner), dec!(1000));
        assert_eq!(stable.allowance(owner, spender), dec!(100));
    }
}
