use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use strands::{
    Address, BoardId, Checkpoint, ContractDirectory, MarketError, OpenPositionParams, OptionMarket, OptionType,
    PositionId, PositionRecord, PositionState, PositionToken, Strike, StrikeId, TradeResult,
};

#[derive(Debug, Clone)]
struct Board {
    live: bool,
    strikes: Vec<StrikeId>,
}

#[derive(Debug, Clone)]
struct MarketState {
    boards: BTreeMap<BoardId, Board>,
    strikes: BTreeMap<StrikeId, Strike>,
    positions: BTreeMap<PositionId, PositionRecord>,
    owners: BTreeMap<PositionId, Address>,
    next_board_id: u64,
    next_strike_id: u64,
    next_position_id: u64,
}

impl Default for MarketState {
    fn default() -> Self {
        Self {
            boards: BTreeMap::new(),
            strikes: BTreeMap::new(),
            positions: BTreeMap::new(),
            owners: BTreeMap::new(),
            next_board_id: 1,
            next_strike_id: 1,
            next_position_id: 1,
        }
    }
}

/// Options market with a flat premium model.
///
/// Every unit costs `strike_price * premium_rate`, plus `fee_rate` of that
/// cost. Opens mint position tokens directly to the caller.
pub struct SimulatedMarket {
    address: Address,
    premium_rate: Decimal,
    fee_rate: Decimal,
    state: MarketState,
    checkpoints: Vec<MarketState>,
}

impl SimulatedMarket {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            premium_rate: Decimal::ZERO,
            fee_rate: Decimal::ZERO,
            state: MarketState::default(),
            checkpoints: Vec::new(),
        }
    }

    pub fn with_premium_rate(mut self, rate: Decimal) -> Self {
        self.premium_rate = rate;
        self
    }

    pub fn with_fee_rate(mut self, rate: Decimal) -> Self {
        self.fee_rate = rate;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Lists a new, live board with no strikes.
    pub fn add_board(&mut self) -> BoardId {
        let id = BoardId(self.state.next_board_id);
        self.state.next_board_id += 1;
        self.state.boards.insert(
            id,
            Board {
                live: true,
                strikes: Vec::new(),
            },
        );
        id
    }

    pub fn add_strike(
        &mut self,
        board: BoardId,
        strike_price: Decimal,
    ) -> Result<StrikeId, MarketError> {
        let id = StrikeId(self.state.next_strike_id);
        let entry = self
            .state
            .boards
            .get_mut(&board)
            .ok_or(MarketError::UnknownBoard(board))?;
        entry.strikes.push(id);
        self.state.next_strike_id += 1;
        self.state
            .strikes
            .insert(id, Strike::new(id, board, strike_price));
        Ok(id)
    }

    /// Takes a board off the live listing. Its strikes stay queryable.
    pub fn expire_board(&mut self, board: BoardId) -> Result<(), MarketError> {
        let entry = self
            .state
            .boards
            .get_mut(&board)
            .ok_or(MarketError::UnknownBoard(board))?;
        entry.live = false;
        Ok(())
    }

    /// Moves a position to `state`, standing in for the market's own
    /// settlement, close and liquidation flows.
    pub fn set_position_state(
        &mut self,
        id: PositionId,
        state: PositionState,
    ) -> Result<(), MarketError> {
        let record = self
            .state
            .positions
            .get_mut(&id)
            .ok_or(MarketError::UnknownPosition(id))?;
        record.state = state;
        Ok(())
    }

    fn check_transfer(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        id: PositionId,
    ) -> Result<(), MarketError> {
        let owner = self.owner_of(id)?;
        if to.is_zero() {
            return Err(MarketError::TransferToZeroAddress(id));
        }
        if owner != from || operator != owner {
            return Err(MarketError::NotOwnerNorApproved {
                operator,
                position_id: id,
            });
        }
        if self.position(id)?.state != PositionState::Active {
            return Err(MarketError::PositionNotActive(id));
        }
        Ok(())
    }

    fn quote(&self, strike: &Strike, amount: Decimal) -> Result<(Decimal, Decimal), MarketError> {
        let cost = strike
            .strike_price
            .checked_mul(self.premium_rate)
            .and_then(|unit| unit.checked_mul(amount))
            .ok_or(MarketError::InvalidAmount(amount))?;
        let fee = cost
            .checked_mul(self.fee_rate)
            .ok_or(MarketError::InvalidAmount(amount))?;
        Ok((cost, fee))
    }

    fn is_listed(&self, strike: &Strike) -> bool {
        self.state
            .boards
            .get(&strike.board_id)
            .is_some_and(|board| board.live)
    }
}

fn add_open_interest(strike: &mut Strike, option_type: OptionType, amount: Decimal) {
    let bucket = match option_type {
        OptionType::LongCall => &mut strike.long_call,
        OptionType::LongPut => &mut strike.long_put,
        OptionType::ShortCallBase => &mut strike.short_call_base,
        OptionType::ShortCallQuote => &mut strike.short_call_quote,
        OptionType::ShortPutQuote => &mut strike.short_put,
    };
    *bucket += amount;
}

impl OptionMarket for SimulatedMarket {
    fn live_boards(&self) -> Vec<BoardId> {
        self.state
            .boards
            .iter()
            .filter(|(_, board)| board.live)
            .map(|(id, _)| *id)
            .collect()
    }

    fn board_strikes(&self, board: BoardId) -> Result<Vec<StrikeId>, MarketError> {
        self.state
            .boards
            .get(&board)
            .map(|b| b.strikes.clone())
            .ok_or(MarketError::UnknownBoard(board))
    }

    fn strike(&self, id: StrikeId) -> Result<Strike, MarketError> {
        self.state
            .strikes
            .get(&id)
            .cloned()
            .ok_or(MarketError::UnknownStrike(id))
    }

    fn open_position(
        &mut self,
        caller: Address,
        params: OpenPositionParams,
        receivers: &dyn ContractDirectory,
    ) -> Result<TradeResult, MarketError> {
        if params.amount <= Decimal::ZERO {
            return Err(MarketError::InvalidAmount(params.amount));
        }

        let strike = self.strike(params.strike_id)?;
        if !self.is_listed(&strike) {
            return Err(MarketError::StrikeNotListed(params.strike_id));
        }

        if let Some(id) = params.position_id {
            let record = self.position(id)?;
            if self.owner_of(id)? != caller {
                return Err(MarketError::NotOwnerNorApproved {
                    operator: caller,
                    position_id: id,
                });
            }
            if record.state != PositionState::Active {
                return Err(MarketError::PositionNotActive(id));
            }
            if record.strike_id != params.strike_id || record.option_type != params.option_type {
                return Err(MarketError::PositionMismatch(id));
            }
        }

        let (cost, fee) = self.quote(&strike, params.amount)?;
        let total = cost
            .checked_add(fee)
            .ok_or(MarketError::InvalidAmount(params.amount))?;
        let above_max = params.max_total_cost.is_some_and(|max| total > max);
        if total < params.min_total_cost || above_max {
            return Err(MarketError::TotalCostOutsideBounds {
                cost: total,
                min: params.min_total_cost,
                max: params.max_total_cost,
            });
        }

        if params.position_id.is_none() {
            let minted = PositionId(self.state.next_position_id);
            if !receivers.accepts(self.address, Address::ZERO, caller, minted, &[]) {
                return Err(MarketError::NonReceiver(caller));
            }
        }

        if let Some(live) = self.state.strikes.get_mut(&params.strike_id) {
            add_open_interest(live, params.option_type, params.amount);
        }

        let position_id = match params.position_id {
            Some(id) => {
                if let Some(record) = self.state.positions.get_mut(&id) {
                    record.amount += params.amount;
                    record.collateral = params.set_collateral_to;
                }
                id
            }
            None => {
                let id = PositionId(self.state.next_position_id);
                self.state.next_position_id += 1;
                self.state.positions.insert(
                    id,
                    PositionRecord {
                        position_id: id,
                        strike_id: params.strike_id,
                        option_type: params.option_type,
                        amount: params.amount,
                        collateral: params.set_collateral_to,
                        state: PositionState::Active,
                    },
                );
                self.state.owners.insert(id, caller);
                id
            }
        };

        debug!(
            "Opened {} x{} on strike {} as position {} for {} (cost {}, fee {}, {} iterations)",
            params.option_type,
            params.amount,
            params.strike_id,
            position_id,
            caller,
            cost,
            fee,
            params.iterations
        );

        Ok(TradeResult {
            position_id,
            total_cost: total,
            total_fee: fee,
        })
    }
}

impl PositionToken for SimulatedMarket {
    fn balance_of(&self, owner: Address) -> u64 {
        self.state
            .owners
            .values()
            .filter(|holder| **holder == owner)
            .count() as u64
    }

    fn owner_of(&self, id: PositionId) -> Result<Address, MarketError> {
        self.state
            .owners
            .get(&id)
            .copied()
            .ok_or(MarketError::UnknownPosition(id))
    }

    fn position(&self, id: PositionId) -> Result<PositionRecord, MarketError> {
        self.state
            .positions
            .get(&id)
            .cloned()
            .ok_or(MarketError::UnknownPosition(id))
    }

    fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        id: PositionId,
    ) -> Result<(), MarketError> {
        self.check_transfer(operator, from, to, id)?;
        self.state.owners.insert(id, to);
        Ok(())
    }

    fn safe_transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        id: PositionId,
        data: &[u8],
        receivers: &dyn ContractDirectory,
    ) -> Result<(), MarketError> {
        self.check_transfer(operator, from, to, id)?;
        if !receivers.accepts(operator, from, to, id, data) {
            return Err(MarketError::NonReceiver(to));
        }
        self.state.owners.insert(id, to);
        Ok(())
    }
}

impl Checkpoint for SimulatedMarket {
    fn checkpoint(&mut self) {
        self.checkpoints.push(self.state.clone());
    }

    fn commit(&mut self) {
        self.checkpoints.pop();
    }

    fn rollback(&mut self) {
        if let Some(saved) = self.checkpoints.pop() {
            self.state = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AcceptingReceiver, Deployments, RejectingReceiver};
    use rust_decimal_macros::dec;

    fn trader() -> Address {
        Address::from_low_u64(1)
    }

    fn plain() -> Deployments {
        Deployments::new()
    }

    fn market_with_strike() -> (SimulatedMarket, StrikeId) {
        let mut market = SimulatedMarket::new(Address::from_low_u64(0x0a)).with_premium_rate(dec!(0.1));
        let board = market.add_board();
        let strike = market.add_strike(board, dec!(1500)).unwrap();
        (market, strike)
    }

    #[test]
    fn test_open_position_mints_and_tracks_interest() {
        let (mut market, strike_id) = market_with_strike();

        let strike = market.strike(strike_id).unwrap();
        assert_eq!(strike.long_call, Decimal::ZERO);
        assert_eq!(market.balance_of(trader()), 0);

        let result = market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
                &plain(),
            )
            .unwrap();

        assert_eq!(result.position_id, PositionId(1));
        assert_eq!(result.total_cost, dec!(150));
        assert_eq!(market.strike(strike_id).unwrap().long_call, dec!(1));
        assert_eq!(market.balance_of(trader()), 1);

        let record = market.position(PositionId(1)).unwrap();
        assert_eq!(record.strike_id, strike_id);
        assert_eq!(record.option_type, OptionType::LongCall);
        assert_eq!(record.amount, dec!(1));
        assert_eq!(record.collateral, Decimal::ZERO);
        assert_eq!(record.state, PositionState::Active);
    }

    #[test]
    fn test_cost_bounds_are_enforced() {
        let (mut market, strike_id) = market_with_strike();
        let params = OpenPositionParams::open_new(strike_id, OptionType::LongPut, dec!(1))
            .with_cost_bounds(Decimal::ZERO, Some(dec!(100)));

        let result = market.open_position(trader(), params, &plain());
        assert!(matches!(
            result,
            Err(MarketError::TotalCostOutsideBounds { .. })
        ));
        assert_eq!(market.strike(strike_id).unwrap().long_put, Decimal::ZERO);
        assert_eq!(market.balance_of(trader()), 0);
    }

    #[test]
    fn test_expired_board_rejects_opens() {
        let (mut market, strike_id) = market_with_strike();
        market.expire_board(BoardId(1)).unwrap();

        assert!(market.live_boards().is_empty());
        let result = market.open_position(
            trader(),
            OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
            &plain(),
        );
        assert_eq!(result, Err(MarketError::StrikeNotListed(strike_id)));
    }

    #[test]
    fn test_adjusting_existing_position() {
        let (mut market, strike_id) = market_with_strike();
        let first = market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
                &plain(),
            )
            .unwrap();

        let mut params = OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(2));
        params.position_id = Some(first.position_id);
        let second = market.open_position(trader(), params, &plain()).unwrap();

        assert_eq!(second.position_id, first.position_id);
        assert_eq!(market.position(first.position_id).unwrap().amount, dec!(3));
        assert_eq!(market.balance_of(trader()), 1);

        let mut wrong = OpenPositionParams::open_new(strike_id, OptionType::LongPut, dec!(1));
        wrong.position_id = Some(first.position_id);
        assert_eq!(
            market.open_position(trader(), wrong, &plain()),
            Err(MarketError::PositionMismatch(first.position_id))
        );
    }

    #[test]
    fn test_transfer_requires_owner_and_active_state() {
        let (mut market, strike_id) = market_with_strike();
        let id = market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
                &plain(),
            )
            .unwrap()
            .position_id;
        let other = Address::from_low_u64(2);

        assert!(matches!(
            market.transfer_from(other, trader(), other, id),
            Err(MarketError::NotOwnerNorApproved { .. })
        ));
        assert_eq!(
            market.transfer_from(trader(), trader(), Address::ZERO, id),
            Err(MarketError::TransferToZeroAddress(id))
        );

        market.set_position_state(id, PositionState::Settled).unwrap();
        assert_eq!(
            market.transfer_from(trader(), trader(), other, id),
            Err(MarketError::PositionNotActive(id))
        );

        market.set_position_state(id, PositionState::Active).unwrap();
        market.transfer_from(trader(), trader(), other, id).unwrap();
        assert_eq!(market.owner_of(id).unwrap(), other);
        assert_eq!(market.balance_of(trader()), 0);
    }

    #[test]
    fn test_rollback_restores_state() {
        let (mut market, strike_id) = market_with_strike();
        market.checkpoint();
        market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
                &plain(),
            )
            .unwrap();
        market.rollback();

        assert_eq!(market.strike(strike_id).unwrap().long_call, Decimal::ZERO);
        assert_eq!(market.balance_of(trader()), 0);

        // Ids restart where they were before the checkpoint.
        let result = market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
                &plain(),
            )
            .unwrap();
        assert_eq!(result.position_id, PositionId(1));
    }

    #[test]
    fn test_mint_runs_receive_hook() {
        let (mut market, strike_id) = market_with_strike();
        let mut receivers = Deployments::new();
        receivers.deploy(trader(), Box::new(RejectingReceiver));

        let result = market.open_position(
            trader(),
            OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
            &receivers,
        );
        assert_eq!(result, Err(MarketError::NonReceiver(trader())));
        assert_eq!(market.strike(strike_id).unwrap().long_call, Decimal::ZERO);
        assert_eq!(market.balance_of(trader()), 0);

        receivers.deploy(trader(), Box::new(AcceptingReceiver));
        let minted = market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongCall, dec!(1)),
                &receivers,
            )
            .unwrap();
        assert_eq!(minted.position_id, PositionId(1));
    }

    #[test]
    fn test_safe_transfer_runs_receive_hook() {
        let (mut market, strike_id) = market_with_strike();
        let id = market
            .open_position(
                trader(),
                OpenPositionParams::open_new(strike_id, OptionType::LongPut, dec!(1)),
                &plain(),
            )
            .unwrap()
            .position_id;
        let vault = Address::from_low_u64(20);
        let refuser = Address::from_low_u64(21);
        let mut receivers = Deployments::new();
        receivers.deploy(vault, Box::new(AcceptingReceiver));
        receivers.deploy(refuser, Box::new(RejectingReceiver));

        assert_eq!(
            market.safe_transfer_from(trader(), trader(), refuser, id, &[], &receivers),
            Err(MarketError::NonReceiver(refuser))
        );
        assert_eq!(market.owner_of(id).unwrap(), trader());

        market
            .safe_transfer_from(trader(), trader(), vault, id, b"", &receivers)
            .unwrap();
        assert_eq!(market.owner_of(id).unwrap(), vault);
    }
}
