use crate::config::StrandsConfig;
use crate::error::{Result, StrandsError};
use crate::journal::{CustodyEvent, CustodyEventKind, CustodyJournal};
use crate::release_guard::{ReleaseContext, ReleaseGuard};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strands::{
    Address, Checkpoint, ContractDirectory, OpenPositionParams, OptionMarket, OptionType,
    PositionId, Selector, StableAsset, Strike, StrikeId, TokenReceiver, TradeResult,
    ERC721_RECEIVED,
};

pub mod custody;

pub use custody::CustodyBook;

/// Addresses fixed when the ledger is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub ledger: Address,
    pub stable_coin: Address,
    pub option_token: Address,
    pub option_market: Address,
}

/// Both legs of a purchased straddle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Straddle {
    pub strike_id: StrikeId,
    pub amount: Decimal,
    /// Stable asset pulled from the payer.
    pub collateral: Decimal,
    pub call: TradeResult,
    pub put: TradeResult,
}

impl Straddle {
    pub fn position_ids(&self) -> [PositionId; 2] {
        [self.call.position_id, self.put.position_id]
    }
}

/// Position custody ledger.
///
/// Buys straddles on the market as itself, remembers who each position was
/// bought for, and hands positions out only to that beneficiary's chosen
/// recipient. Every public operation is all-or-nothing across the market,
/// the stable asset and the custody book.
pub struct Strands<M, S, D> {
    addresses: ContractAddresses,
    config: StrandsConfig,
    market: M,
    stable: S,
    directory: D,
    custody: CustodyBook,
    release_guard: ReleaseGuard,
    journal: Option<CustodyJournal>,
}

impl<M, S, D> Strands<M, S, D>
where
    M: OptionMarket + Checkpoint,
    S: StableAsset + Checkpoint,
    D: ContractDirectory,
{
    pub fn new(
        addresses: ContractAddresses,
        config: StrandsConfig,
        market: M,
        stable: S,
        directory: D,
    ) -> Self {
        let journal = config
            .journal_path()
            .map(|path| CustodyJournal::new(path.to_path_buf()));
        Self {
            addresses,
            config,
            market,
            stable,
            directory,
            custody: CustodyBook::new(),
            release_guard: ReleaseGuard::default(),
            journal,
        }
    }

    pub fn with_release_guard(mut self, guard: ReleaseGuard) -> Self {
        self.release_guard = guard;
        self
    }

    pub fn address(&self) -> Address {
        self.addresses.ledger
    }

    pub fn stable_coin_contract(&self) -> Address {
        self.addresses.stable_coin
    }

    pub fn option_token_contract(&self) -> Address {
        self.addresses.option_token
    }

    pub fn option_market_contract(&self) -> Address {
        self.addresses.option_market
    }

    pub fn config(&self) -> &StrandsConfig {
        &self.config
    }

    pub fn market(&self) -> &M {
        &self.market
    }

    pub fn market_mut(&mut self) -> &mut M {
        &mut self.market
    }

    pub fn stable(&self) -> &S {
        &self.stable
    }

    pub fn stable_mut(&mut self) -> &mut S {
        &mut self.stable
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    pub fn custody(&self) -> &CustodyBook {
        &self.custody
    }

    /// Beneficiary of a custodied position, `Address::ZERO` otherwise.
    pub fn position_of(&self, id: PositionId) -> Address {
        self.custody.beneficiary_of(id)
    }

    /// Positions currently held for `beneficiary`, ascending by id.
    pub fn custodied_positions(&self, beneficiary: Address) -> Vec<PositionId> {
        self.custody.held_for(beneficiary)
    }

    /// Buys a LONG_CALL and a LONG_PUT of `amount` on `strike_id` for `caller`.
    ///
    /// Pulls `strike_price * amount` of the stable asset from `caller` first;
    /// the caller must have approved the ledger for at least that much. Both
    /// positions end up held by the ledger with `caller` as beneficiary.
    pub fn buy_straddle(
        &mut self,
        caller: Address,
        amount: Decimal,
        strike_id: StrikeId,
    ) -> Result<Straddle> {
        if amount <= Decimal::ZERO {
            return Err(StrandsError::ZeroAmount);
        }

        let straddle = self.atomically(|ledger| ledger.open_straddle(caller, amount, strike_id))?;

        info!(
            "Straddle x{} on strike {} for {}: call {}, put {}, collateral {}",
            amount,
            strike_id,
            caller,
            straddle.call.position_id,
            straddle.put.position_id,
            straddle.collateral
        );
        for id in straddle.position_ids() {
            self.journal_event(CustodyEvent::new(
                CustodyEventKind::Custody,
                id,
                caller,
                self.address(),
            ));
        }

        Ok(straddle)
    }

    /// Hands position `id` to `recipient` on behalf of its beneficiary.
    ///
    /// Only the recorded beneficiary may call this. The ledger cannot be its
    /// own recipient. Contract-like recipients must accept position tokens
    /// through their receive hook.
    pub fn safe_transfer_position(
        &mut self,
        caller: Address,
        id: PositionId,
        recipient: Address,
    ) -> Result<()> {
        let beneficiary = self.custody.beneficiary_of(id);
        let ctx = ReleaseContext {
            caller,
            position_id: id,
            recipient,
            beneficiary,
            ledger: self.address(),
            directory: &self.directory,
        };
        self.release_guard.check_release(&ctx)?;

        self.atomically(|ledger| {
            let holder = ledger.address();
            let receivers = LedgerDirectory {
                ledger: holder,
                deployments: &ledger.directory,
            };
            ledger
                .market
                .safe_transfer_from(holder, holder, recipient, id, &[], &receivers)
                .map_err(StrandsError::TransferFailed)?;
            ledger.custody.release(id);
            Ok(())
        })?;

        info!("Released position {} of {} to {}", id, beneficiary, recipient);
        self.journal_event(CustodyEvent::new(
            CustodyEventKind::Release,
            id,
            beneficiary,
            recipient,
        ));

        Ok(())
    }

    fn open_straddle(
        &mut self,
        caller: Address,
        amount: Decimal,
        strike_id: StrikeId,
    ) -> Result<Straddle> {
        let strike = self.live_strike(strike_id)?;
        let collateral = strike
            .strike_price
            .checked_mul(amount)
            .ok_or(StrandsError::CollateralOverflow {
                strike_price: strike.strike_price,
                amount,
            })?;

        let holder = self.address();
        self.stable
            .transfer_from(holder, caller, holder, collateral)
            .map_err(StrandsError::CollateralPullFailed)?;
        debug!("Pulled {} collateral from {}", collateral, caller);

        let call = self.open_leg(strike_id, OptionType::LongCall, amount)?;
        let put = self.open_leg(strike_id, OptionType::LongPut, amount)?;

        self.custody.assign(call.position_id, caller);
        self.custody.assign(put.position_id, caller);

        Ok(Straddle {
            strike_id,
            amount,
            collateral,
            call,
            put,
        })
    }

    fn open_leg(
        &mut self,
        strike_id: StrikeId,
        option_type: OptionType,
        amount: Decimal,
    ) -> Result<TradeResult> {
        let params = OpenPositionParams::open_new(strike_id, option_type, amount)
            .with_iterations(self.config.iterations())
            .with_cost_bounds(self.config.min_total_cost(), self.config.max_total_cost());

        let receivers = LedgerDirectory {
            ledger: self.addresses.ledger,
            deployments: &self.directory,
        };
        self.market
            .open_position(self.addresses.ledger, params, &receivers)
            .map_err(|source| StrandsError::UpstreamOpenFailed {
                option_type,
                source,
            })
    }

    /// Resolves `strike_id` against the market's live boards.
    fn live_strike(&self, strike_id: StrikeId) -> Result<Strike> {
        for board in self.market.live_boards() {
            let strikes = self
                .market
                .board_strikes(board)
                .map_err(StrandsError::MarketQueryFailed)?;
            if strikes.contains(&strike_id) {
                return self
                    .market
                    .strike(strike_id)
                    .map_err(StrandsError::MarketQueryFailed);
            }
        }
        Err(StrandsError::StrikeNotLive(strike_id))
    }

    /// Runs `op` so that either all of its effects stick or none do.
    fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.market.checkpoint();
        self.stable.checkpoint();
        let custody = self.custody.clone();

        match op(self) {
            Ok(value) => {
                self.market.commit();
                self.stable.commit();
                Ok(value)
            }
            Err(e) => {
                self.market.rollback();
                self.stable.rollback();
                self.custody = custody;
                Err(e)
            }
        }
    }

    fn journal_event(&mut self, event: CustodyEvent) {
        if let Some(journal) = self.journal.as_mut() {
            if let Err(e) = journal.log(&event) {
                warn!(
                    "Failed to journal {} of position {} to {}: {}",
                    event.kind,
                    event.position_id,
                    journal.path().display(),
                    e
                );
            }
        }
    }
}

/// Receive hook of the ledger's own address. Accepts every position and
/// touches no state; custody is recorded by the operation that caused the move.
pub struct LedgerHook;

impl TokenReceiver for LedgerHook {
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

impl<M, S, D> TokenReceiver for Strands<M, S, D> {
    fn on_erc721_received(
        &self,
        operator: Address,
        from: Address,
        id: PositionId,
        data: &[u8],
    ) -> Option<Selector> {
        LedgerHook.on_erc721_received(operator, from, id, data)
    }
}

/// Code lookup handed to the market: the host's deployments, with the
/// ledger's own address resolving to `LedgerHook`.
pub struct LedgerDirectory<'a> {
    pub ledger: Address,
    pub deployments: &'a dyn ContractDirectory,
}

impl ContractDirectory for LedgerDirectory<'_> {
    fn code_at(&self, address: Address) -> Option<&dyn TokenReceiver> {
        if address == self.ledger {
            Some(&LedgerHook)
        } else {
            self.deployments.code_at(address)
        }
    }
}
