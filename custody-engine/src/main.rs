use anyhow::{Context, Result};
use clap::Parser;
use custody_engine::engine::{ContractAddresses, Strands};
use custody_engine::io::Args;
use custody_engine::sim::{
    AcceptingReceiver, Deployments, NonReceiver, SimulatedMarket, SimulatedStable,
};
use custody_engine::{StrandsConfig, StrandsError};
use log::{info, warn};
use strands::{Address, PositionToken, StableAsset};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = StrandsConfig::load(args.config.as_deref())?;
    if let Some(path) = args.journal.clone() {
        config = config.with_journal_path(path);
    }

    let addresses = ContractAddresses {
        ledger: Address::from_low_u64(0x5157),
        stable_coin: Address::from_low_u64(0x5d),
        option_token: Address::from_low_u64(0x07),
        option_market: Address::from_low_u64(0x0a),
    };
    let signer = Address::from_low_u64(0x51);
    let vault = Address::from_low_u64(0xc0de);
    let plain_contract = Address::from_low_u64(0xc0df);

    // 1. Simulated collaborators
    let mut market = SimulatedMarket::new(addresses.option_market);
    let board = market.add_board();
    let strike_id = market.add_strike(board, args.strike_price)?;

    let collateral = args
        .strike_price
        .checked_mul(args.amount)
        .context("collateral overflows")?;
    let mut stable = SimulatedStable::new(addresses.stable_coin);
    stable.mint(signer, collateral);
    stable.approve(signer, addresses.ledger, collateral);

    let mut directory = Deployments::new();
    directory.deploy(vault, Box::new(AcceptingReceiver));
    directory.deploy(plain_contract, Box::new(NonReceiver));

    let mut ledger = Strands::new(addresses, config, market, stable, directory);
    info!("Ledger {} listening on market {}", ledger.address(), ledger.option_market_contract());

    // 2. Buy
    let straddle = ledger.buy_straddle(signer, args.amount, strike_id)?;
    let [call_id, put_id] = straddle.position_ids();

    // 3. Release the call to the signer
    ledger.safe_transfer_position(signer, call_id, signer)?;

    // 4. A contract without the receive hook must be refused
    match ledger.safe_transfer_position(signer, put_id, plain_contract) {
        Err(StrandsError::IncompatibleRecipient(addr)) => {
            info!("Refused release of {} to {}", put_id, addr)
        }
        Err(e) => return Err(e.into()),
        Ok(()) => warn!("Release of {} to {} was not refused", put_id, plain_contract),
    }

    // 5. Release the put to a receiving contract
    if ledger.position_of(put_id) == signer {
        ledger.safe_transfer_position(signer, put_id, vault)?;
    }

    let summary = serde_json::json!({
        "straddle": straddle,
        "owners": {
            call_id.to_string(): ledger.market().owner_of(call_id)?,
            put_id.to_string(): ledger.market().owner_of(put_id)?,
        },
        "custodied": ledger.custody().len(),
        "ledger_collateral": ledger.stable().balance_of(ledger.address()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
