//! # Custody Engine
//!
//! Position custody ledger for an options market.
//!
//! ## Modules
//! - `engine`: The `Strands` ledger and its custody book.
//! - `release_guard`: Policies checked before a position leaves custody.
//! - `journal`: Append-only CSV record of committed custody events.
//! - `sim`: In-memory market, stable asset and contract directory.
//! - `config`: File and environment configuration.
//! - `io`: Command line arguments.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod journal;
pub mod release_guard;
pub mod sim;

pub use config::StrandsConfig;
pub use engine::{ContractAddresses, CustodyBook, Straddle, Strands};
pub use error::{Result, StrandsError};
