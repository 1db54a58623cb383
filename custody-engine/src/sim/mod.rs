//! Deterministic in-memory collaborators.
//!
//! Used by the tests and by the scenario runner in `main`. None of them model
//! pricing beyond a flat premium rate.

pub mod deployments;
pub mod market;
pub mod receivers;
pub mod stable;

pub use deployments::Deployments;
pub use market::SimulatedMarket;
pub use receivers::{AcceptingReceiver, NonReceiver, RejectingReceiver};
pub use stable::SimulatedStable;
