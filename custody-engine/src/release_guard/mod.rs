use crate::error::Result;
use log::warn;
use strands::{Address, ContractDirectory, PositionId};

pub mod beneficiary;
pub mod external_recipient;
pub mod receiver_capability;

pub use beneficiary::BeneficiaryPolicy;
pub use external_recipient::ExternalRecipientPolicy;
pub use receiver_capability::ReceiverCapabilityPolicy;

/// Everything a policy may look at when a release is requested.
pub struct ReleaseContext<'a> {
    pub caller: Address,
    pub position_id: PositionId,
    pub recipient: Address,
    /// Recorded beneficiary, `Address::ZERO` if the ledger does not hold the id.
    pub beneficiary: Address,
    /// The ledger's own address, used as operator and sender of the transfer.
    pub ledger: Address,
    pub directory: &'a dyn ContractDirectory,
}

pub trait ReleasePolicy: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, ctx: &ReleaseContext) -> Result<()>;
}

/// Ordered chain of release policies. The first rejection wins.
pub struct ReleaseGuard {
    policies: Vec<Box<dyn ReleasePolicy>>,
}

impl Default for ReleaseGuard {
    fn default() -> Self {
        let mut guard = Self::new();
        guard.add_policy(Box::new(BeneficiaryPolicy));
        guard.add_policy(Box::new(ExternalRecipientPolicy));
        guard.add_policy(Box::new(ReceiverCapabilityPolicy));
        guard
    }
}

impl ReleaseGuard {
    /// An empty guard that approves everything.
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    pub fn add_policy(&mut self, policy: Box<dyn ReleasePolicy>) {
        self.policies.push(policy);
    }

    pub fn check_release(&self, ctx: &ReleaseContext) -> Result<()> {
        for policy in &self.policies {
            if let Err(reason) = policy.check(ctx) {
                warn!(
                    "Release of position {} to {} rejected by policy {}: {}",
                    ctx.position_id,
                    ctx.recipient,
                    policy.name(),
                    reason
                );
                return Err(reason);
            }
        }
        Ok(())
    }
}
