use super::{ReleaseContext, ReleasePolicy};
use crate::error::{Result, StrandsError};

/// Contract-like recipients must acknowledge position tokens through their
/// receive hook. Plain accounts always pass.
pub struct ReceiverCapabilityPolicy;

impl ReleasePolicy for ReceiverCapabilityPolicy {
    fn name(&self) -> &str {
        "ReceiverCapability"
    }

    fn check(&self, ctx: &ReleaseContext) -> Result<()> {
        if ctx
            .directory
            .accepts(ctx.ledger, ctx.ledger, ctx.recipient, ctx.position_id, &[])
        {
            Ok(())
        } else {
            Err(StrandsError::IncompatibleRecipient(ctx.recipient))
        }
    }
}
