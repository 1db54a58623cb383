use super::{ReleaseContext, ReleasePolicy};
use crate::error::{Result, StrandsError};

/// A released position must leave the ledger. Moving it to the ledger's own
/// address would drop the custody record while the ledger still holds it.
pub struct ExternalRecipientPolicy;

impl ReleasePolicy for ExternalRecipientPolicy {
    fn name(&self) -> &str {
        "ExternalRecipient"
    }

    fn check(&self, ctx: &ReleaseContext) -> Result<()> {
        if ctx.recipient == ctx.ledger {
            return Err(StrandsError::ReleaseToLedger {
                position_id: ctx.position_id,
            });
        }
        Ok(())
    }
}
