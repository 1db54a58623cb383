use super::{ReleaseContext, ReleasePolicy};
use crate::error::{Result, StrandsError};

/// Only the recorded beneficiary may release a custodied position.
pub struct BeneficiaryPolicy;

impl ReleasePolicy for BeneficiaryPolicy {
    fn name(&self) -> &str {
        "Beneficiary"
    }

    fn check(&self, ctx: &ReleaseContext) -> Result<()> {
        // An uncustodied id has a zero beneficiary, which no caller matches.
        if ctx.beneficiary.is_zero() || ctx.caller != ctx.beneficiary {
            return Err(StrandsError::UnauthorizedRelease {
                position_id: ctx.position_id,
                caller: ctx.caller,
            });
        }
        Ok(())
    }
}
