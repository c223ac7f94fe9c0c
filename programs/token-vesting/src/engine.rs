//! Claim execution: guard, compute, transfer, record.

use anchor_lang::prelude::Pubkey;

use crate::custody::Custody;
use crate::error::VestingError;
use crate::guard::{self, ClaimRequest};
use crate::state::{EmployeeAccount, VestingAccount};
use crate::utils::vesting_math::{self, VestingPhase};

/// Snapshot of a schedule at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimQuote {
    pub phase: VestingPhase,
    pub vested: i64,
    pub withdrawn: i64,
    pub claimable: i64,
}

pub fn quote(schedule: &EmployeeAccount, now: i64) -> Result<ClaimQuote, VestingError> {
    Ok(ClaimQuote {
        phase: vesting_math::vesting_phase(schedule, now),
        vested: vesting_math::vested_amount(schedule, now)?,
        withdrawn: schedule.total_withdrawn,
        claimable: vesting_math::claimable_amount(schedule, now)?,
    })
}

/// Release everything vested but not yet withdrawn.
///
/// `schedule.total_withdrawn` is written only after the transfer succeeded,
/// and nothing after the transfer can fail. Returns the released quantity.
pub fn claim<C: Custody>(
    program_id: &Pubkey,
    req: &ClaimRequest,
    schedule: &mut EmployeeAccount,
    program: &VestingAccount,
    now: i64,
    custody: &mut C,
) -> Result<u64, VestingError> {
    guard::check_claim(program_id, req, schedule, program)?;

    if now < schedule.cliff_time {
        return Err(VestingError::ClaimNotAvailableYet);
    }

    let claimable = vesting_math::claimable_amount(schedule, now)?;
    if claimable == 0 {
        return Err(VestingError::NothingToClaim);
    }

    let next_withdrawn = schedule
        .total_withdrawn
        .checked_add(claimable)
        .ok_or(VestingError::ArithmeticFault)?;
    if next_withdrawn > schedule.total_amount {
        return Err(VestingError::WithdrawnExceedsVested);
    }
    let amount = u64::try_from(claimable).map_err(|_| VestingError::ArithmeticFault)?;

    if custody.balance(&req.treasury)? < amount {
        return Err(VestingError::InsufficientCustodyFunds);
    }
    custody.open_if_missing(&req.destination, &schedule.beneficiary, &program.mint)?;
    custody.transfer(&req.treasury, &req.destination, &req.vesting_account, amount)?;

    schedule.total_withdrawn = next_withdrawn;
    Ok(amount)
}
