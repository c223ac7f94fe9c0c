//! Cliff-then-linear vesting math.
//! - vested = 0 before the cliff
//! - vested = total at or after the end
//! - otherwise floor(total * (now - start) / (end - start)), widened to i128

use crate::error::VestingError;
use crate::state::EmployeeAccount;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingPhase {
    BeforeCliff,
    Accruing,
    FullyVested,
}

impl VestingPhase {
    pub fn as_u8(self) -> u8 {
        match self {
            VestingPhase::BeforeCliff => 0,
            VestingPhase::Accruing => 1,
            VestingPhase::FullyVested => 2,
        }
    }
}

pub fn vesting_phase(schedule: &EmployeeAccount, now: i64) -> VestingPhase {
    if now < schedule.cliff_time {
        VestingPhase::BeforeCliff
    } else if now >= schedule.end_time {
        VestingPhase::FullyVested
    } else {
        VestingPhase::Accruing
    }
}

pub fn vested_amount(schedule: &EmployeeAccount, now: i64) -> Result<i64, VestingError> {
    if now < schedule.cliff_time {
        return Ok(0);
    }
    if now >= schedule.end_time {
        return Ok(schedule.total_amount);
    }

    let elapsed = (now as i128) - (schedule.start_time as i128);
    let duration = (schedule.end_time as i128) - (schedule.start_time as i128);
    if duration <= 0 {
        return Err(VestingError::ArithmeticFault);
    }

    let vested = (schedule.total_amount as i128)
        .checked_mul(elapsed)
        .ok_or(VestingError::ArithmeticFault)?
        .checked_div(duration)
        .ok_or(VestingError::ArithmeticFault)?;
    i64::try_from(vested).map_err(|_| VestingError::ArithmeticFault)
}

/// Vested minus already withdrawn.
///
/// A withdrawn total above the vested amount means the ledger is corrupt;
/// that is reported instead of clamped to zero.
pub fn claimable_amount(schedule: &EmployeeAccount, now: i64) -> Result<i64, VestingError> {
    let vested = vested_amount(schedule, now)?;
    if schedule.total_withdrawn > vested {
        return Err(VestingError::WithdrawnExceedsVested);
    }
    vested
        .checked_sub(schedule.total_withdrawn)
        .ok_or(VestingError::ArithmeticFault)
}

/// Validate schedule parameters before anything is persisted.
pub fn validate_schedule(
    start_time: i64,
    cliff_time: i64,
    end_time: i64,
    total_amount: i64,
) -> Result<(), VestingError> {
    if total_amount <= 0 {
        return Err(VestingError::InvalidAmount);
    }
    if !(start_time <= cliff_time && cliff_time <= end_time && start_time < end_time) {
        return Err(VestingError::InvalidScheduleTimes);
    }
    Ok(())
}
