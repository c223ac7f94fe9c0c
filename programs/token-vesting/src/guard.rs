//! Authorization checks run before any record is mutated.
//!
//! Identity checks compare the signer against the role stored in the record.
//! Linkage checks re-derive every presented address from its stored bump, so a
//! caller cannot substitute an unrelated program, schedule or treasury.
//! All checks fail closed.

use anchor_lang::prelude::Pubkey;

use crate::error::VestingError;
use crate::state::{EmployeeAccount, VestingAccount};
use crate::utils::pda;

/// Accounts a claim presents, by address.
#[derive(Clone, Copy, Debug)]
pub struct ClaimRequest<'a> {
    pub caller: Pubkey,
    pub program_name: &'a str,
    pub vesting_account: Pubkey,
    pub employee_account: Pubkey,
    pub treasury: Pubkey,
    pub mint: Pubkey,
    pub destination: Pubkey,
}

pub fn require_signer_is(caller: &Pubkey, expected: &Pubkey) -> Result<(), VestingError> {
    if caller != expected {
        return Err(VestingError::Unauthorized);
    }
    Ok(())
}

pub fn require_owner(caller: &Pubkey, program: &VestingAccount) -> Result<(), VestingError> {
    require_signer_is(caller, &program.owner)
}

pub fn check_claim(
    program_id: &Pubkey,
    req: &ClaimRequest,
    schedule: &EmployeeAccount,
    program: &VestingAccount,
) -> Result<(), VestingError> {
    require_signer_is(&req.caller, &schedule.beneficiary)?;

    // The schedule must belong to the presented program.
    if req.program_name != program.name || schedule.vesting_account != req.vesting_account {
        return Err(VestingError::RecordMismatch);
    }
    if !pda::verify_program_address(&program.name, program.bump, program_id, &req.vesting_account) {
        return Err(VestingError::RecordMismatch);
    }
    if !pda::verify_schedule_address(
        &schedule.beneficiary,
        &req.vesting_account,
        schedule.bump,
        program_id,
        &req.employee_account,
    ) {
        return Err(VestingError::RecordMismatch);
    }

    // Custody and asset must be the program's own.
    if program.treasury != req.treasury || program.mint != req.mint {
        return Err(VestingError::RecordMismatch);
    }
    if !pda::verify_treasury_address(&program.name, program.treasury_bump, program_id, &req.treasury) {
        return Err(VestingError::RecordMismatch);
    }
    if pda::associated_holding(&schedule.beneficiary, &program.mint) != req.destination {
        return Err(VestingError::RecordMismatch);
    }
    Ok(())
}
