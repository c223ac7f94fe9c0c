use anchor_lang::prelude::*;

/// Per-beneficiary release schedule bound to one vesting program.
/// Seeds: [b"employee_schedule", beneficiary, vesting_account]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct EmployeeAccount {
    pub beneficiary: Pubkey,
    /// Unix seconds.
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    /// Set once at creation.
    pub total_amount: i64,
    /// Never decreases; never exceeds `total_amount`.
    pub total_withdrawn: i64,
    /// Owning vesting program. Immutable.
    pub vesting_account: Pubkey,
    pub bump: u8,
}
