use anchor_lang::prelude::*;

use crate::constants::{PROGRAM_SEED, SCHEDULE_SEED};
use crate::engine;
use crate::error::VestingError;
use crate::state::{EmployeeAccount, VestingAccount};
use crate::utils::pda::{name_head, name_tail};

/// Emit what a claim would release right now, without moving funds.
pub fn quote_claim(ctx: Context<QuoteClaim>, name: String) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let employee = &ctx.accounts.employee_account;
    let quote = engine::quote(employee, now)?;

    msg!("Quote for {} under {}", employee.beneficiary, name);
    emit!(VestingQuote {
        employee_account: employee.key(),
        beneficiary: employee.beneficiary,
        phase: quote.phase.as_u8(),
        vested_amount: quote.vested,
        total_withdrawn: quote.withdrawn,
        claimable: quote.claimable,
        quoted_at: now,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(name: String)]
pub struct QuoteClaim<'info> {
    #[account(
        seeds = [PROGRAM_SEED, name_head(&name), name_tail(&name)],
        bump = vesting_account.bump,
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    #[account(
        seeds = [SCHEDULE_SEED, employee_account.beneficiary.as_ref(), vesting_account.key().as_ref()],
        bump = employee_account.bump,
        has_one = vesting_account @ VestingError::RecordMismatch,
    )]
    pub employee_account: Account<'info, EmployeeAccount>,
}

#[event]
pub struct VestingQuote {
    pub employee_account: Pubkey,
    pub beneficiary: Pubkey,
    /// 0 = before cliff, 1 = accruing, 2 = fully vested.
    pub phase: u8,
    pub vested_amount: i64,
    pub total_withdrawn: i64,
    pub claimable: i64,
    pub quoted_at: i64,
}
