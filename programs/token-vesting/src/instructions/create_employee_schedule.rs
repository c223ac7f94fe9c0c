use anchor_lang::prelude::*;

use crate::constants::{PROGRAM_SEED, SCHEDULE_SEED};
use crate::error::VestingError;
use crate::guard;
use crate::state::{EmployeeAccount, VestingAccount};
use crate::utils::accounts::create_pda_account;
use crate::utils::pda::{name_head, name_tail};
use crate::utils::vesting_math;

pub fn create_employee_schedule(
    ctx: Context<CreateEmployeeSchedule>,
    start_time: i64,
    end_time: i64,
    total_amount: i64,
    cliff_time: i64,
) -> Result<()> {
    guard::require_owner(&ctx.accounts.owner.key(), &ctx.accounts.vesting_account)?;
    require_keys_neq!(
        ctx.accounts.beneficiary.key(),
        Pubkey::default(),
        VestingError::InvalidBeneficiary
    );
    vesting_math::validate_schedule(start_time, cliff_time, end_time, total_amount)?;

    let accounts = &ctx.accounts;
    let vesting_account = accounts.vesting_account.key();
    let beneficiary = accounts.beneficiary.key();
    let bump = ctx.bumps.employee_account;
    create_pda_account(
        &accounts.owner.to_account_info(),
        &accounts.employee_account,
        &accounts.system_program.to_account_info(),
        8 + EmployeeAccount::INIT_SPACE,
        ctx.program_id,
        &[&[
            SCHEDULE_SEED,
            beneficiary.as_ref(),
            vesting_account.as_ref(),
            &[bump],
        ]],
    )?;

    let employee = EmployeeAccount {
        beneficiary,
        start_time,
        cliff_time,
        end_time,
        total_amount,
        total_withdrawn: 0,
        vesting_account,
        bump,
    };
    {
        let mut data = accounts.employee_account.try_borrow_mut_data()?;
        employee.try_serialize(&mut &mut data[..])?;
    }

    emit!(EmployeeScheduleCreated {
        employee_account: accounts.employee_account.key(),
        vesting_account,
        beneficiary,
        start_time,
        cliff_time,
        end_time,
        total_amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreateEmployeeSchedule<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub beneficiary: SystemAccount<'info>,

    #[account(
        seeds = [PROGRAM_SEED, name_head(&vesting_account.name), name_tail(&vesting_account.name)],
        bump = vesting_account.bump,
        has_one = owner @ VestingError::Unauthorized,
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    /// One schedule per (beneficiary, vesting program).
    /// CHECK: must be vacant (`DuplicateRecord`); created and written in the handler.
    #[account(
        mut,
        seeds = [SCHEDULE_SEED, beneficiary.key().as_ref(), vesting_account.key().as_ref()],
        bump
    )]
    pub employee_account: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct EmployeeScheduleCreated {
    pub employee_account: Pubkey,
    pub vesting_account: Pubkey,
    pub beneficiary: Pubkey,
    pub start_time: i64,
    pub cliff_time: i64,
    pub end_time: i64,
    pub total_amount: i64,
}
