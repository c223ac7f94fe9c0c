use anchor_lang::prelude::*;

pub mod constants;
pub mod custody;
pub mod engine;
pub mod error;
pub mod guard;
pub mod instructions;
#[cfg(not(target_os = "solana"))]
pub mod ledger;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("5aiyyQBrimRKeeMrVpjX5A3rQGiHHG3wPKFt2NjfMCDD");

#[program]
pub mod token_vesting {
    use super::*;

    /// Register a vesting program and its treasury under `name`.
    pub fn create_vesting_account(ctx: Context<CreateVestingAccount>, name: String) -> Result<()> {
        instructions::create_vesting_account::create_vesting_account(ctx, name)
    }

    /// Owner-only: add a beneficiary's schedule to a vesting program.
    pub fn create_employee_schedule(
        ctx: Context<CreateEmployeeSchedule>,
        start_time: i64,
        end_time: i64,
        total_amount: i64,
        cliff_time: i64,
    ) -> Result<()> {
        instructions::create_employee_schedule::create_employee_schedule(
            ctx,
            start_time,
            end_time,
            total_amount,
            cliff_time,
        )
    }

    /// Beneficiary-only: withdraw everything vested and not yet withdrawn.
    pub fn claim_tokens(ctx: Context<ClaimTokens>, name: String) -> Result<()> {
        instructions::claim_tokens::claim_tokens(ctx, name)
    }

    /// Read-only: emit the schedule's vested, withdrawn and claimable amounts.
    pub fn quote_claim(ctx: Context<QuoteClaim>, name: String) -> Result<()> {
        instructions::quote_claim::quote_claim(ctx, name)
    }
}
