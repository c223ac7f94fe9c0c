use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::{PROGRAM_SEED, SCHEDULE_SEED, TREASURY_SEED};
use crate::custody::Custody;
use crate::engine;
use crate::error::VestingError;
use crate::guard::ClaimRequest;
use crate::state::{EmployeeAccount, VestingAccount};
use crate::utils::pda::{name_head, name_tail};

pub fn claim_tokens(mut ctx: Context<ClaimTokens>, name: String) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let program_id = *ctx.program_id;

    // Capture AccountInfos before taking the mutable borrow of the schedule.
    let accounts = &mut *ctx.accounts;
    let req = ClaimRequest {
        caller: accounts.beneficiary.key(),
        program_name: &name,
        vesting_account: accounts.vesting_account.key(),
        employee_account: accounts.employee_account.key(),
        treasury: accounts.treasury_token_account.key(),
        mint: accounts.mint.key(),
        destination: accounts.beneficiary_token_account.key(),
    };

    let bump = [accounts.vesting_account.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[
        PROGRAM_SEED,
        name_head(&name),
        name_tail(&name),
        &bump,
    ]];
    let mut custody = TreasuryCustody {
        token_program: accounts.token_program.to_account_info(),
        mint: accounts.mint.to_account_info(),
        decimals: accounts.mint.decimals,
        treasury: accounts.treasury_token_account.to_account_info(),
        treasury_amount: accounts.treasury_token_account.amount,
        destination: accounts.beneficiary_token_account.to_account_info(),
        destination_owner: accounts.beneficiary_token_account.owner,
        destination_mint: accounts.beneficiary_token_account.mint,
        authority: accounts.vesting_account.to_account_info(),
        signer_seeds,
    };

    let released = engine::claim(
        &program_id,
        &req,
        &mut accounts.employee_account,
        &accounts.vesting_account,
        now,
        &mut custody,
    )?;

    msg!("Released {} tokens", released);
    emit!(TokensClaimed {
        employee_account: req.employee_account,
        beneficiary: req.caller,
        amount: released,
        total_withdrawn: accounts.employee_account.total_withdrawn,
        total_amount: accounts.employee_account.total_amount,
        claimed_at: now,
    });

    Ok(())
}

/// SPL Token custody for one claim: moves tokens out of the treasury, signed
/// by the vesting account's seeds.
struct TreasuryCustody<'a, 'info> {
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    decimals: u8,
    treasury: AccountInfo<'info>,
    treasury_amount: u64,
    destination: AccountInfo<'info>,
    destination_owner: Pubkey,
    destination_mint: Pubkey,
    authority: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
}

impl Custody for TreasuryCustody<'_, '_> {
    fn balance(&self, account: &Pubkey) -> core::result::Result<u64, VestingError> {
        if *account != self.treasury.key() {
            return Err(VestingError::RecordMismatch);
        }
        Ok(self.treasury_amount)
    }

    // The destination is created by `init_if_needed` before the handler runs.
    fn open_if_missing(
        &mut self,
        holding: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> core::result::Result<(), VestingError> {
        if *holding != self.destination.key()
            || *owner != self.destination_owner
            || *mint != self.destination_mint
        {
            return Err(VestingError::RecordMismatch);
        }
        Ok(())
    }

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: &Pubkey,
        amount: u64,
    ) -> core::result::Result<(), VestingError> {
        if *from != self.treasury.key()
            || *to != self.destination.key()
            || *authority != self.authority.key()
        {
            return Err(VestingError::RecordMismatch);
        }
        token::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: self.treasury.clone(),
                    mint: self.mint.clone(),
                    to: self.destination.clone(),
                    authority: self.authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
            self.decimals,
        )
        .map_err(|e| {
            msg!("Custody transfer failed: {:?}", e);
            VestingError::CustodyTransferFailed
        })?;
        self.treasury_amount = self.treasury_amount.saturating_sub(amount);
        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(name: String)]
pub struct ClaimTokens<'info> {
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    #[account(
        mut,
        seeds = [SCHEDULE_SEED, employee_account.beneficiary.as_ref(), vesting_account.key().as_ref()],
        bump = employee_account.bump,
        has_one = beneficiary @ VestingError::Unauthorized,
        has_one = vesting_account @ VestingError::RecordMismatch,
    )]
    pub employee_account: Account<'info, EmployeeAccount>,

    #[account(
        seeds = [PROGRAM_SEED, name_head(&name), name_tail(&name)],
        bump = vesting_account.bump,
        has_one = mint @ VestingError::RecordMismatch,
        constraint = vesting_account.treasury == treasury_token_account.key() @ VestingError::RecordMismatch,
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [TREASURY_SEED, name_head(&name), name_tail(&name)],
        bump = vesting_account.treasury_bump,
        token::mint = mint,
        token::authority = vesting_account,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        associated_token::mint = mint,
        associated_token::authority = beneficiary,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokensClaimed {
    pub employee_account: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub total_withdrawn: i64,
    pub total_amount: i64,
    pub claimed_at: i64,
}
