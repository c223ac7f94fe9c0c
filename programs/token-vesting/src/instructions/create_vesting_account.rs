use anchor_lang::prelude::*;
use anchor_spl::token::{self, InitializeAccount3, Token, TokenAccount};

use crate::constants::{PROGRAM_SEED, TREASURY_SEED};
use crate::state::VestingAccount;
use crate::utils::accounts::{create_pda_account, read_mint};
use crate::utils::pda::{name_head, name_tail};

pub fn create_vesting_account(ctx: Context<CreateVestingAccount>, name: String) -> Result<()> {
    VestingAccount::validate_name(&name)?;
    read_mint(&ctx.accounts.mint)?;

    let accounts = &ctx.accounts;
    let bump = ctx.bumps.vesting_account;
    let treasury_bump = ctx.bumps.treasury_token_account;
    let owner = accounts.owner.to_account_info();
    let system = accounts.system_program.to_account_info();

    create_pda_account(
        &owner,
        &accounts.vesting_account,
        &system,
        8 + VestingAccount::INIT_SPACE,
        ctx.program_id,
        &[&[PROGRAM_SEED, name_head(&name), name_tail(&name), &[bump]]],
    )?;
    create_pda_account(
        &owner,
        &accounts.treasury_token_account,
        &system,
        TokenAccount::LEN,
        &token::ID,
        &[&[TREASURY_SEED, name_head(&name), name_tail(&name), &[treasury_bump]]],
    )?;
    token::initialize_account3(CpiContext::new(
        accounts.token_program.to_account_info(),
        InitializeAccount3 {
            account: accounts.treasury_token_account.to_account_info(),
            mint: accounts.mint.to_account_info(),
            authority: accounts.vesting_account.to_account_info(),
        },
    ))?;

    let vesting = VestingAccount {
        owner: accounts.owner.key(),
        mint: accounts.mint.key(),
        treasury: accounts.treasury_token_account.key(),
        name,
        bump,
        treasury_bump,
    };
    {
        let mut data = accounts.vesting_account.try_borrow_mut_data()?;
        vesting.try_serialize(&mut &mut data[..])?;
    }

    msg!("Vesting program created: {}", vesting.name);
    emit!(VestingProgramCreated {
        vesting_account: accounts.vesting_account.key(),
        treasury: vesting.treasury,
        owner: vesting.owner,
        mint: vesting.mint,
        name: vesting.name,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(name: String)]
pub struct CreateVestingAccount<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: must be vacant; created and written in the handler.
    #[account(
        mut,
        seeds = [PROGRAM_SEED, name_head(&name), name_tail(&name)],
        bump
    )]
    pub vesting_account: UncheckedAccount<'info>,

    /// CHECK: decoded as an SPL Token mint in the handler (`InvalidAsset`).
    pub mint: UncheckedAccount<'info>,

    /// Custody for the program's tokens; only `vesting_account` can move them.
    /// CHECK: must be vacant; created as a token account in the handler.
    #[account(
        mut,
        seeds = [TREASURY_SEED, name_head(&name), name_tail(&name)],
        bump
    )]
    pub treasury_token_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingProgramCreated {
    pub vesting_account: Pubkey,
    pub treasury: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub name: String,
}
