//! Explicit account creation for program records.
//!
//! Records are created in the handler rather than through `init`, so an
//! occupied address surfaces as `DuplicateRecord` instead of the system
//! program's "already in use".

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token::{self, Mint};

use crate::error::VestingError;

/// An address is free when the system program still owns it and it holds no
/// data. Lamports alone do not make a record.
pub fn is_vacant(target: &AccountInfo) -> bool {
    target.owner == &system_program::ID && target.data_is_empty()
}

/// Create `target` with `space` bytes owned by `owner`, signed by the PDA's
/// `signer_seeds` and funded by `payer`.
pub fn create_pda_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    require!(is_vacant(target), VestingError::DuplicateRecord);

    let rent = Rent::get()?.minimum_balance(space);
    let current = target.lamports();
    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                signer_seeds,
            ),
            rent,
            space as u64,
            owner,
        );
    }

    // Someone pre-funded the address; create_account would refuse it.
    let top_up = rent.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.clone(),
                Transfer {
                    from: payer.clone(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.clone(),
            Allocate {
                account_to_allocate: target.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.clone(),
            Assign {
                account_to_assign: target.clone(),
            },
            signer_seeds,
        ),
        owner,
    )
}

/// Decode `account` as an initialized SPL Token mint.
pub fn read_mint(account: &AccountInfo) -> core::result::Result<Mint, VestingError> {
    if account.owner != &token::ID {
        return Err(VestingError::InvalidAsset);
    }
    let data = account
        .try_borrow_data()
        .map_err(|_| VestingError::InvalidAsset)?;
    Mint::try_deserialize(&mut &data[..]).map_err(|_| VestingError::InvalidAsset)
}
