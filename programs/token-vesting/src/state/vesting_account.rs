use anchor_lang::prelude::*;

use crate::constants::MAX_NAME_LEN;
use crate::error::VestingError;

/// Company-level vesting program.
/// Seeds: [b"vesting_program", name]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct VestingAccount {
    /// Controlling principal; the only key allowed to add schedules.
    pub owner: Pubkey,
    /// Token mint under vesting.
    pub mint: Pubkey,
    /// Custody token account. Its authority is this account, never `owner`.
    pub treasury: Pubkey,
    /// Immutable name; key material for this account and the treasury.
    #[max_len(MAX_NAME_LEN)]
    pub name: String,
    /// Bump of this account's address.
    pub bump: u8,
    /// Bump of the treasury address.
    pub treasury_bump: u8,
}

impl VestingAccount {
    pub fn validate_name(name: &str) -> core::result::Result<(), VestingError> {
        if name.is_empty() {
            return Err(VestingError::EmptyName);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(VestingError::NameTooLong);
        }
        Ok(())
    }
}
