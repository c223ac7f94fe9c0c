//! Token custody seam.
//!
//! The claim engine decides whether and how much to release; moving tokens is
//! delegated to a `Custody`. On-chain that is an SPL Token CPI signed by the
//! vesting account; off-chain it is `InMemoryCustody`.

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use crate::error::VestingError;

pub trait Custody {
    /// Balance of a token account.
    fn balance(&self, account: &Pubkey) -> Result<u64, VestingError>;

    /// Make sure `holding` exists as a token account of `owner` for `mint`.
    fn open_if_missing(
        &mut self,
        holding: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<(), VestingError>;

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: &Pubkey,
        amount: u64,
    ) -> Result<(), VestingError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoldingAccount {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

/// Token book keyed by token-account address.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCustody {
    accounts: BTreeMap<Pubkey, HoldingAccount>,
}

impl InMemoryCustody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, address: &Pubkey) -> Option<&HoldingAccount> {
        self.accounts.get(address)
    }

    /// Create an empty token account; fails if the address is taken.
    pub fn open(&mut self, address: Pubkey, owner: Pubkey, mint: Pubkey) -> Result<(), VestingError> {
        if self.accounts.contains_key(&address) {
            return Err(VestingError::DuplicateRecord);
        }
        self.accounts.insert(
            address,
            HoldingAccount {
                owner,
                mint,
                amount: 0,
            },
        );
        Ok(())
    }

    /// Credit an account from outside the ledger (a manual deposit).
    pub fn mint_to(&mut self, address: &Pubkey, amount: u64) -> Result<(), VestingError> {
        let acct = self
            .accounts
            .get_mut(address)
            .ok_or(VestingError::RecordNotFound)?;
        acct.amount = acct
            .amount
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticFault)?;
        Ok(())
    }
}

impl Custody for InMemoryCustody {
    fn balance(&self, account: &Pubkey) -> Result<u64, VestingError> {
        self.accounts
            .get(account)
            .map(|a| a.amount)
            .ok_or(VestingError::RecordNotFound)
    }

    fn open_if_missing(
        &mut self,
        holding: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<(), VestingError> {
        match self.accounts.get(holding) {
            Some(acct) if acct.owner == *owner && acct.mint == *mint => Ok(()),
            Some(_) => Err(VestingError::RecordMismatch),
            None => self.open(*holding, *owner, *mint),
        }
    }

    fn transfer(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        authority: &Pubkey,
        amount: u64,
    ) -> Result<(), VestingError> {
        if from == to {
            return Err(VestingError::RecordMismatch);
        }
        let src = self.accounts.get(from).ok_or(VestingError::RecordNotFound)?;
        let dst = self.accounts.get(to).ok_or(VestingError::RecordNotFound)?;
        if src.owner != *authority {
            return Err(VestingError::Unauthorized);
        }
        if src.mint != dst.mint {
            return Err(VestingError::RecordMismatch);
        }
        let src_after = src
            .amount
            .checked_sub(amount)
            .ok_or(VestingError::InsufficientCustodyFunds)?;
        let dst_after = dst
            .amount
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticFault)?;

        if let Some(acct) = self.accounts.get_mut(from) {
            acct.amount = src_after;
        }
        if let Some(acct) = self.accounts.get_mut(to) {
            acct.amount = dst_after;
        }
        Ok(())
    }
}
