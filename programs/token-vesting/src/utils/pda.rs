//! Deterministic program-derived addresses (PDAs).
//!
//! Every record lives at an address computed from a namespace seed plus key
//! material. PDAs are off the ed25519 curve, so nobody holds a signing key for
//! them; only this program can sign on their behalf. The bump found by
//! `find_program_address` is stored in the owning record and re-checked with
//! `create_program_address`, which is a single hash instead of a search.

use anchor_lang::prelude::Pubkey;

use crate::constants::{MAX_SEED_LEN, PROGRAM_SEED, SCHEDULE_SEED, TREASURY_SEED};

/// Split a program name into two seeds (a seed is at most 32 bytes).
///
/// PDA hashing concatenates seeds, so the pair hashes exactly like the whole
/// name would.
pub fn name_seeds(name: &str) -> [&[u8]; 2] {
    [name_head(name), name_tail(name)]
}

/// First seed of a name: its leading 32 bytes.
pub fn name_head(name: &str) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[..bytes.len().min(MAX_SEED_LEN)]
}

/// Second seed of a name: the next 32 bytes. Anything past 64 bytes is cut
/// so an oversized name still derives an address and fails name validation
/// instead of aborting the derivation.
pub fn name_tail(name: &str) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[bytes.len().min(MAX_SEED_LEN)..bytes.len().min(2 * MAX_SEED_LEN)]
}

/// Derive the address and bump for `namespace` + `key_parts`.
pub fn derive(namespace: &[u8], key_parts: &[&[u8]], program_id: &Pubkey) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(key_parts.len() + 1);
    seeds.push(namespace);
    seeds.extend_from_slice(key_parts);
    Pubkey::find_program_address(&seeds, program_id)
}

/// Recompute an address from its stored bump and compare it to `expected`.
pub fn verify(
    namespace: &[u8],
    key_parts: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
    expected: &Pubkey,
) -> bool {
    let bump = [bump];
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(key_parts.len() + 2);
    seeds.push(namespace);
    seeds.extend_from_slice(key_parts);
    seeds.push(&bump);
    match Pubkey::create_program_address(&seeds, program_id) {
        Ok(addr) => addr == *expected,
        Err(_) => false,
    }
}

pub fn program_address(name: &str, program_id: &Pubkey) -> (Pubkey, u8) {
    derive(PROGRAM_SEED, &name_seeds(name), program_id)
}

pub fn treasury_address(name: &str, program_id: &Pubkey) -> (Pubkey, u8) {
    derive(TREASURY_SEED, &name_seeds(name), program_id)
}

pub fn schedule_address(
    beneficiary: &Pubkey,
    vesting_account: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    derive(
        SCHEDULE_SEED,
        &[beneficiary.as_ref(), vesting_account.as_ref()],
        program_id,
    )
}

pub fn verify_program_address(name: &str, bump: u8, program_id: &Pubkey, expected: &Pubkey) -> bool {
    verify(PROGRAM_SEED, &name_seeds(name), bump, program_id, expected)
}

pub fn verify_treasury_address(name: &str, bump: u8, program_id: &Pubkey, expected: &Pubkey) -> bool {
    verify(TREASURY_SEED, &name_seeds(name), bump, program_id, expected)
}

pub fn verify_schedule_address(
    beneficiary: &Pubkey,
    vesting_account: &Pubkey,
    bump: u8,
    program_id: &Pubkey,
    expected: &Pubkey,
) -> bool {
    verify(
        SCHEDULE_SEED,
        &[beneficiary.as_ref(), vesting_account.as_ref()],
        bump,
        program_id,
        expected,
    )
}

/// Associated token account of `owner` for `mint` (SPL Token).
pub fn associated_holding(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seeds: &[&[u8]] = &[
        owner.as_ref(),
        anchor_spl::token::ID.as_ref(),
        mint.as_ref(),
    ];
    let (ata, _) = Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID);
    ata
}
