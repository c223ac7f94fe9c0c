//! Program-wide constants.

/// Max length of a vesting program name, in UTF-8 bytes.
pub const MAX_NAME_LEN: usize = 50;

/// Max length of a single PDA seed.
pub const MAX_SEED_LEN: usize = 32;

/// Namespace of a vesting program's own record.
pub const PROGRAM_SEED: &[u8] = b"vesting_program";

/// Namespace of a vesting program's custody (treasury) token account.
pub const TREASURY_SEED: &[u8] = b"vesting_treasury";

/// Namespace of per-beneficiary schedules.
pub const SCHEDULE_SEED: &[u8] = b"employee_schedule";
