pub mod accounts;
pub mod pda;
pub mod vesting_math;
