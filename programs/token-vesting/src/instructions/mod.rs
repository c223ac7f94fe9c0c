pub mod claim_tokens;
pub mod create_employee_schedule;
pub mod create_vesting_account;
pub mod quote_claim;

pub use claim_tokens::*;
pub use create_employee_schedule::*;
pub use create_vesting_account::*;
pub use quote_claim::*;
