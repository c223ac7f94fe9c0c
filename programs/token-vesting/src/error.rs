use anchor_lang::prelude::*;

/// Custom error codes for the token vesting program.
///
/// Codes are stable: new variants go at the end.
#[error_code]
pub enum VestingError {
    #[msg("A record already exists at the derived address")]
    DuplicateRecord,

    #[msg("Vesting program name exceeds 50 bytes")]
    NameTooLong,

    #[msg("Vesting program name is empty")]
    EmptyName,

    #[msg("Invalid token mint")]
    InvalidAsset,

    #[msg("Unauthorized: signer does not hold the required role")]
    Unauthorized,

    #[msg("Presented accounts do not match the stored records")]
    RecordMismatch,

    #[msg("Record not found")]
    RecordNotFound,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Invalid schedule times: require start <= cliff <= end and start < end")]
    InvalidScheduleTimes,

    #[msg("Invalid beneficiary")]
    InvalidBeneficiary,

    #[msg("Claim not available before the cliff")]
    ClaimNotAvailableYet,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Insufficient custody balance")]
    InsufficientCustodyFunds,

    #[msg("Custody transfer failed")]
    CustodyTransferFailed,

    #[msg("Arithmetic overflow or zero-duration schedule")]
    ArithmeticFault,

    #[msg("Withdrawn total exceeds vested amount")]
    WithdrawnExceedsVested,
}
