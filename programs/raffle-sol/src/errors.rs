use anchor_lang::prelude::*;

/// Error codes for the raffle program.
///
/// Anchor encodes these as `6000 + variant index` in on-chain error responses.
#[error_code]
pub enum RaffleError {
    /// The payment accompanying an entry is below the configured entrance fee.
    #[msg("Payment does not meet the entrance fee")]
    InsufficientFee,
    /// An entry was attempted while the raffle is not in the Open phase.
    #[msg("Currently not accepting participants")]
    NotOpen,
    /// `perform_upkeep` was called while the upkeep predicate is false.
    #[msg("Upkeep is not needed")]
    UpkeepNotNeeded,
    /// Fulfillment carried a request id that is absent, mismatched, or already consumed.
    #[msg("Nonexistent or already consumed randomness request")]
    UnknownRequest,
    /// Moving lamports out of the pool vault failed.
    #[msg("Payout transfer failed")]
    TransferFailed,
    /// A participant query referenced an index beyond the current entry count.
    #[msg("Participant index out of range")]
    IndexOutOfRange,
    /// The winner account passed with the fulfillment is not the selected participant.
    #[msg("Winner account does not match the selected participant")]
    WinnerMismatch,
    /// The treasury account does not match the configured treasury.
    #[msg("Treasury does not match the raffle configuration")]
    TreasuryMismatch,
    /// Signer does not have permission for this action (wrong oracle authority).
    #[msg("Unauthorized")]
    Unauthorized,
    /// A public key argument was the zero address (`11111111111111111111111111111111`).
    #[msg("Zero address not allowed")]
    ZeroAddressNotAllowed,
    /// The entrance fee must be strictly positive.
    #[msg("Entrance fee must be strictly positive")]
    InvalidEntranceFee,
    /// The payout fraction must satisfy `0 < numerator <= denominator`.
    #[msg("Invalid payout fraction")]
    InvalidPayoutFraction,
    /// A randomness request was issued while another is still outstanding.
    #[msg("A randomness request is already outstanding")]
    RequestAlreadyPending,
    /// The request counter would overflow u64 (practically unreachable).
    #[msg("Request counter overflow")]
    CounterOverflow,
    /// Pool or payout arithmetic overflowed.
    #[msg("Arithmetic overflow")]
    MathOverflow,
    /// The Ed25519 instruction at index 0 could not be loaded or is malformed.
    #[msg("Invalid Ed25519 instruction")]
    InvalidEd25519Instruction,
    /// The instruction at index 0 does not target the native Ed25519 program.
    #[msg("Invalid Ed25519 program")]
    InvalidEd25519Program,
    /// Expected exactly one signature in the Ed25519 instruction.
    #[msg("Invalid signature count")]
    InvalidSignatureCount,
    /// The public key in the Ed25519 instruction does not match the oracle authority.
    #[msg("Invalid Ed25519 pubkey")]
    InvalidEd25519Pubkey,
    /// The signed message does not match `request_id || randomness`.
    #[msg("Invalid Ed25519 message")]
    InvalidEd25519Message,
    /// Ed25519 instruction offset indices must be self-referencing (0xFFFF).
    #[msg("Invalid Ed25519 instruction index references")]
    InvalidEd25519InstructionIndex,
}
