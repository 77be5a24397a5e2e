//! Randomness request bookkeeping.
//!
//! The raffle never blocks on the oracle: `perform_upkeep` records an
//! outstanding request id and returns, and the oracle later submits the
//! random value through an independent fulfillment transaction. This module
//! owns the request-id ledger that bridges the two sides — ids are unique
//! (monotonic counter), at most one request is outstanding at a time, and a
//! redeemed id can never be redeemed again.

use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::errors::RaffleError;

/// Request-id ledger embedded in the raffle state account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug)]
pub struct RandomnessGateway {
    /// Monotonically increasing source of unique request identifiers.
    pub request_counter: u64,
    /// The request currently awaiting fulfillment. `None` while Open,
    /// `Some` while Calculating.
    pub pending_request: Option<u64>,
}

impl RandomnessGateway {
    /// Serialized size: counter (8) + optional pending id (1 + 8).
    pub const SPACE: usize = 8 + 1 + 8;

    /// Register interest in a random value and return the request id the
    /// fulfillment must carry back.
    pub fn issue(&mut self) -> Result<u64> {
        require!(
            self.pending_request.is_none(),
            RaffleError::RequestAlreadyPending
        );

        let request_id = self.request_counter;
        self.request_counter = self
            .request_counter
            .checked_add(1)
            .ok_or(RaffleError::CounterOverflow)?;
        self.pending_request = Some(request_id);

        Ok(request_id)
    }

    /// Consume the outstanding request.
    ///
    /// Succeeds at most once per issued id: a mismatched id, an id from a
    /// prior round, or a second redemption of the same id all fail with
    /// [`RaffleError::UnknownRequest`].
    pub fn redeem(&mut self, request_id: u64) -> Result<()> {
        match self.pending_request {
            Some(outstanding) if outstanding == request_id => {
                self.pending_request = None;
                Ok(())
            }
            _ => err!(RaffleError::UnknownRequest),
        }
    }
}

/// Derive the entropy seed published with a randomness request.
///
/// ```text
/// seed = SHA-256(request_id_le || timestamp_le || num_entries_le || last_winner)
/// ```
///
/// Binds the request to the round state at issue time so the oracle cannot
/// precompute outputs across rounds.
pub fn derive_request_seed(
    request_id: u64,
    timestamp: i64,
    num_entries: u64,
    last_winner: &Pubkey,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(request_id.to_le_bytes());
    hasher.update(timestamp.to_le_bytes());
    hasher.update(num_entries.to_le_bytes());
    hasher.update(last_winner.to_bytes());
    let hash = hasher.finalize();

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&hash);
    seed
}
