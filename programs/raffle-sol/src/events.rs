use anchor_lang::prelude::*;

/// Emitted when a participant successfully enters the current round.
#[event]
pub struct LotteryEntered {
    pub player: Pubkey,
    pub amount: u64,
    pub total_entries: u64,
}

/// Emitted when upkeep fires and a randomness request is issued.
///
/// The off-chain oracle subscribes to these events and fulfills the request
/// via `fulfill_random_words`. Everything beyond `request_id` and `seed` is
/// opaque pass-through the oracle honors when producing the random value.
#[event]
pub struct RandomWinnerRequested {
    pub request_id: u64,
    pub seed: [u8; 32],
    pub gas_lane: [u8; 32],
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
    pub request_confirmations: u16,
    pub num_participants: u64,
    pub pool_balance: u64,
    pub request_timestamp: i64,
}

/// Emitted when a fulfillment selects a winner and the round resets.
#[event]
pub struct WinnerPicked {
    pub request_id: u64,
    pub winner: Pubkey,
    pub winner_share: u64,
    pub retained_share: u64,
}
