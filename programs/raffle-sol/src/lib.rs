use anchor_lang::prelude::*;

pub mod ed25519;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod instructions;
pub mod payout;
pub mod state;

use instructions::*;

declare_id!("HEMwUuEhfibYCG5Gh8nXqirMVczktraTjumyUVdp6aeo");

/// Autonomous on-chain raffle backed by an external VRF oracle.
///
/// Participants pay a fixed entrance fee while the round is Open. Once the
/// configured interval has elapsed with at least one entry, anyone may fire
/// the upkeep trigger: the round flips to Calculating and a randomness
/// request is published for the off-chain oracle. The oracle eventually
/// submits the random value with an Ed25519 proof; the program pays the
/// selected winner their share of the pool, sends the remainder to the
/// treasury, and reopens with a fresh round.
///
/// ## Round lifecycle
///
/// 1. **Enter** — `enter_lottery` admits entries while Open; repeated
///    entries by the same identity are independent tickets.
/// 2. **Trigger** — `check_upkeep` is the side-effect-free poll;
///    `perform_upkeep` re-validates the same predicate atomically with the
///    Open -> Calculating transition and emits [`events::RandomWinnerRequested`].
/// 3. **Fulfill** — the oracle calls `fulfill_random_words` with the request
///    id and random value; the winner is `random_value mod entry_count`.
///    The round resets to Open in the same instruction.
///
/// There is deliberately no path out of Calculating other than a successful
/// fulfillment: oracle silence strands the round.
#[program]
pub mod raffle_sol {
    use super::*;

    /// Create the singleton raffle PDA with its immutable configuration.
    ///
    /// Must be called exactly once. The gas lane, subscription, callback gas
    /// limit, and confirmation depth are opaque oracle parameters republished
    /// with every randomness request.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        ctx: Context<Initialize>,
        entrance_fee: u64,
        interval: i64,
        payout_numerator: u64,
        payout_denominator: u64,
        gas_lane: [u8; 32],
        subscription_id: u64,
        callback_gas_limit: u32,
        request_confirmations: u16,
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            entrance_fee,
            interval,
            payout_numerator,
            payout_denominator,
            gas_lane,
            subscription_id,
            callback_gas_limit,
            request_confirmations,
        )
    }

    /// Enter the current round by paying at least the entrance fee.
    pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
        instructions::enter_lottery::handler(ctx, amount)
    }

    /// Evaluate the upkeep predicate without side effects.
    pub fn check_upkeep(ctx: Context<CheckUpkeep>, check_data: Vec<u8>) -> Result<bool> {
        instructions::check_upkeep::handler(ctx, check_data)
    }

    /// Fire the upkeep trigger: flip to Calculating and request randomness.
    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        instructions::perform_upkeep::handler(ctx, perform_data)
    }

    /// Fulfill the outstanding randomness request and settle the round.
    ///
    /// Only callable by the configured oracle authority with a preceding
    /// Ed25519 signature-verify instruction in the same transaction.
    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        randomness: [u8; 32],
    ) -> Result<()> {
        instructions::fulfill_random_words::handler(ctx, request_id, randomness)
    }

    /// The participant at `index` in entry order.
    pub fn get_participant(ctx: Context<QueryRaffle>, index: u64) -> Result<Pubkey> {
        instructions::queries::participant_handler(ctx, index)
    }

    /// The number of entries in the current round.
    pub fn get_number_of_participants(ctx: Context<QueryRaffle>) -> Result<u64> {
        instructions::queries::count_handler(ctx)
    }
}
