use anchor_lang::prelude::*;

use crate::state::Raffle;

/// Accounts for read-only participant queries.
#[derive(Accounts)]
pub struct QueryRaffle<'info> {
    #[account(seeds = [Raffle::SEED], bump = raffle.bump)]
    pub raffle: Account<'info, Raffle>,
}

/// The participant at `index` in entry order; fails with `IndexOutOfRange`
/// beyond the current count, including every pre-reset index after a round
/// completes.
pub fn participant_handler(ctx: Context<QueryRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle.participant(index)
}

/// The number of entries in the current round.
pub fn count_handler(ctx: Context<QueryRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.entries.len() as u64)
}
