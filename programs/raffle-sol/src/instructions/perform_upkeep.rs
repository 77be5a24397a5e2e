use anchor_lang::prelude::*;

use crate::events::RandomWinnerRequested;
use crate::gateway;
use crate::state::Raffle;

/// Accounts required to fire the upkeep trigger. Anyone may call; the
/// predicate, not the caller, gates the transition.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(mut, seeds = [Raffle::SEED], bump = raffle.bump)]
    pub raffle: Account<'info, Raffle>,
}

/// Advance the round to Calculating and request randomness.
///
/// Re-validates the upkeep predicate against the current clock in the same
/// instruction as the transition, then issues a request id and emits
/// [`RandomWinnerRequested`] for the off-chain oracle. `perform_data` is
/// accepted for Automation-style callers and ignored.
pub fn handler(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let raffle = &mut ctx.accounts.raffle;
    let request_id = raffle.begin_calculating(now)?;

    let seed = gateway::derive_request_seed(
        request_id,
        now,
        raffle.entries.len() as u64,
        &raffle.last_winner,
    );

    emit!(RandomWinnerRequested {
        request_id,
        seed,
        gas_lane: raffle.config.gas_lane,
        subscription_id: raffle.config.subscription_id,
        callback_gas_limit: raffle.config.callback_gas_limit,
        request_confirmations: raffle.config.request_confirmations,
        num_participants: raffle.entries.len() as u64,
        pool_balance: raffle.pool_balance,
        request_timestamp: now,
    });

    msg!("Upkeep performed, request_id={}", request_id);
    Ok(())
}
