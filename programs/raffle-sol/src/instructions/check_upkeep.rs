use anchor_lang::prelude::*;

use crate::state::Raffle;

/// Accounts required to evaluate the upkeep predicate. Read-only.
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(seeds = [Raffle::SEED], bump = raffle.bump)]
    pub raffle: Account<'info, Raffle>,
}

/// Evaluate whether the round may advance.
///
/// Side-effect free so schedulers can poll it by simulation. `check_data`
/// is accepted for Automation-style callers and ignored.
pub fn handler(ctx: Context<CheckUpkeep>, _check_data: Vec<u8>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.raffle.upkeep_needed(now))
}
