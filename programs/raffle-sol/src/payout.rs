//! Pool split arithmetic.
//!
//! The winner share is an explicit rational of the pool; division truncates,
//! so the rounding remainder always lands in the retained share.

use anchor_lang::prelude::*;

use crate::errors::RaffleError;

/// Split the pool into `(winner_share, retained_share)`.
///
/// ```text
/// winner_share   = pool_balance * numerator / denominator   (truncating)
/// retained_share = pool_balance - winner_share
/// ```
///
/// The multiplication is widened to u128 so a full-u64 pool cannot overflow.
pub fn split_pool(pool_balance: u64, numerator: u64, denominator: u64) -> Result<(u64, u64)> {
    let winner_share = (pool_balance as u128)
        .checked_mul(numerator as u128)
        .ok_or(RaffleError::MathOverflow)?
        .checked_div(denominator as u128)
        .ok_or(RaffleError::MathOverflow)?;
    let winner_share = u64::try_from(winner_share).map_err(|_| RaffleError::MathOverflow)?;

    let retained_share = pool_balance
        .checked_sub(winner_share)
        .ok_or(RaffleError::MathOverflow)?;

    Ok((winner_share, retained_share))
}
