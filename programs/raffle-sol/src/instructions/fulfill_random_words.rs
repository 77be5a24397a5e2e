use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as sysvar_instructions;
use anchor_lang::system_program;

use crate::ed25519::verify_fulfillment_proof;
use crate::errors::RaffleError;
use crate::events::WinnerPicked;
use crate::payout;
use crate::state::Raffle;

/// Accounts required to fulfill the outstanding randomness request.
///
/// The transaction **must** include a native Ed25519 signature-verify
/// instruction at index 0 that proves the configured oracle authority signed
/// `request_id (8 LE) || randomness (32)`; this is validated on-chain by
/// inspecting the Instructions sysvar.
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// Oracle authority submitting the fulfillment. Must match
    /// `raffle.config.vrf_authority`.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Raffle state PDA; must hold the outstanding request being fulfilled.
    #[account(
        mut,
        seeds = [Raffle::SEED],
        bump = raffle.bump,
        constraint = raffle.config.vrf_authority == authority.key() @ RaffleError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Pool vault paying out the round.
    #[account(mut, seeds = [Raffle::VAULT_SEED], bump = raffle.vault_bump)]
    pub vault: SystemAccount<'info>,

    /// The selected participant's account. The oracle derives it the same
    /// way the program does (`random_value mod entry_count`).
    /// CHECK: Validated in the handler against the selected entry.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// Recipient of the retained share.
    /// CHECK: Validated by the constraint below.
    #[account(
        mut,
        constraint = treasury.key() == raffle.config.treasury @ RaffleError::TreasuryMismatch,
    )]
    pub treasury: UncheckedAccount<'info>,

    /// Native Instructions sysvar used to introspect the Ed25519 instruction.
    /// CHECK: Validated by the address constraint.
    #[account(address = sysvar_instructions::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Fulfill the outstanding randomness request and settle the round.
///
/// 1. Verifies the Ed25519 signature proof in the preceding instruction.
/// 2. Redeems `request_id` against the outstanding request — absent,
///    mismatched, or already-consumed ids fail with `UnknownRequest`.
/// 3. Selects `entries[random_value mod entry_count]` as the winner.
/// 4. Splits the pool and transfers both shares out of the vault. A failed
///    movement aborts the whole instruction, leaving the round in
///    Calculating with the request outstanding so the oracle can retry.
/// 5. Resets the round and emits [`WinnerPicked`].
pub fn handler(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    randomness: [u8; 32],
) -> Result<()> {
    verify_fulfillment_proof(
        &ctx.accounts.instructions_sysvar,
        &ctx.accounts.raffle.config.vrf_authority,
        request_id,
        &randomness,
    )?;

    ctx.accounts.raffle.gateway.redeem(request_id)?;

    let mut value_bytes = [0u8; 8];
    value_bytes.copy_from_slice(&randomness[..8]);
    let random_value = u64::from_le_bytes(value_bytes);

    let (winner_index, winner_key) = ctx.accounts.raffle.winner_of(random_value)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner_key,
        RaffleError::WinnerMismatch
    );

    let (winner_share, retained_share) = payout::split_pool(
        ctx.accounts.raffle.pool_balance,
        ctx.accounts.raffle.config.payout_numerator,
        ctx.accounts.raffle.config.payout_denominator,
    )?;

    let vault_bump = [ctx.accounts.raffle.vault_bump];
    let vault_seeds: &[&[u8]] = &[Raffle::VAULT_SEED, &vault_bump];

    if winner_share > 0 {
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.winner.to_account_info(),
                },
                &[vault_seeds],
            ),
            winner_share,
        )
        .map_err(|_| error!(RaffleError::TransferFailed))?;
    }

    if retained_share > 0 {
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.treasury.to_account_info(),
                },
                &[vault_seeds],
            ),
            retained_share,
        )
        .map_err(|_| error!(RaffleError::TransferFailed))?;
    }

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.raffle.settle(winner_key, now);

    emit!(WinnerPicked {
        request_id,
        winner: winner_key,
        winner_share,
        retained_share,
    });

    msg!(
        "Winner picked: index={} request_id={} winner_share={}",
        winner_index,
        request_id,
        winner_share
    );
    Ok(())
}
