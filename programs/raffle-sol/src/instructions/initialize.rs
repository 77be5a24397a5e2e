use anchor_lang::prelude::*;

use crate::errors::RaffleError;
use crate::gateway::RandomnessGateway;
use crate::state::{LotteryPhase, Raffle, RaffleConfig};

/// Accounts required to initialize the raffle singleton.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The deployer; pays for account creation.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The oracle's Ed25519 public key that will sign fulfillment proofs.
    /// CHECK: Stored as configuration; validated to be non-zero.
    pub vrf_authority: UncheckedAccount<'info>,

    /// Recipient of the retained share at payout time.
    /// CHECK: Stored as configuration; validated to be non-zero.
    pub treasury: UncheckedAccount<'info>,

    /// Singleton raffle state PDA. Seeds: `["raffle-state"]`.
    #[account(
        init,
        payer = admin,
        space = Raffle::space_for(0),
        seeds = [Raffle::SEED],
        bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// System-owned pool vault PDA; holds entry payments until payout.
    #[account(seeds = [Raffle::VAULT_SEED], bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Initialize the raffle with its immutable configuration.
///
/// The parameters are fixed for the contract's lifetime; there is no
/// update path for raffle economics.
#[allow(clippy::too_many_arguments)]
pub fn handler(
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
    require!(entrance_fee > 0, RaffleError::InvalidEntranceFee);
    require!(
        payout_numerator > 0 && payout_numerator <= payout_denominator,
        RaffleError::InvalidPayoutFraction
    );
    require!(
        ctx.accounts.vrf_authority.key() != Pubkey::default(),
        RaffleError::ZeroAddressNotAllowed
    );
    require!(
        ctx.accounts.treasury.key() != Pubkey::default(),
        RaffleError::ZeroAddressNotAllowed
    );

    let raffle = &mut ctx.accounts.raffle;
    raffle.config = RaffleConfig {
        entrance_fee,
        interval,
        payout_numerator,
        payout_denominator,
        vrf_authority: ctx.accounts.vrf_authority.key(),
        treasury: ctx.accounts.treasury.key(),
        gas_lane,
        subscription_id,
        callback_gas_limit,
        request_confirmations,
    };
    raffle.phase = LotteryPhase::Open;
    raffle.last_timestamp = Clock::get()?.unix_timestamp;
    raffle.pool_balance = 0;
    raffle.gateway = RandomnessGateway::default();
    raffle.last_winner = Pubkey::default();
    raffle.bump = ctx.bumps.raffle;
    raffle.vault_bump = ctx.bumps.vault;
    raffle.entries = Vec::new();

    Ok(())
}
