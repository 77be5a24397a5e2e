use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::events::LotteryEntered;
use crate::state::Raffle;

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct EnterLottery<'info> {
    /// The participant; pays the entrance fee and the rent delta for the
    /// grown state account.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Raffle state PDA, grown by one entry per admission.
    #[account(mut, seeds = [Raffle::SEED], bump = raffle.bump)]
    pub raffle: Account<'info, Raffle>,

    /// Pool vault receiving the payment.
    #[account(mut, seeds = [Raffle::VAULT_SEED], bump = raffle.vault_bump)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Enter the lottery by paying at least the entrance fee.
///
/// 1. Validates phase and payment against the raffle state.
/// 2. Grows the state account by one entry, topping up rent from the player.
///    There is no participant cap.
/// 3. Transfers `amount` lamports from the player to the pool vault.
/// 4. Emits [`LotteryEntered`].
pub fn handler(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.raffle.admit(player, amount)?;

    let raffle_info = ctx.accounts.raffle.to_account_info();
    let new_size = Raffle::space_for(ctx.accounts.raffle.entries.len());
    let rent_due = Rent::get()?
        .minimum_balance(new_size)
        .saturating_sub(raffle_info.lamports());
    if rent_due > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.player.to_account_info(),
                    to: raffle_info.clone(),
                },
            ),
            rent_due,
        )?;
    }
    // Serialization at exit rewrites the full resized span; no zero-fill.
    raffle_info.realloc(new_size, false)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        amount,
    )?;

    let total_entries = ctx.accounts.raffle.entries.len() as u64;
    emit!(LotteryEntered {
        player,
        amount,
        total_entries,
    });

    msg!("Entry admitted, total_entries={}", total_entries);
    Ok(())
}
