use anchor_lang::prelude::*;

use crate::errors::RaffleError;
use crate::gateway::RandomnessGateway;

/// Lifecycle phase of the current round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LotteryPhase {
    /// Accepting entries; no randomness request outstanding.
    Open,
    /// Entries closed; exactly one randomness request outstanding.
    Calculating,
}

/// One weighted ticket: the paying identity plus the lamports it paid.
///
/// Entries are not deduplicated — the same identity may enter any number of
/// times, and each entry is an independent ticket in the draw.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Entry {
    pub player: Pubkey,
    pub amount: u64,
}

impl Entry {
    /// Serialized size: player (32) + amount (8).
    pub const SPACE: usize = 32 + 8;
}

/// Immutable raffle parameters, fixed at initialization.
///
/// The `gas_lane`, `subscription_id`, `callback_gas_limit`, and
/// `request_confirmations` fields are opaque to the raffle itself; they are
/// republished with every randomness request for the oracle to honor.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RaffleConfig {
    /// Minimum lamports a participant must pay per entry. Strictly positive.
    pub entrance_fee: u64,
    /// Minimum seconds between round start and upkeep eligibility.
    pub interval: i64,
    /// Winner share numerator of the pool split.
    pub payout_numerator: u64,
    /// Winner share denominator of the pool split.
    pub payout_denominator: u64,
    /// Oracle key that signs fulfillment proofs.
    pub vrf_authority: Pubkey,
    /// Recipient of the retained share at payout time.
    pub treasury: Pubkey,
    /// Oracle gas lane / key hash, passed through with each request.
    pub gas_lane: [u8; 32],
    /// Oracle fee subscription, passed through with each request.
    pub subscription_id: u64,
    /// Work budget for the oracle callback, passed through with each request.
    pub callback_gas_limit: u32,
    /// Confirmation depth the oracle waits for, passed through with each request.
    pub request_confirmations: u16,
}

impl RaffleConfig {
    /// Serialized size:
    /// entrance_fee (8) + interval (8) + payout_numerator (8) +
    /// payout_denominator (8) + vrf_authority (32) + treasury (32) +
    /// gas_lane (32) + subscription_id (8) + callback_gas_limit (4) +
    /// request_confirmations (2).
    pub const SPACE: usize = 8 + 8 + 8 + 8 + 32 + 32 + 32 + 8 + 4 + 2;
}

/// The raffle singleton: one round of state at a time.
///
/// Seeds: `["raffle-state"]`
///
/// `entries` is the last field so each admission grows the account by exactly
/// one [`Entry`] via realloc — there is no participant cap.
#[account]
pub struct Raffle {
    /// Immutable parameters set at initialization.
    pub config: RaffleConfig,
    /// Current phase of the round.
    pub phase: LotteryPhase,
    /// Round start timestamp (unix seconds).
    pub last_timestamp: i64,
    /// Lamports credited to the current round; equals the sum of entry
    /// amounts at all times except inside the payout transfer.
    pub pool_balance: u64,
    /// Request-id ledger for the asynchronous oracle boundary.
    pub gateway: RandomnessGateway,
    /// Most recent winner; default until the first payout.
    pub last_winner: Pubkey,
    /// PDA bump seed cached for efficient re-derivation.
    pub bump: u8,
    /// Bump seed of the pool vault PDA.
    pub vault_bump: u8,
    /// Insertion-ordered entries of the current round.
    pub entries: Vec<Entry>,
}

impl Raffle {
    pub const SEED: &'static [u8] = b"raffle-state";
    pub const VAULT_SEED: &'static [u8] = b"raffle-vault";

    /// Account size with zero entries:
    /// discriminator (8) + config + phase (1) + last_timestamp (8) +
    /// pool_balance (8) + gateway + last_winner (32) + bump (1) +
    /// vault_bump (1) + entries vec prefix (4).
    pub const BASE_SPACE: usize =
        8 + RaffleConfig::SPACE + 1 + 8 + 8 + RandomnessGateway::SPACE + 32 + 1 + 1 + 4;

    /// Total account size for a given entry count.
    pub fn space_for(entries: usize) -> usize {
        Self::BASE_SPACE + entries * Entry::SPACE
    }

    /// Admit one entry into the current round.
    ///
    /// The full `amount` is credited to the pool, not just the fee floor, so
    /// the pool invariant tracks what was actually paid in.
    pub fn admit(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(
            amount >= self.config.entrance_fee,
            RaffleError::InsufficientFee
        );
        require!(self.phase == LotteryPhase::Open, RaffleError::NotOpen);

        self.pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(RaffleError::MathOverflow)?;
        self.entries.push(Entry { player, amount });

        Ok(())
    }

    /// The upkeep predicate: true iff the round may advance right now.
    ///
    /// Read-only so external schedulers can poll it via simulation without
    /// side effects.
    pub fn upkeep_needed(&self, now: i64) -> bool {
        self.phase == LotteryPhase::Open
            && now.saturating_sub(self.last_timestamp) >= self.config.interval
            && self.pool_balance > 0
            && !self.entries.is_empty()
    }

    /// Transition Open -> Calculating and issue a randomness request.
    ///
    /// Re-evaluates the upkeep predicate in the same step as the transition,
    /// so a stale or forged off-chain evaluation cannot advance the round.
    pub fn begin_calculating(&mut self, now: i64) -> Result<u64> {
        require!(self.upkeep_needed(now), RaffleError::UpkeepNotNeeded);

        let request_id = self.gateway.issue()?;
        self.phase = LotteryPhase::Calculating;

        Ok(request_id)
    }

    /// Select the winning entry for a fulfilled random value.
    pub fn winner_of(&self, random_value: u64) -> Result<(u64, Pubkey)> {
        let count = self.entries.len() as u64;
        let index = random_value
            .checked_rem(count)
            .ok_or(RaffleError::IndexOutOfRange)?;

        Ok((index, self.entries[index as usize].player))
    }

    /// Complete the round: clear the registry, zero the pool, reopen, and
    /// stamp the next round's start time.
    pub fn settle(&mut self, winner: Pubkey, now: i64) {
        self.entries.clear();
        self.pool_balance = 0;
        self.phase = LotteryPhase::Open;
        self.last_timestamp = now;
        self.last_winner = winner;
    }

    /// The participant at `index`, in entry order.
    ///
    /// After a reset every index from the prior round is invalid.
    pub fn participant(&self, index: u64) -> Result<Pubkey> {
        self.entries
            .get(index as usize)
            .map(|entry| entry.player)
            .ok_or_else(|| error!(RaffleError::IndexOutOfRange))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout;
    use anchor_lang::error::Error;

    const FEE: u64 = 100;
    const INTERVAL: i64 = 300;
    const START: i64 = 1_000;

    fn pk(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn raffle() -> Raffle {
        Raffle {
            config: RaffleConfig {
                entrance_fee: FEE,
                interval: INTERVAL,
                payout_numerator: 4,
                payout_denominator: 5,
                vrf_authority: pk(0xAA),
                treasury: pk(0xBB),
                gas_lane: [0u8; 32],
                subscription_id: 1,
                callback_gas_limit: 500_000,
                request_confirmations: 3,
            },
            phase: LotteryPhase::Open,
            last_timestamp: START,
            pool_balance: 0,
            gateway: RandomnessGateway::default(),
            last_winner: Pubkey::default(),
            bump: 255,
            vault_bump: 254,
            entries: vec![],
        }
    }

    fn expect_err<T: std::fmt::Debug>(result: Result<T>, expected: RaffleError) {
        match result {
            Err(Error::AnchorError(e)) => {
                assert_eq!(e.error_code_number, u32::from(expected))
            }
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }

    #[test]
    fn admission_records_entry_and_balance() {
        let mut raffle = raffle();

        raffle.admit(pk(1), FEE).unwrap();
        raffle.admit(pk(2), FEE + 50).unwrap();

        assert_eq!(raffle.entries.len(), 2);
        assert_eq!(raffle.pool_balance, 2 * FEE + 50);
        assert_eq!(
            raffle.entries[1],
            Entry {
                player: pk(2),
                amount: FEE + 50
            }
        );
    }

    #[test]
    fn admission_rejects_underpayment_without_side_effects() {
        let mut raffle = raffle();

        expect_err(raffle.admit(pk(1), FEE - 1), RaffleError::InsufficientFee);

        assert!(raffle.entries.is_empty());
        assert_eq!(raffle.pool_balance, 0);
    }

    #[test]
    fn admission_rejects_while_calculating() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();
        raffle.begin_calculating(START + INTERVAL).unwrap();

        expect_err(raffle.admit(pk(2), FEE), RaffleError::NotOpen);
        assert_eq!(raffle.entries.len(), 1);
    }

    #[test]
    fn repeated_entries_by_one_identity_are_independent_tickets() {
        let mut raffle = raffle();

        for _ in 0..3 {
            raffle.admit(pk(9), FEE).unwrap();
        }

        assert_eq!(raffle.entries.len(), 3);
        assert_eq!(raffle.pool_balance, 3 * FEE);
    }

    #[test]
    fn upkeep_is_false_without_participants() {
        let raffle = raffle();

        // No amount of elapsed time qualifies an empty round.
        assert!(!raffle.upkeep_needed(START + INTERVAL * 1_000));
    }

    #[test]
    fn upkeep_is_false_before_interval_elapses() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();

        assert!(!raffle.upkeep_needed(START + INTERVAL - 1));
        assert!(raffle.upkeep_needed(START + INTERVAL));
    }

    #[test]
    fn upkeep_is_false_while_calculating() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();
        raffle.begin_calculating(START + INTERVAL).unwrap();

        assert!(!raffle.upkeep_needed(START + INTERVAL * 2));
    }

    #[test]
    fn trigger_rejects_when_predicate_is_false() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();

        expect_err(
            raffle.begin_calculating(START + INTERVAL - 1),
            RaffleError::UpkeepNotNeeded,
        );
        assert_eq!(raffle.phase, LotteryPhase::Open);
        assert_eq!(raffle.gateway.pending_request, None);
    }

    #[test]
    fn trigger_flips_phase_and_issues_fresh_request_ids() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();

        let first = raffle.begin_calculating(START + INTERVAL).unwrap();
        assert_eq!(raffle.phase, LotteryPhase::Calculating);
        assert_eq!(raffle.gateway.pending_request, Some(first));

        // Complete the round and run another; the id must be previously unseen.
        raffle.gateway.redeem(first).unwrap();
        raffle.settle(pk(1), START + INTERVAL);
        raffle.admit(pk(2), FEE).unwrap();
        let second = raffle.begin_calculating(START + 2 * INTERVAL).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn winner_selection_is_random_value_modulo_count() {
        let mut raffle = raffle();
        for byte in 1..=4u8 {
            raffle.admit(pk(byte), FEE).unwrap();
        }

        assert_eq!(raffle.winner_of(0).unwrap(), (0, pk(1)));
        assert_eq!(raffle.winner_of(5).unwrap(), (1, pk(2)));
        assert_eq!(raffle.winner_of(7).unwrap(), (3, pk(4)));
        assert_eq!(raffle.winner_of(u64::MAX).unwrap().0, u64::MAX % 4);
    }

    #[test]
    fn sole_identity_always_wins() {
        let mut raffle = raffle();
        for _ in 0..5 {
            raffle.admit(pk(3), FEE).unwrap();
        }

        for random_value in [0u64, 1, 4, 17, u64::MAX] {
            let (_, winner) = raffle.winner_of(random_value).unwrap();
            assert_eq!(winner, pk(3));
        }
    }

    #[test]
    fn settle_resets_the_round() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();
        let request_id = raffle.begin_calculating(START + INTERVAL).unwrap();
        raffle.gateway.redeem(request_id).unwrap();

        let reset_at = START + INTERVAL + 7;
        raffle.settle(pk(1), reset_at);

        assert!(raffle.entries.is_empty());
        assert_eq!(raffle.pool_balance, 0);
        assert_eq!(raffle.phase, LotteryPhase::Open);
        assert_eq!(raffle.last_timestamp, reset_at);
        assert_eq!(raffle.last_winner, pk(1));

        // A fresh round accepts entries again.
        raffle.admit(pk(2), FEE).unwrap();
        assert_eq!(raffle.entries.len(), 1);
    }

    #[test]
    fn participant_queries_fail_beyond_count_and_after_reset() {
        let mut raffle = raffle();
        raffle.admit(pk(1), FEE).unwrap();

        assert_eq!(raffle.participant(0).unwrap(), pk(1));
        expect_err(raffle.participant(1), RaffleError::IndexOutOfRange);

        let request_id = raffle.begin_calculating(START + INTERVAL).unwrap();
        raffle.gateway.redeem(request_id).unwrap();
        raffle.settle(pk(1), START + INTERVAL);

        expect_err(raffle.participant(0), RaffleError::IndexOutOfRange);
    }

    #[test]
    fn space_grows_by_one_entry_per_admission() {
        assert_eq!(
            Raffle::space_for(1),
            Raffle::BASE_SPACE + Entry::SPACE
        );
        assert_eq!(
            Raffle::space_for(10) - Raffle::space_for(9),
            Entry::SPACE
        );
    }

    // Fee 1, interval 300s, one entrant, random value 7: the whole round.
    #[test]
    fn single_entrant_round_end_to_end() {
        let mut raffle = raffle();
        raffle.config.entrance_fee = 1;
        raffle.last_timestamp = 0;

        raffle.admit(pk(0xA1), 1).unwrap();
        assert_eq!(raffle.pool_balance, 1);

        assert!(!raffle.upkeep_needed(299));
        assert!(raffle.upkeep_needed(301));

        let request_id = raffle.begin_calculating(301).unwrap();
        assert_eq!(raffle.phase, LotteryPhase::Calculating);

        raffle.gateway.redeem(request_id).unwrap();
        let (index, winner) = raffle.winner_of(7).unwrap();
        assert_eq!(index, 0); // 7 mod 1
        assert_eq!(winner, pk(0xA1));

        let (winner_share, retained_share) = payout::split_pool(
            raffle.pool_balance,
            raffle.config.payout_numerator,
            raffle.config.payout_denominator,
        )
        .unwrap();
        assert_eq!(winner_share, 0); // floor(1 * 4 / 5)
        assert_eq!(retained_share, 1);

        raffle.settle(winner, 301);
        assert_eq!(raffle.phase, LotteryPhase::Open);
        assert!(raffle.entries.is_empty());

        // The consumed request id is gone for good.
        expect_err(raffle.gateway.redeem(request_id), RaffleError::UnknownRequest);
    }
}
