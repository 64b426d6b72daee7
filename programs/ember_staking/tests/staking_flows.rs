//! Multi-operation staking scenarios.
//!
//! Drives the pure settlement and transition functions the instruction
//! handlers commit with, using explicit timestamps, and checks the ledger
//! invariants the program maintains across operation sequences.

use anchor_lang::prelude::Pubkey;

use ember_staking::constants::{DEFAULT_POOL_PERIOD, MAX_UNSTAKE_SENTINEL};
use ember_staking::instructions::stake::{
    apply_deposit, resolve_referrer, settle_position, YieldSettlement,
};
use ember_staking::instructions::unstake::apply_withdraw;
use ember_staking::state::{ParticipantRecord, Pool, StakePosition};

const PERIOD: i64 = DEFAULT_POOL_PERIOD;
const T0: i64 = 1_700_000_000;
const REFERRER_PERCENT: u64 = 5;

fn pool(id: u64, apy_percent: u64) -> Pool {
    Pool {
        id,
        apy_percent,
        period: PERIOD,
        total_staked: 0,
        paused: false,
        paused_at: 0,
        bump: 255,
    }
}

fn empty_position(owner: Pubkey, pool_id: u64) -> StakePosition {
    StakePosition {
        owner,
        pool_id,
        principal: 0,
        last_rollover_at: 0,
        unlock_at: 0,
        bump: 255,
    }
}

fn deposit(pool: &mut Pool, position: &mut StakePosition, amount: u64, now: i64) -> YieldSettlement {
    let settlement = settle_position(position, pool, REFERRER_PERCENT, now).unwrap();
    apply_deposit(pool, position, &settlement, amount, now).unwrap();
    settlement
}

fn assert_pool_tracks_principals(pool: &Pool, positions: &[&StakePosition]) {
    let live: u64 = positions.iter().map(|p| p.principal).sum();
    assert_eq!(pool.total_staked, live);
}

#[test]
fn end_to_end_ten_period_stake_and_full_exit() {
    let staker = Pubkey::new_unique();
    let mut pool = pool(0, 12);
    let mut position = empty_position(staker, 0);

    // stake 1000 tokens (8 decimals) at t0
    deposit(&mut pool, &mut position, 100_000_000_000, T0);
    assert_eq!(position.principal, 100_000_000_000);
    assert_eq!(position.unlock_at, T0 + PERIOD);
    assert_pool_tracks_principals(&pool, &[&position]);

    // ten whole periods later the projection shows the compounded value
    let now = T0 + 10 * PERIOD;
    let projection = settle_position(&position, &pool, REFERRER_PERCENT, now).unwrap();
    assert_eq!(projection.compounded, 110_462_212_541);

    // full exit: staker receives the compounded value, the referrer their
    // share of the yield, and the record resets to empty
    assert!(position.is_unlocked(now));
    let settlement = settle_position(&position, &pool, REFERRER_PERCENT, now).unwrap();
    let withdraw =
        apply_withdraw(&mut pool, &mut position, &settlement, MAX_UNSTAKE_SENTINEL, now).unwrap();

    assert_eq!(withdraw, 110_462_212_541);
    assert_eq!(settlement.accrued, 10_462_212_541);
    assert_eq!(settlement.referrer_cut, 523_110_627);
    assert_eq!(position.principal, 0);
    assert_eq!(position.last_rollover_at, 0);
    assert_eq!(position.unlock_at, 0);
    assert_pool_tracks_principals(&pool, &[&position]);
}

#[test]
fn top_up_then_partial_then_full_exit() {
    let staker = Pubkey::new_unique();
    let mut pool = pool(0, 12);
    let mut position = empty_position(staker, 0);

    deposit(&mut pool, &mut position, 5_000_000_000, T0);

    // top-up after three periods settles the accrued yield first
    let topup_at = T0 + 3 * PERIOD;
    let settlement = deposit(&mut pool, &mut position, 5_000_000_000, topup_at);
    assert_eq!(settlement.compounded, 5_151_504_999);
    assert_eq!(settlement.referrer_cut, 7_575_249);
    assert_eq!(position.principal, 10_151_504_999);
    assert_eq!(position.unlock_at, topup_at + PERIOD);
    assert_pool_tracks_principals(&pool, &[&position]);

    // partial withdrawal two periods later leaves the remainder staked and
    // the unlock time untouched
    let exit_at = topup_at + 2 * PERIOD;
    assert!(position.is_unlocked(exit_at));
    let settlement = settle_position(&position, &pool, REFERRER_PERCENT, exit_at).unwrap();
    assert_eq!(settlement.compounded, 10_355_550_249);
    assert_eq!(settlement.referrer_cut, 10_202_262);

    let withdraw =
        apply_withdraw(&mut pool, &mut position, &settlement, 355_550_249, exit_at).unwrap();
    assert_eq!(withdraw, 355_550_249);
    assert_eq!(position.principal, 10_000_000_000);
    assert_eq!(position.unlock_at, topup_at + PERIOD);
    assert_pool_tracks_principals(&pool, &[&position]);

    // the rest leaves with the sentinel; no further period has elapsed so
    // no new yield settles
    let settlement = settle_position(&position, &pool, REFERRER_PERCENT, exit_at).unwrap();
    assert_eq!(settlement.accrued, 0);
    let withdraw =
        apply_withdraw(&mut pool, &mut position, &settlement, MAX_UNSTAKE_SENTINEL, exit_at)
            .unwrap();
    assert_eq!(withdraw, 10_000_000_000);
    assert_eq!(position.principal, 0);
    assert_eq!(pool.total_staked, 0);
}

#[test]
fn two_stakers_one_pool_invariant_holds_throughout() {
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let mut pool = pool(0, 24);
    let mut alice_position = empty_position(alice, 0);
    let mut bob_position = empty_position(bob, 0);

    deposit(&mut pool, &mut alice_position, 20_000_000_000, T0);
    deposit(&mut pool, &mut bob_position, 7_000_000_000, T0 + PERIOD);
    assert_pool_tracks_principals(&pool, &[&alice_position, &bob_position]);

    // alice exits after five periods; bob's stake is untouched
    let now = T0 + 5 * PERIOD;
    let settlement = settle_position(&alice_position, &pool, REFERRER_PERCENT, now).unwrap();
    assert_eq!(settlement.compounded, 22_081_616_063);
    apply_withdraw(
        &mut pool,
        &mut alice_position,
        &settlement,
        MAX_UNSTAKE_SENTINEL,
        now,
    )
    .unwrap();

    assert_eq!(bob_position.principal, 7_000_000_000);
    assert_pool_tracks_principals(&pool, &[&alice_position, &bob_position]);

    // bob tops up; the pool keeps tracking both records through growth
    deposit(&mut pool, &mut bob_position, 1_000_000_000, now);
    assert_pool_tracks_principals(&pool, &[&alice_position, &bob_position]);
}

#[test]
fn rate_change_applies_to_the_next_rollover_only() {
    let staker = Pubkey::new_unique();
    let mut pool = pool(0, 12);
    let mut position = empty_position(staker, 0);

    deposit(&mut pool, &mut position, 100_000_000_000, T0);

    // admin doubles the rate; the stored stake is unchanged
    pool.apy_percent = 24;
    assert_eq!(position.principal, 100_000_000_000);

    // the next settlement compounds at the new rate (2% per period)
    let settlement =
        settle_position(&position, &pool, REFERRER_PERCENT, T0 + PERIOD).unwrap();
    assert_eq!(settlement.compounded, 101_999_999_999);
}

#[test]
fn paused_pool_freezes_accrual_but_allows_exit() {
    let staker = Pubkey::new_unique();
    let mut pool = pool(0, 12);
    let mut position = empty_position(staker, 0);

    deposit(&mut pool, &mut position, 100_000_000_000, T0);

    // pause after two periods
    pool.paused = true;
    pool.paused_at = T0 + 2 * PERIOD;

    // much later, only the pre-pause periods have accrued
    let now = T0 + 12 * PERIOD;
    let frozen = settle_position(&position, &pool, REFERRER_PERCENT, now).unwrap();
    let two_periods = ember_staking::math::compound(100_000_000_000, 12, 12, 2).unwrap();
    assert_eq!(frozen.compounded, two_periods);

    // withdrawal still works against the frozen value
    let withdraw =
        apply_withdraw(&mut pool, &mut position, &frozen, MAX_UNSTAKE_SENTINEL, now).unwrap();
    assert_eq!(withdraw, two_periods);
    assert_eq!(pool.total_staked, 0);
}

#[test]
fn referral_binding_over_a_growing_registry() {
    let treasury = Pubkey::new_unique();
    let mut registry: Vec<ParticipantRecord> = Vec::new();

    let join = |staker: Pubkey, referral_index: u64, registry: &mut Vec<ParticipantRecord>| {
        registry.push(ParticipantRecord {
            index: registry.len() as u64 + 1,
            staker,
        });
        let claimed = if referral_index >= 1 && referral_index <= registry.len() as u64 {
            Some(&registry[(referral_index - 1) as usize])
        } else {
            None
        };
        resolve_referrer(
            referral_index,
            claimed,
            registry.len() as u64,
            &staker,
            treasury,
        )
    };

    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let carol = Pubkey::new_unique();

    // empty registry: any index falls back to the treasury
    assert_eq!(join(alice, 7, &mut registry), treasury);
    // bob names alice's index
    assert_eq!(join(bob, 1, &mut registry), alice);
    // carol names her own just-assigned index: self-reference falls back
    assert_eq!(join(carol, 3, &mut registry), treasury);

    assert_eq!(registry.len(), 3);
    assert_eq!(registry[1].staker, bob);
}
