//! Unstake instruction handler.
//!
//! Withdrawals force a settlement of accrued yield first, pay the referral
//! share from the vault, and clamp the requested amount to the compounded
//! value (`u64::MAX` withdraws everything).

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::instructions::stake::{
    pay_referrer, settle_position, transfer_from_vault, YieldSettlement,
};
use crate::state::{Pool, ReferralRecord, StakePosition, StakingConfig};

/// Accounts required for unstaking.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Unstake<'info> {
    /// The user withdrawing tokens.
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, StakingConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump,
        constraint = pool_id < config.pool_count @ StakingError::PoolNotFound
    )]
    pub pool: Account<'info, Pool>,

    /// User's stake position in this pool.
    #[account(
        mut,
        seeds = [POSITION_SEED, &pool_id.to_le_bytes(), staker.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == staker.key() @ StakingError::Unauthorized
    )]
    pub position: Account<'info, StakePosition>,

    /// User's referral binding, set at their first stake.
    #[account(
        seeds = [REFERRAL_SEED, staker.key().as_ref()],
        bump = referral_record.bump
    )]
    pub referral_record: Account<'info, ReferralRecord>,

    /// User's token account for receiving the withdrawal.
    #[account(
        mut,
        constraint = staker_token_account.mint == config.staking_mint @ StakingError::MintMismatch,
        constraint = staker_token_account.owner == staker.key()
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    /// The program's staking vault.
    #[account(mut, address = config.staking_vault)]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Destination for the referral share of newly accrued yield. Required
    /// whenever the settlement produces a non-zero referral cut.
    #[account(mut)]
    pub referrer_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Commit a withdrawal on top of a settled position.
///
/// The requested amount clamps to the compounded value. A full withdrawal
/// zeroes the record; a partial one keeps the existing unlock time, since
/// only deposits reset the lock. `pool.total_staked` absorbs the
/// compounding growth before the withdrawal is subtracted, so it keeps
/// tracking the sum of live principals.
///
/// Returns the amount actually withdrawn.
pub fn apply_withdraw(
    pool: &mut Pool,
    position: &mut StakePosition,
    settlement: &YieldSettlement,
    requested: u64,
    now: i64,
) -> Result<u64> {
    let withdraw = requested.min(settlement.compounded);

    let growth = settlement
        .compounded
        .checked_sub(position.principal)
        .ok_or(StakingError::MathUnderflow)?;
    let remaining = settlement
        .compounded
        .checked_sub(withdraw)
        .ok_or(StakingError::MathUnderflow)?;

    position.principal = remaining;
    if remaining == 0 {
        position.last_rollover_at = 0;
        position.unlock_at = 0;
    } else {
        position.last_rollover_at = now;
    }

    pool.total_staked = pool
        .total_staked
        .checked_add(growth)
        .and_then(|total| total.checked_sub(withdraw))
        .ok_or(StakingError::MathUnderflow)?;

    Ok(withdraw)
}

/// Unstake tokens from a pool.
///
/// Only permitted once the lock period has elapsed. Accrued yield is
/// settled first; the participant receives the withdrawal and the bound
/// referrer receives their share of the yield, both from the vault.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
/// * `pool_id` - Pool to withdraw from
/// * `amount` - Amount to withdraw; clamps to the compounded value, and
///   `u64::MAX` withdraws everything
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Unstake>, pool_id: u64, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);
    require!(
        !ctx.accounts.position.is_empty(),
        StakingError::NoActiveStake
    );

    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    require!(
        ctx.accounts.position.is_unlocked(now),
        StakingError::LockPeriodNotElapsed
    );

    let settlement = settle_position(
        &ctx.accounts.position,
        &ctx.accounts.pool,
        ctx.accounts.config.referrer_reward_percent,
        now,
    )?;

    let withdraw = apply_withdraw(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.position,
        &settlement,
        amount,
        now,
    )?;

    // All state committed; move tokens last.
    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.staking_vault,
        &ctx.accounts.staker_token_account,
        &ctx.accounts.config,
        withdraw,
    )?;

    pay_referrer(
        ctx.accounts.referrer_token_account.as_ref(),
        &ctx.accounts.referral_record,
        &ctx.accounts.config,
        &ctx.accounts.staking_vault,
        &ctx.accounts.token_program,
        settlement.referrer_cut,
    )?;

    msg!("Unstaked {} from pool {}", withdraw, pool_id);
    msg!("Remaining principal: {}", ctx.accounts.position.principal);

    Ok(())
}
