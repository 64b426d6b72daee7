//! Admin instruction handlers.
//!
//! Pool configuration and global settings. Every handler here requires the
//! signer to match `config.admin`.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{Pool, StakingConfig};

/// Accounts required to append a new pool.
#[derive(Accounts)]
pub struct AddPool<'info> {
    /// The admin authority. Must match `config.admin`.
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub config: Account<'info, StakingConfig>,

    /// The pool account to be created. Seeded with the next sequential id,
    /// so pool ids are append-only and never reused.
    #[account(
        init,
        payer = admin,
        space = Pool::LEN,
        seeds = [POOL_SEED, &config.pool_count.to_le_bytes()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to mutate an existing pool.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdatePool<'info> {
    /// The admin authority. Must match `config.admin`.
    pub admin: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub config: Account<'info, StakingConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump,
        constraint = pool_id < config.pool_count @ StakingError::PoolNotFound
    )]
    pub pool: Account<'info, Pool>,
}

/// Accounts required to mutate global configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// The admin authority. Must match `config.admin`.
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub config: Account<'info, StakingConfig>,
}

/// Append a new staking pool.
///
/// # Arguments
/// * `ctx` - AddPool accounts context
/// * `apy_percent` - Annual yield in whole percent, must be non-zero
/// * `period` - Compounding interval and lock duration in seconds, must be
///   non-zero
pub fn add_pool_handler(ctx: Context<AddPool>, apy_percent: u64, period: i64) -> Result<()> {
    require!(apy_percent > 0 && period > 0, StakingError::InvalidPoolParams);

    let config = &mut ctx.accounts.config;
    let pool = &mut ctx.accounts.pool;

    pool.id = config.pool_count;
    pool.apy_percent = apy_percent;
    pool.period = period;
    pool.total_staked = 0;
    pool.paused = false;
    pool.paused_at = 0;
    pool.bump = ctx.bumps.pool;

    config.pool_count = config
        .pool_count
        .checked_add(1)
        .ok_or(StakingError::MathOverflow)?;

    msg!("Pool {} added: {}% APY, {}s period", pool.id, apy_percent, period);

    Ok(())
}

/// Change an existing pool's rate and period.
///
/// Does not touch `total_staked` or the paused state. Open stakes keep their
/// stored form; their next rollover uses the new values.
///
/// # Arguments
/// * `ctx` - UpdatePool accounts context
/// * `pool_id` - Pool to modify
/// * `apy_percent` - New annual yield in whole percent, must be non-zero
/// * `period` - New compounding interval and lock duration in seconds, must
///   be non-zero
pub fn change_pool_handler(
    ctx: Context<UpdatePool>,
    pool_id: u64,
    apy_percent: u64,
    period: i64,
) -> Result<()> {
    require!(apy_percent > 0 && period > 0, StakingError::InvalidPoolParams);

    let pool = &mut ctx.accounts.pool;

    msg!(
        "Pool {} changed: {}% -> {}%, {}s -> {}s",
        pool_id,
        pool.apy_percent,
        apy_percent,
        pool.period,
        period
    );

    pool.apy_percent = apy_percent;
    pool.period = period;

    Ok(())
}

/// Pause a pool. One-way: paused pools are never resumed.
///
/// Staking into a paused pool is rejected and yield stops accruing at the
/// pause point; existing stakes may still be withdrawn.
///
/// # Arguments
/// * `ctx` - UpdatePool accounts context
/// * `pool_id` - Pool to pause
pub fn pause_pool_handler(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;

    require!(!pool.paused, StakingError::PoolAlreadyPaused);

    let clock = Clock::get()?;
    pool.paused = true;
    pool.paused_at = clock.unix_timestamp;

    msg!("Pool {} paused at {}", pool_id, pool.paused_at);

    Ok(())
}

/// Set the global referrer reward percent.
///
/// # Arguments
/// * `ctx` - UpdateConfig accounts context
/// * `percent` - New referrer share of newly accrued yield (0-100)
pub fn set_referrer_reward_handler(ctx: Context<UpdateConfig>, percent: u64) -> Result<()> {
    require!(
        percent <= MAX_REFERRER_REWARD_PERCENT,
        StakingError::InvalidReferrerReward
    );

    let config = &mut ctx.accounts.config;

    msg!(
        "Referrer reward changed: {}% -> {}%",
        config.referrer_reward_percent,
        percent
    );

    config.referrer_reward_percent = percent;

    Ok(())
}

/// Transfer the admin capability to a new address.
///
/// # Arguments
/// * `ctx` - UpdateConfig accounts context
/// * `new_admin` - New admin pubkey, must be non-zero
pub fn transfer_admin_handler(ctx: Context<UpdateConfig>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), StakingError::Unauthorized);

    let config = &mut ctx.accounts.config;

    msg!("Admin transferred: {} -> {}", config.admin, new_admin);

    config.admin = new_admin;

    Ok(())
}
