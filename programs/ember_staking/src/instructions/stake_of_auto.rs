//! Read-only projection of a stake's auto-compounded value.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::instructions::stake::settle_position;
use crate::state::{Pool, StakePosition, StakingConfig};

/// Accounts required to read a participant's compounded stake.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct StakeOfAuto<'info> {
    /// The participant whose stake is being read.
    /// CHECK: only used to derive the position PDA; never written.
    pub participant: UncheckedAccount<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, StakingConfig>,

    #[account(
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump,
        constraint = pool_id < config.pool_count @ StakingError::PoolNotFound
    )]
    pub pool: Account<'info, Pool>,

    /// The participant's position, if they have ever staked in this pool.
    #[account(
        seeds = [POSITION_SEED, &pool_id.to_le_bytes(), participant.key().as_ref()],
        bump = position.bump
    )]
    pub position: Option<Account<'info, StakePosition>>,
}

/// Return the participant's compounded stake value as of now.
///
/// Pure projection: no state is mutated. Empty or never-created positions
/// report zero.
pub fn handler(ctx: Context<StakeOfAuto>, _pool_id: u64) -> Result<u64> {
    let position = match ctx.accounts.position.as_ref() {
        Some(position) => position,
        None => return Ok(0),
    };

    let clock = Clock::get()?;
    let settlement = settle_position(
        position,
        &ctx.accounts.pool,
        ctx.accounts.config.referrer_reward_percent,
        clock.unix_timestamp,
    )?;

    Ok(settlement.compounded)
}
