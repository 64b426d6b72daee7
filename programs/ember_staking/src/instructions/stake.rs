//! Stake instruction handler.
//!
//! Handles deposits into a pool: first-time registration and referral
//! binding, rollover of accrued yield on top-ups, and the referral share of
//! that yield.
//!
//! The yield math and state transitions live in pure functions that take an
//! explicit `now` timestamp; the handler reads the clock once, commits all
//! state, and performs token transfers last.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::math;
use crate::state::{ParticipantRecord, Pool, ReferralRecord, StakePosition, StakingConfig};

/// Accounts required for staking.
#[derive(Accounts)]
#[instruction(pool_id: u64, amount: u64, referral_index: u64)]
pub struct Stake<'info> {
    /// The user staking tokens.
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, StakingConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump,
        constraint = pool_id < config.pool_count @ StakingError::PoolNotFound
    )]
    pub pool: Account<'info, Pool>,

    /// User's stake position in this pool (created on first stake).
    #[account(
        init_if_needed,
        payer = staker,
        space = StakePosition::LEN,
        seeds = [POSITION_SEED, &pool_id.to_le_bytes(), staker.key().as_ref()],
        bump
    )]
    pub position: Account<'info, StakePosition>,

    /// User's referral binding (created on first stake, immutable after).
    #[account(
        init_if_needed,
        payer = staker,
        space = ReferralRecord::LEN,
        seeds = [REFERRAL_SEED, staker.key().as_ref()],
        bump
    )]
    pub referral_record: Account<'info, ReferralRecord>,

    /// Registry entry appended for the staker on a first-ever stake.
    /// Required then, rejected on any later stake.
    #[account(
        init,
        payer = staker,
        space = ParticipantRecord::LEN,
        seeds = [PARTICIPANT_SEED, &config.participant_count.saturating_add(1).to_le_bytes()],
        bump
    )]
    pub participant_record: Option<Account<'info, ParticipantRecord>>,

    /// Registry entry the supplied referral index points at. Anything that
    /// fails validation falls back to the default referrer.
    pub claimed_referrer: Option<Account<'info, ParticipantRecord>>,

    /// User's token account for the staking token.
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Outcome of rolling a position forward through compounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldSettlement {
    /// Principal rolled forward through all whole elapsed periods.
    pub compounded: u64,
    /// Newly accrued yield (`compounded - principal`).
    pub accrued: u64,
    /// Referrer's share of the accrued yield.
    pub referrer_cut: u64,
}

impl YieldSettlement {
    pub const EMPTY: YieldSettlement = YieldSettlement {
        compounded: 0,
        accrued: 0,
        referrer_cut: 0,
    };
}

/// Roll a position forward to `now` without mutating it.
///
/// Counts whole elapsed periods since `last_rollover_at` (a paused pool
/// accrues only up to its pause point), compounds the principal through
/// them, and computes the referrer's share of the newly accrued yield.
/// Fractional period time is not counted; it carries forward implicitly.
pub fn settle_position(
    position: &StakePosition,
    pool: &Pool,
    referrer_reward_percent: u64,
    now: i64,
) -> Result<YieldSettlement> {
    if position.is_empty() {
        return Ok(YieldSettlement::EMPTY);
    }

    let elapsed_seconds = pool
        .accrual_time(now)
        .saturating_sub(position.last_rollover_at)
        .max(0);
    let elapsed_periods = elapsed_seconds
        .checked_div(pool.period)
        .ok_or(StakingError::DivisionByZero)? as u64;

    let compounded = math::compound(
        position.principal,
        pool.apy_percent,
        COMPOUNDING_PERIODS_PER_YEAR,
        elapsed_periods,
    )?;
    let accrued = compounded
        .checked_sub(position.principal)
        .ok_or(StakingError::MathUnderflow)?;
    let referrer_cut = (accrued as u128)
        .checked_mul(referrer_reward_percent as u128)
        .and_then(|product| product.checked_div(PERCENT_DENOMINATOR as u128))
        .ok_or(StakingError::MathOverflow)
        .map(|cut| cut as u64)?;

    Ok(YieldSettlement {
        compounded,
        accrued,
        referrer_cut,
    })
}

/// Resolve the referrer bound at a participant's first stake.
///
/// A 1-based `referral_index` that is zero, beyond the registry, pointing at
/// the staker themself, or whose registry entry was not supplied or does not
/// match, resolves to the default referrer.
pub fn resolve_referrer(
    referral_index: u64,
    claimed_entry: Option<&ParticipantRecord>,
    registry_len: u64,
    staker: &Pubkey,
    default_referrer: Pubkey,
) -> Pubkey {
    if referral_index == 0 || referral_index > registry_len {
        return default_referrer;
    }
    match claimed_entry {
        Some(entry) if entry.index == referral_index && entry.staker != *staker => entry.staker,
        _ => default_referrer,
    }
}

/// Commit a deposit on top of a settled position.
///
/// The new principal is the compounded value plus the deposit; the lock
/// period restarts from `now`. `pool.total_staked` absorbs both the
/// compounding growth and the deposit so it keeps tracking the sum of live
/// principals.
pub fn apply_deposit(
    pool: &mut Pool,
    position: &mut StakePosition,
    settlement: &YieldSettlement,
    amount: u64,
    now: i64,
) -> Result<()> {
    let growth = settlement
        .compounded
        .checked_sub(position.principal)
        .ok_or(StakingError::MathUnderflow)?;

    position.principal = settlement
        .compounded
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;
    position.last_rollover_at = now;
    position.unlock_at = now
        .checked_add(pool.period)
        .ok_or(StakingError::MathOverflow)?;

    pool.total_staked = pool
        .total_staked
        .checked_add(growth)
        .and_then(|total| total.checked_add(amount))
        .ok_or(StakingError::MathOverflow)?;

    Ok(())
}

/// Transfer tokens out of the staking vault, signed by the config PDA.
pub(crate) fn transfer_from_vault<'info>(
    token_program: &Program<'info, Token>,
    staking_vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    config: &Account<'info, StakingConfig>,
    amount: u64,
) -> Result<()> {
    let seeds = &[CONFIG_SEED, &[config.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: staking_vault.to_account_info(),
        to: destination.to_account_info(),
        authority: config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}

/// Pay the referral share of a settlement out of the vault.
///
/// A zero cut needs no destination account; a non-zero cut requires a token
/// account owned by the bound referrer.
pub(crate) fn pay_referrer<'info>(
    referrer_token_account: Option<&Account<'info, TokenAccount>>,
    referral_record: &ReferralRecord,
    config: &Account<'info, StakingConfig>,
    staking_vault: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    referrer_cut: u64,
) -> Result<()> {
    if referrer_cut == 0 {
        return Ok(());
    }

    let destination =
        referrer_token_account.ok_or(StakingError::MissingReferrerTokenAccount)?;
    require!(
        destination.owner == referral_record.referrer,
        StakingError::ReferrerTokenAccountMismatch
    );
    require!(
        destination.mint == config.staking_mint,
        StakingError::MintMismatch
    );

    transfer_from_vault(token_program, staking_vault, destination, config, referrer_cut)?;

    msg!(
        "Referral reward {} paid to {}",
        referrer_cut,
        referral_record.referrer
    );

    Ok(())
}

/// Stake tokens into a pool.
///
/// First stake ever registers the participant and binds a referrer. A
/// top-up first rolls the existing principal forward through compounding;
/// the referrer's share of the newly accrued yield is paid from the vault
/// and the incoming deposit transfer is reduced by the same amount.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `pool_id` - Pool to stake into
/// * `amount` - Amount of tokens to deposit
/// * `referral_index` - 1-based registry index of the claimed referrer; 0 or
///   anything invalid binds the default referrer
///
/// # Returns
/// Result indicating success or error
pub fn handler(
    ctx: Context<Stake>,
    pool_id: u64,
    amount: u64,
    referral_index: u64,
) -> Result<()> {
    require!(!ctx.accounts.pool.paused, StakingError::PoolPaused);
    require!(amount > 0, StakingError::ZeroAmount);

    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let staker_key = ctx.accounts.staker.key();

    // First stake ever: append the staker to the registry, then bind the
    // referrer. The binding never changes afterwards.
    if !ctx.accounts.referral_record.is_bound() {
        let config = &mut ctx.accounts.config;
        let record = ctx
            .accounts
            .participant_record
            .as_mut()
            .ok_or(StakingError::MissingParticipantRecord)?;

        let index = config
            .participant_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        record.index = index;
        record.staker = staker_key;
        config.participant_count = index;

        let referrer = resolve_referrer(
            referral_index,
            ctx.accounts.claimed_referrer.as_deref(),
            config.participant_count,
            &staker_key,
            config.default_referrer,
        );

        let referral_record = &mut ctx.accounts.referral_record;
        referral_record.staker = staker_key;
        referral_record.referrer = referrer;
        referral_record.bump = ctx.bumps.referral_record;

        msg!("Participant {} registered at index {}", staker_key, index);
        msg!("Referrer bound: {}", referrer);
    } else {
        require!(
            ctx.accounts.participant_record.is_none(),
            StakingError::ParticipantAlreadyRegistered
        );
    }

    // Roll accrued yield forward, then commit the deposit.
    let settlement = settle_position(
        &ctx.accounts.position,
        &ctx.accounts.pool,
        ctx.accounts.config.referrer_reward_percent,
        now,
    )?;

    {
        let pool = &mut ctx.accounts.pool;
        let position = &mut ctx.accounts.position;
        position.owner = staker_key;
        position.pool_id = pool_id;
        position.bump = ctx.bumps.position;
        apply_deposit(pool, position, &settlement, amount, now)?;
    }

    // All state committed; move tokens last. The deposit transfer is
    // reduced by the referral cut, which is paid from the vault.
    let deposit_in = amount
        .checked_sub(settlement.referrer_cut)
        .ok_or(StakingError::MathUnderflow)?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.staker_token_account.to_account_info(),
        to: ctx.accounts.staking_vault.to_account_info(),
        authority: ctx.accounts.staker.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, deposit_in)?;

    pay_referrer(
        ctx.accounts.referrer_token_account.as_ref(),
        &ctx.accounts.referral_record,
        &ctx.accounts.config,
        &ctx.accounts.staking_vault,
        &ctx.accounts.token_program,
        settlement.referrer_cut,
    )?;

    msg!("Staked {} into pool {}", amount, pool_id);
    msg!("Principal: {}", ctx.accounts.position.principal);

    Ok(())
}
