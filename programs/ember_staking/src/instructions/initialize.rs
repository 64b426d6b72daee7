//! Initialize instruction handler.
//!
//! Creates the global staking config and the vault that holds all staked
//! tokens. Pools are added separately with `add_pool`.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::StakingConfig;

/// Accounts required for program initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will control pool configuration.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The global config account to be created.
    #[account(
        init,
        payer = admin,
        space = StakingConfig::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, StakingConfig>,

    /// The mint for the staking token (EMBER).
    pub staking_mint: Account<'info, Mint>,

    /// The vault that holds all staked tokens plus the pre-funded yield
    /// reserve. Authority is the config PDA.
    #[account(
        init,
        payer = admin,
        seeds = [STAKING_VAULT_SEED],
        bump,
        token::mint = staking_mint,
        token::authority = config
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize the staking program.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `referrer_reward_percent` - Referrer share of newly accrued yield (0-100)
/// * `default_referrer` - Treasury address bound when no valid referral index
///   is supplied
///
/// # Returns
/// Result indicating success or error
pub fn handler(
    ctx: Context<Initialize>,
    referrer_reward_percent: u64,
    default_referrer: Pubkey,
) -> Result<()> {
    require!(
        referrer_reward_percent <= MAX_REFERRER_REWARD_PERCENT,
        StakingError::InvalidReferrerReward
    );
    require!(
        default_referrer != Pubkey::default(),
        StakingError::InvalidDefaultReferrer
    );

    let config = &mut ctx.accounts.config;

    config.admin = ctx.accounts.admin.key();
    config.staking_mint = ctx.accounts.staking_mint.key();
    config.staking_vault = ctx.accounts.staking_vault.key();
    config.default_referrer = default_referrer;
    config.referrer_reward_percent = referrer_reward_percent;
    config.pool_count = 0;
    config.participant_count = 0;
    config.vault_bump = ctx.bumps.staking_vault;
    config.bump = ctx.bumps.config;

    msg!("Ember Staking initialized");
    msg!("Admin: {}", config.admin);
    msg!("Mint: {}", config.staking_mint);
    msg!("Default referrer: {}", default_referrer);
    msg!("Referrer reward: {}%", referrer_reward_percent);

    Ok(())
}
