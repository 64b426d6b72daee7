use anchor_lang::prelude::*;

/// Global program configuration. Singleton, created once by `initialize`.
#[account]
pub struct StakingConfig {
    pub admin: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_vault: Pubkey,
    /// Fallback referrer (treasury) bound when a referral index is invalid.
    pub default_referrer: Pubkey,

    /// Share of newly accrued yield paid to a staker's referrer, out of 100.
    pub referrer_reward_percent: u64,
    /// Number of pools created so far; the next pool id.
    pub pool_count: u64,
    /// Number of registered participants; registry indices are 1-based.
    pub participant_count: u64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl StakingConfig {
    pub const LEN: usize = 8
        + (32 * 4)
        + (8 * 3)
        + 1
        + 1;
}
