//! # Ember Staking Program
//!
//! A multi-pool, time-locked staking program for the EMBER token with
//! automatically compounding yield and referral rewards.
//!
//! Pools are created by the admin with a whole-percent APY and a period
//! that serves as both the compounding interval and the withdrawal lock.
//! Principal rolls forward through whole elapsed periods using truncating
//! 64.64 fixed-point interest; every settlement pays the staker's bound
//! referrer a configured share of the newly accrued yield.
//!
//! ## Features
//! - Append-only pool registry, mutable rate/period, one-way pause
//! - Auto-compounding principal with per-step truncation semantics
//! - 1-based participant registry for referral lookups
//! - Referrer binding at first stake, permanent thereafter
//! - Time-locked withdrawals with a withdraw-everything sentinel
//! - Admin controls for pools, referral percentage, and admin handover

use anchor_lang::prelude::*;

declare_id!("MwTTVmzGmhdrZr19s4AgQYq5KKWJikYAhYjnnryBxAX");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

#[program]
pub mod ember_staking {
    use super::*;

    /// Initializes the staking program: global config plus the token vault.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `referrer_reward_percent` - Referrer share of newly accrued yield (0-100)
    /// * `default_referrer` - Treasury address used when a referral index is invalid
    ///
    /// # Errors
    /// Returns an error if the percentage exceeds 100 or the default
    /// referrer is the zero address.
    pub fn initialize(
        ctx: Context<Initialize>,
        referrer_reward_percent: u64,
        default_referrer: Pubkey,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, referrer_reward_percent, default_referrer)
    }

    /// Appends a new staking pool.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `apy_percent` - Annual percentage yield, whole percent
    /// * `period` - Compounding interval and lock duration in seconds
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or either parameter
    /// is zero.
    pub fn add_pool(ctx: Context<AddPool>, apy_percent: u64, period: i64) -> Result<()> {
        instructions::admin::add_pool_handler(ctx, apy_percent, period)
    }

    /// Changes an existing pool's rate and period.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `pool_id` - Pool to modify
    /// * `apy_percent` - New annual percentage yield, whole percent
    /// * `period` - New period in seconds
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin, the pool does not
    /// exist, or the APY is zero.
    pub fn change_pool(
        ctx: Context<UpdatePool>,
        pool_id: u64,
        apy_percent: u64,
        period: i64,
    ) -> Result<()> {
        instructions::admin::change_pool_handler(ctx, pool_id, apy_percent, period)
    }

    /// Pauses a pool permanently.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `pool_id` - Pool to pause
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or the pool is
    /// already paused.
    pub fn pause_pool(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
        instructions::admin::pause_pool_handler(ctx, pool_id)
    }

    /// Sets the global referrer reward percentage.
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or the percentage
    /// exceeds 100.
    pub fn set_referrer_reward(ctx: Context<UpdateConfig>, percent: u64) -> Result<()> {
        instructions::admin::set_referrer_reward_handler(ctx, percent)
    }

    /// Transfers the admin capability to a new address.
    ///
    /// # Errors
    /// Returns an error if the caller is not the admin or the new admin is
    /// the zero address.
    pub fn transfer_admin(ctx: Context<UpdateConfig>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin_handler(ctx, new_admin)
    }

    /// Stakes EMBER tokens into a pool.
    ///
    /// A first-ever stake registers the participant and binds a referrer; a
    /// top-up settles accrued yield first and pays the referrer their share.
    /// Every deposit restarts the pool's lock period.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `pool_id` - Pool to stake into
    /// * `amount` - Amount of EMBER tokens to deposit
    /// * `referral_index` - 1-based registry index of the claimed referrer
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool is paused or does not exist
    /// - Amount is zero
    /// - The accrued referral cut exceeds the deposit
    /// - A token transfer fails
    pub fn stake(
        ctx: Context<Stake>,
        pool_id: u64,
        amount: u64,
        referral_index: u64,
    ) -> Result<()> {
        instructions::stake::handler(ctx, pool_id, amount, referral_index)
    }

    /// Unstakes EMBER tokens from a pool after the lock period.
    ///
    /// Settles accrued yield, pays the referral share, and clamps the
    /// requested amount to the compounded value; `u64::MAX` withdraws
    /// everything and zeroes the position.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for unstaking
    /// * `pool_id` - Pool to withdraw from
    /// * `amount` - Amount of EMBER tokens to withdraw
    ///
    /// # Errors
    /// Returns an error if:
    /// - The lock period has not elapsed
    /// - The position is empty or the amount is zero
    /// - A token transfer fails
    pub fn unstake(ctx: Context<Unstake>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, pool_id, amount)
    }

    /// Returns a participant's compounded stake value as of now.
    ///
    /// Read-only; reports zero for participants with no stake in the pool.
    pub fn stake_of_auto(ctx: Context<StakeOfAuto>, pool_id: u64) -> Result<u64> {
        instructions::stake_of_auto::handler(ctx, pool_id)
    }
}
