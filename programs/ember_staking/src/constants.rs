//! Program constants for the Ember Staking program.
//!
//! This module defines all constant values used throughout the staking
//! program, including PDA seeds, the compounding time base, and percentage
//! denominators.

use anchor_lang::prelude::*;

/// Seed for deriving the global staking config PDA
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed for deriving the staking vault PDA
pub const STAKING_VAULT_SEED: &[u8] = b"staking_vault";

/// Seed for deriving pool PDAs (suffixed with the pool id)
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for deriving stake position PDAs (suffixed with pool id and owner)
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for deriving participant registry PDAs (suffixed with the 1-based index)
pub const PARTICIPANT_SEED: &[u8] = b"participant";

/// Seed for deriving referral binding PDAs (suffixed with the staker)
pub const REFERRAL_SEED: &[u8] = b"referral";

/// Number of seconds in a year (365.25 days), the engine's time base
pub const SECONDS_PER_YEAR: i64 = 31_557_600;

/// Number of compounding periods per year (monthly compounding)
pub const COMPOUNDING_PERIODS_PER_YEAR: u64 = 12;

/// Default pool period: one compounding period (30.4375 days)
pub const DEFAULT_POOL_PERIOD: i64 = SECONDS_PER_YEAR / COMPOUNDING_PERIODS_PER_YEAR as i64;

/// Percentage denominator (100% = 100)
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Maximum referrer reward share of newly accrued yield (100%)
pub const MAX_REFERRER_REWARD_PERCENT: u64 = 100;

/// Sentinel unstake amount meaning "withdraw everything"
pub const MAX_UNSTAKE_SENTINEL: u64 = u64::MAX;
