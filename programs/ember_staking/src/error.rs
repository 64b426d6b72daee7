//! Error types for the Ember Staking program.
//!
//! This module defines all custom error codes that can be returned by the
//! program. Each error has a unique code and descriptive message.
//!
//! ## Error Code Ranges
//! - 6000-6009: Input validation errors
//! - 6010-6019: Pool state errors
//! - 6020-6029: Stake state / time-lock errors
//! - 6030-6039: Math/overflow errors
//! - 6040-6049: Authorization errors
//! - 6050-6059: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the Ember Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors (6000-6009) ==========

    /// [6000] Pool APY and period must both be non-zero.
    #[msg("Pool APY and period must be greater than zero")]
    InvalidPoolParams,

    /// [6001] Cannot stake or unstake a zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6002] Referrer reward percent exceeds 100.
    #[msg("Referrer reward percent cannot exceed 100")]
    InvalidReferrerReward,

    /// [6003] The default referrer must be a real address.
    #[msg("Default referrer cannot be the zero address")]
    InvalidDefaultReferrer,

    // ========== Pool State Errors (6010-6019) ==========

    /// [6010] The referenced pool id has not been created.
    #[msg("Pool not found")]
    PoolNotFound,

    /// [6011] Cannot pause a pool that is already paused.
    #[msg("Pool is already paused")]
    PoolAlreadyPaused,

    /// [6012] Cannot stake into a paused pool.
    #[msg("Pool is paused")]
    PoolPaused,

    // ========== Stake State / Time-Lock Errors (6020-6029) ==========

    /// [6020] The lock period has not yet elapsed for this position.
    #[msg("Lock period has not elapsed - cannot unstake yet")]
    LockPeriodNotElapsed,

    /// [6021] No active stake found for this user in this pool.
    #[msg("No active stake found for this user")]
    NoActiveStake,

    // ========== Math/Overflow Errors (6030-6039) ==========

    /// [6030] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6031] Arithmetic underflow occurred during calculation.
    #[msg("Arithmetic underflow occurred during calculation")]
    MathUnderflow,

    /// [6032] Division by zero attempted.
    #[msg("Division by zero attempted")]
    DivisionByZero,

    // ========== Authorization Errors (6040-6049) ==========

    /// [6040] Unauthorized - caller is not the admin.
    #[msg("Unauthorized: caller is not the staking admin")]
    Unauthorized,

    // ========== Account Validation Errors (6050-6059) ==========

    /// [6050] The provided token account is for the wrong mint.
    #[msg("Token account mint does not match the staking mint")]
    MintMismatch,

    /// [6051] First-time stakers must supply a fresh participant record.
    #[msg("Participant record account is required for a first stake")]
    MissingParticipantRecord,

    /// [6052] Repeat stakers must not supply a participant record.
    #[msg("Participant is already registered")]
    ParticipantAlreadyRegistered,

    /// [6053] A referral payout is due but no referrer token account was supplied.
    #[msg("Referrer token account is required when a referral reward is due")]
    MissingReferrerTokenAccount,

    /// [6054] The supplied referrer token account is not owned by the bound referrer.
    #[msg("Referrer token account is not owned by the bound referrer")]
    ReferrerTokenAccountMismatch,
}
