//! Instruction handlers for the Ember Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod initialize;
pub mod stake;
pub mod stake_of_auto;
pub mod unstake;

pub use admin::*;
pub use initialize::*;
pub use stake::*;
pub use stake_of_auto::*;
pub use unstake::*;
