use anchor_lang::prelude::*;

/// A staking pool. Pools are append-only: ids are assigned sequentially and
/// never reused or reordered.
#[account]
pub struct Pool {
    pub id: u64,
    /// Annual percentage yield, whole percent.
    pub apy_percent: u64,
    /// Compounding interval and withdrawal lock duration, in seconds.
    pub period: i64,
    /// Sum of all live principals (post-compounding) in this pool.
    pub total_staked: u64,

    pub paused: bool,
    pub paused_at: i64,
    pub bump: u8,
}

impl Pool {
    pub const LEN: usize = 8
        + (8 * 3)
        + 8
        + 1
        + 8
        + 1;

    /// The timestamp yield settlement may accrue up to. A paused pool stops
    /// accruing at the pause point.
    pub fn accrual_time(&self, now: i64) -> i64 {
        if self.paused {
            now.min(self.paused_at)
        } else {
            now
        }
    }
}
