use anchor_lang::prelude::*;

/// A participant's stake in one pool.
///
/// `principal == 0` marks the record as empty; empty records keep
/// `last_rollover_at` and `unlock_at` zeroed and may be re-entered by a
/// later stake.
#[account]
pub struct StakePosition {
    pub owner: Pubkey,
    pub pool_id: u64,

    /// Current compounded value owed to the participant.
    pub principal: u64,
    /// Last time the principal was rolled forward through compounding.
    pub last_rollover_at: i64,
    /// Earliest time withdrawal is permitted.
    pub unlock_at: i64,

    pub bump: u8,
}

impl StakePosition {
    pub const LEN: usize = 8 + 32 + 8 + (8 * 3) + 1;

    pub fn is_empty(&self) -> bool {
        self.principal == 0
    }

    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.unlock_at
    }
}
