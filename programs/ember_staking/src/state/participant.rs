use anchor_lang::prelude::*;

/// Append-only participant registry entry, written once the first time an
/// address stakes in any pool. Indices are 1-based and never reassigned.
#[account]
pub struct ParticipantRecord {
    pub index: u64,
    pub staker: Pubkey,
}

impl ParticipantRecord {
    pub const LEN: usize = 8 // discriminator
        + 8 // index
        + 32; // staker
}

/// Referral binding for one staker. Resolved at the staker's first-ever
/// stake and immutable thereafter.
#[account]
pub struct ReferralRecord {
    pub staker: Pubkey,
    pub referrer: Pubkey,
    pub bump: u8,
}

impl ReferralRecord {
    pub const LEN: usize = 8 // discriminator
        + 32 // staker
        + 32 // referrer
        + 1; // bump

    /// Whether a referrer has been bound. A fresh `init_if_needed` account
    /// holds the default pubkey, which is never a valid binding.
    pub fn is_bound(&self) -> bool {
        self.referrer != Pubkey::default()
    }
}
