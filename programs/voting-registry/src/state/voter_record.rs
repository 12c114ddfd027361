use anchor_lang::prelude::*;

/// One entry of the per-session ballot map, keyed by (session id, voter).
#[account]
#[derive(InitSpace, Debug)]
pub struct VoterRecord {
    /// Session the record belongs to
    pub session_id: u64,
    /// The voter this record tracks
    pub voter: Pubkey,
    /// Set once the voter's ballot has been counted. Never reset.
    pub has_voted: bool,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl VoterRecord {
    pub fn pda(session_id: u64, voter: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[b"VoterRecord", &session_id.to_le_bytes(), voter.as_ref()],
            &crate::ID,
        )
    }
}
