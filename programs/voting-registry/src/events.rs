use anchor_lang::prelude::*;

#[event]
pub struct VotingSessionCreated {
    pub session_id: u64,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
