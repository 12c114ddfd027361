use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not the owner")]
    Unauthorized,
    #[msg("Voting session does not exist")]
    SessionNotFound,
    #[msg("Voting is not active")]
    VotingNotActive,
    #[msg("Voter has already voted")]
    AlreadyVoted,
    #[msg("Invalid candidate index")]
    InvalidCandidate,
    #[msg("Invalid address")]
    InvalidAddress,
}
