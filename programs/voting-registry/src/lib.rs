#![allow(ambiguous_glob_reexports)]
#![allow(unexpected_cfgs)] // See: https://solana.stackexchange.com/a/19845

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;

pub use instructions::*;
pub use state::*;

declare_id!("2SyycU6Fdhj42QSJW4MF4g1TYMCrYoKcDx3ddAZNjyYS");

#[program]
pub mod voting_registry {
    use super::*;

    pub fn init_registry(ctx: Context<InitRegistry>) -> Result<()> {
        init_registry::handler(ctx)
    }

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        transfer_ownership::handler(ctx, new_owner)
    }

    pub fn create_voting_session(
        ctx: Context<CreateVotingSession>,
        description: String,
        candidates: Vec<String>,
        start_time: i64,
        end_time: i64,
    ) -> Result<u64> {
        create_voting_session::handler(ctx, description, candidates, start_time, end_time)
    }

    pub fn vote(ctx: Context<CastVote>, session_id: u64, candidate_index: u32) -> Result<()> {
        cast_vote::handler(ctx, session_id, candidate_index)
    }

    pub fn get_results(ctx: Context<GetResults>, session_id: u64) -> Result<SessionResults> {
        get_results::handler(ctx, session_id)
    }
}
