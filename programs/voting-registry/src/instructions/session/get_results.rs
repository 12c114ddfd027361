use anchor_lang::prelude::*;

use crate::{SessionResults, VotingRegistry};

#[derive(Accounts)]
#[instruction(session_id: u64)]
pub struct GetResults<'info> {
    #[account(
        seeds = [b"VotingRegistry".as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, VotingRegistry>>,
    #[account(
        seeds = [
            b"VotingSession".as_ref(),
            &session_id.to_le_bytes()
        ],
        bump
    )]
    /// CHECK: Same lookup as `CastVote::voting_session`.
    pub voting_session: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<GetResults>, session_id: u64) -> Result<SessionResults> {
    ctx.accounts
        .registry
        .results(session_id, &ctx.accounts.voting_session.to_account_info())
}
