use anchor_lang::prelude::*;

use crate::{events::VotingSessionCreated, VotingRegistry, VotingSession};

#[derive(Accounts)]
#[instruction(description: String, candidates: Vec<String>)]
pub struct CreateVotingSession<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(
        mut,
        seeds = [b"VotingRegistry".as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, VotingRegistry>>,
    #[account(
        init,
        seeds = [
            b"VotingSession".as_ref(),
            &registry.session_count.to_le_bytes()
        ],
        bump,
        payer = owner,
        space = VotingSession::space(&description, &candidates)
    )]
    pub voting_session: Box<Account<'info, VotingSession>>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateVotingSession>,
    description: String,
    candidates: Vec<String>,
    start_time: i64,
    end_time: i64,
) -> Result<u64> {
    let session = ctx.accounts.registry.create_session(
        &ctx.accounts.owner.key(),
        ctx.bumps.voting_session,
        description,
        candidates,
        start_time,
        end_time,
    )?;
    let session_id = session.session_id;
    ctx.accounts.voting_session.set_inner(session);
    msg!("Created voting session {}", session_id);

    emit!(VotingSessionCreated { session_id });

    Ok(session_id)
}
