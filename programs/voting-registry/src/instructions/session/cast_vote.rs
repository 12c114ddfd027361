use anchor_lang::prelude::*;

use crate::{VoterRecord, VotingRegistry};

#[derive(Accounts)]
#[instruction(session_id: u64)]
pub struct CastVote<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,
    #[account(
        seeds = [b"VotingRegistry".as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, VotingRegistry>>,
    #[account(
        mut,
        seeds = [
            b"VotingSession".as_ref(),
            &session_id.to_le_bytes()
        ],
        bump
    )]
    /// CHECK: Address is pinned by the seeds. The handler checks the id
    /// against the registry before deserializing, so unknown ids fail with
    /// SessionNotFound.
    pub voting_session: UncheckedAccount<'info>,
    #[account(
        init_if_needed,
        seeds = [
            b"VoterRecord".as_ref(),
            &session_id.to_le_bytes(),
            voter.key().as_ref()
        ],
        bump,
        payer = voter,
        space = 8 + VoterRecord::INIT_SPACE
    )]
    pub voter_record: Box<Account<'info, VoterRecord>>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CastVote>, session_id: u64, candidate_index: u32) -> Result<()> {
    let voter = ctx.accounts.voter.key();
    let now = Clock::get()?.unix_timestamp;

    let voter_record = &mut ctx.accounts.voter_record;
    voter_record.bump = ctx.bumps.voter_record;

    ctx.accounts.registry.cast_vote(
        session_id,
        &ctx.accounts.voting_session.to_account_info(),
        &voter,
        candidate_index,
        voter_record,
        now,
    )?;
    msg!("Vote counted in session {}", session_id);

    Ok(())
}
