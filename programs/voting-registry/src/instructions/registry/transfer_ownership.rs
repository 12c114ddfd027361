use anchor_lang::prelude::*;

use crate::{events::OwnershipTransferred, VotingRegistry};

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    pub owner: Signer<'info>,
    #[account(
        mut,
        seeds = [b"VotingRegistry".as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, VotingRegistry>>,
}

pub fn handler(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let previous_owner = registry.transfer_ownership(&ctx.accounts.owner.key(), new_owner)?;

    emit!(OwnershipTransferred {
        previous_owner,
        new_owner,
    });

    Ok(())
}
