use anchor_lang::prelude::*;

use crate::VotingRegistry;

#[derive(Accounts)]
pub struct InitRegistry<'info> {
    #[account(mut)]
    pub deployer: Signer<'info>,
    #[account(
        init,
        seeds = [b"VotingRegistry".as_ref()],
        bump,
        payer = deployer,
        space = 8 + VotingRegistry::INIT_SPACE
    )]
    pub registry: Box<Account<'info, VotingRegistry>>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    registry.set_inner(VotingRegistry::new(
        ctx.accounts.deployer.key(),
        ctx.bumps.registry,
    ));
    msg!("Registry initialized, owner {}", registry.owner);

    Ok(())
}
