use anchor_client::{
    solana_sdk::{
        commitment_config::CommitmentConfig,
        pubkey::Pubkey,
        signature::{read_keypair_file, Keypair},
        signer::Signer,
    },
    Client, Cluster, Program,
};
use anyhow::Result;
use cli::utils::*;
use voting_registry::{events::VotingSessionCreated, VoterRecord, VotingRegistry};

use crate::utils::{assert::assert_client_err, data_types::ProgramTestContext, fetch_utils::*};

const VOTING_DURATION: i64 = 3600;
const VOTER_FUNDING_LAMPORTS: u64 = 100_000_000;

fn owner_sender<'a>(
    program: &'a Program<&'a Keypair>,
    context: &'a ProgramTestContext,
) -> TxSender<'a> {
    TxSender {
        program,
        micro_lamports: None,
        payer: &context.payer,
        authority: &context.payer,
    }
}

fn voter_sender<'a>(
    program: &'a Program<&'a Keypair>,
    context: &'a ProgramTestContext,
    voter: &'a Keypair,
) -> TxSender<'a> {
    TxSender {
        program,
        micro_lamports: None,
        payer: &context.payer,
        authority: voter,
    }
}

fn test_init_registry(program: &Program<&Keypair>, context: &ProgramTestContext) -> Result<()> {
    send_init_registry(&owner_sender(program, context))?;

    let registry: VotingRegistry = program.account(context.registry_pda)?;
    assert_eq!(registry.owner, context.payer.pubkey());
    assert_eq!(registry.voting_session_count(), 0);

    // A second initialization is refused.
    let tx = send_init_registry(&owner_sender(program, context));
    assert!(tx.is_err());

    Ok(())
}

fn test_sessions(program: &Program<&Keypair>, context: &ProgramTestContext) -> Result<()> {
    let owner = &owner_sender(program, context);
    let now = fetch_cluster_time(program)?;
    let start_time = now;
    let end_time = start_time + VOTING_DURATION;

    assert!(!fetch_voting_session(program, 0)?.exists);

    let tx = send_create_voting_session(
        owner,
        "Test Voting Session".to_string(),
        vec!["Alice".to_string(), "Bob".to_string()],
        start_time,
        end_time,
    )?;
    let (_slot, block_time) = fetch_tx_block_details(program, tx);
    assert!(block_time >= start_time);
    let event: VotingSessionCreated = fetch_tx_event(program, &tx)?;
    assert_eq!(event.session_id, 0);

    let registry = fetch_registry(program)?;
    assert_eq!(registry.voting_session_count(), 1);
    let session = fetch_voting_session(program, 0)?;
    assert_eq!(session.description, "Test Voting Session");
    assert_eq!(session.candidates, vec!["Alice", "Bob"]);
    assert_eq!(session.start_time, start_time);
    assert_eq!(session.end_time, end_time);
    assert!(session.exists);
    assert!(!fetch_voting_session(program, 1)?.exists);
    assert_eq!(fetch_session(program, 0)?.vote_counts, vec![0, 0]);

    // Non-owner cannot create a session.
    let outsider = &voter_sender(program, context, &context.voters[3]);
    let tx = send_create_voting_session(
        outsider,
        "Rogue Session".to_string(),
        vec!["Mallory".to_string()],
        start_time,
        end_time,
    );
    assert_client_err(tx, "Caller is not the owner");
    assert_eq!(fetch_registry(program)?.voting_session_count(), 1);

    // Session whose window has already closed.
    let expired_end = now - 10;
    let tx = send_create_voting_session(
        owner,
        "Expired Session".to_string(),
        vec!["Charlie".to_string()],
        expired_end - VOTING_DURATION,
        expired_end,
    )?;
    assert_eq!(fetch_created_session_id(program, &tx)?, 1);
    assert_eq!(fetch_registry(program)?.voting_session_count(), 2);

    Ok(())
}

fn test_voting(program: &Program<&Keypair>, context: &ProgramTestContext) -> Result<()> {
    let voter1 = &context.voters[0];
    let voter2 = &context.voters[1];
    let sender1 = &voter_sender(program, context, voter1);
    let sender2 = &voter_sender(program, context, voter2);

    send_vote(sender1, 0, 0)?;

    let results = simulate_get_results(program, 0)?;
    assert_eq!(results.names, vec!["Alice", "Bob"]);
    assert_eq!(results.vote_counts, vec![1, 0]);

    let record: VoterRecord = program.account(VoterRecord::pda(0, &voter1.pubkey()).0)?;
    assert!(record.has_voted);
    assert_eq!(record.session_id, 0);
    assert_eq!(record.voter, voter1.pubkey());

    // Same voter again, for either candidate.
    let tx = send_vote(sender1, 0, 0);
    assert_client_err(tx, "Voter has already voted");
    let tx = send_vote(sender1, 0, 1);
    assert_client_err(tx, "Voter has already voted");

    // Window already closed.
    let tx = send_vote(sender2, 1, 0);
    assert_client_err(tx, "Voting is not active");

    let tx = send_vote(sender2, 42, 0);
    assert_client_err(tx, "Voting session does not exist");
    assert_client_err(simulate_get_results(program, 42), "Voting session does not exist");

    let tx = send_vote(sender2, 0, 2);
    assert_client_err(tx, "Invalid candidate index");

    // Rejected votes left no ballot behind, so voter 2 can still vote.
    send_vote(sender2, 0, 1)?;

    let results = simulate_get_results(program, 0)?;
    assert_eq!(results.names, vec!["Alice", "Bob"]);
    assert_eq!(results.vote_counts, vec![1, 1]);
    assert_eq!(simulate_get_results(program, 1)?.vote_counts, vec![0]);

    Ok(())
}

fn test_transfer_ownership(
    program: &Program<&Keypair>,
    context: &ProgramTestContext,
) -> Result<()> {
    let owner = &owner_sender(program, context);
    let new_owner_keypair = &context.voters[2];
    let new_owner = &voter_sender(program, context, new_owner_keypair);

    // Only the owner may hand over the registry.
    let tx = send_transfer_ownership(new_owner, new_owner_keypair.pubkey());
    assert_client_err(tx, "Caller is not the owner");

    let tx = send_transfer_ownership(owner, Pubkey::default());
    assert_client_err(tx, "Invalid address");

    send_transfer_ownership(owner, new_owner_keypair.pubkey())?;
    let registry = fetch_registry(program)?;
    assert_eq!(registry.owner, new_owner_keypair.pubkey());

    let now = fetch_cluster_time(program)?;
    let tx = send_create_voting_session(
        owner,
        "Stale Owner".to_string(),
        vec!["A".to_string()],
        now,
        now + VOTING_DURATION,
    );
    assert_client_err(tx, "Caller is not the owner");

    let tx = send_create_voting_session(
        new_owner,
        "New Owner Session".to_string(),
        vec!["A".to_string(), "B".to_string(), "C".to_string()],
        now,
        now + VOTING_DURATION,
    )?;
    assert_eq!(fetch_created_session_id(program, &tx)?, 2);
    assert_eq!(fetch_registry(program)?.voting_session_count(), 3);
    assert_eq!(simulate_get_results(program, 2)?.vote_counts, vec![0, 0, 0]);

    // A voter from session 0 may still vote in session 2.
    send_vote(&voter_sender(program, context, &context.voters[0]), 2, 2)?;
    assert_eq!(fetch_session(program, 2)?.vote_counts, vec![0, 0, 1]);
    assert_eq!(simulate_get_results(program, 2)?.vote_counts, vec![0, 0, 1]);

    Ok(())
}

#[test]
fn main() {
    let Ok(anchor_wallet) = std::env::var("ANCHOR_WALLET") else {
        println!("ANCHOR_WALLET not set, skipping localnet flow");
        return;
    };
    let payer = read_keypair_file(&anchor_wallet).unwrap();

    let client = Client::new_with_options(Cluster::Localnet, &payer, CommitmentConfig::confirmed());
    let program: Program<&Keypair> = client.program(voting_registry::id()).unwrap();

    let (registry_pda, _bump) = VotingRegistry::pda();
    let voters: Vec<Keypair> = (0..4).map(|_| Keypair::new()).collect();
    fund_wallets(&program, &payer, &voters, VOTER_FUNDING_LAMPORTS).unwrap();

    let context = ProgramTestContext {
        payer: payer.insecure_clone(),
        registry_pda,
        voters,
    };
    test_init_registry(&program, &context).unwrap();
    test_sessions(&program, &context).unwrap();
    test_voting(&program, &context).unwrap();
    test_transfer_ownership(&program, &context).unwrap();
}
