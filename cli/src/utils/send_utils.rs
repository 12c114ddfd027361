use anchor_client::{
    anchor_lang::system_program,
    solana_client::rpc_config::RpcSimulateTransactionConfig,
    solana_sdk::{
        commitment_config::CommitmentConfig,
        compute_budget::ComputeBudgetInstruction,
        instruction::Instruction,
        pubkey::Pubkey,
        signature::{Keypair, Signature},
        signer::Signer,
        transaction::Transaction,
    },
    ClientError, Program,
};
use anyhow::anyhow;
use voting_registry::{
    accounts, instruction, SessionResults, VoterRecord, VotingRegistry, VotingSession,
};

use crate::utils::{fetch_registry, parse_return_data};

pub struct TxSender<'a> {
    pub program: &'a Program<&'a Keypair>,
    pub micro_lamports: Option<u64>,
    pub payer: &'a Keypair,
    /// Caller identity: the owner for administrative instructions, the voter for votes.
    pub authority: &'a Keypair,
}

impl<'a> TxSender<'a> {
    pub fn send(&self, ixs: Vec<Instruction>) -> Result<Signature, ClientError> {
        send_with_anchor(
            ixs,
            self.micro_lamports,
            &[self.payer, self.authority],
            self.program,
        )
    }
}

/// Signs `ixs` with the payer and the caller, prepending a compute-unit price
/// when one is configured, and waits for confirmation.
fn send_with_anchor(
    mut ixs: Vec<Instruction>,
    micro_lamports: Option<u64>,
    signers: &[&Keypair],
    program: &Program<&Keypair>,
) -> Result<Signature, ClientError> {
    let payer = program.payer();
    let blockhash = program.rpc().get_latest_blockhash()?;

    if let Some(lamports) = micro_lamports {
        ixs.insert(
            0,
            ComputeBudgetInstruction::set_compute_unit_price(lamports),
        );
    }

    let tx = Transaction::new_signed_with_payer(&ixs, Some(&payer), signers, blockhash);
    program
        .rpc()
        .send_and_confirm_transaction(&tx)
        .map_err(ClientError::SolanaClientError)
}

pub fn send_init_registry(tx_sender: &TxSender) -> Result<Signature, ClientError> {
    let ixs = tx_sender
        .program
        .request()
        .accounts(accounts::InitRegistry {
            deployer: tx_sender.authority.pubkey(),
            registry: VotingRegistry::pda().0,
            system_program: system_program::ID,
        })
        .args(instruction::InitRegistry {})
        .instructions()?;

    tx_sender.send(ixs)
}

pub fn send_create_voting_session(
    tx_sender: &TxSender,
    description: String,
    candidates: Vec<String>,
    start_time: i64,
    end_time: i64,
) -> Result<Signature, ClientError> {
    // Must match the id the program allocates, or the seeds check fails.
    let session_id = fetch_registry(tx_sender.program)?.voting_session_count();
    let ixs = tx_sender
        .program
        .request()
        .accounts(accounts::CreateVotingSession {
            owner: tx_sender.authority.pubkey(),
            registry: VotingRegistry::pda().0,
            voting_session: VotingSession::pda(session_id).0,
            system_program: system_program::ID,
        })
        .args(instruction::CreateVotingSession {
            description,
            candidates,
            start_time,
            end_time,
        })
        .instructions()?;

    tx_sender.send(ixs)
}

pub fn send_vote(
    tx_sender: &TxSender,
    session_id: u64,
    candidate_index: u32,
) -> Result<Signature, ClientError> {
    let voter = tx_sender.authority.pubkey();
    let ixs = tx_sender
        .program
        .request()
        .accounts(accounts::CastVote {
            voter,
            registry: VotingRegistry::pda().0,
            voting_session: VotingSession::pda(session_id).0,
            voter_record: VoterRecord::pda(session_id, &voter).0,
            system_program: system_program::ID,
        })
        .args(instruction::Vote {
            session_id,
            candidate_index,
        })
        .instructions()?;

    tx_sender.send(ixs)
}

pub fn send_transfer_ownership(
    tx_sender: &TxSender,
    new_owner: Pubkey,
) -> Result<Signature, ClientError> {
    let ixs = tx_sender
        .program
        .request()
        .accounts(accounts::TransferOwnership {
            owner: tx_sender.authority.pubkey(),
            registry: VotingRegistry::pda().0,
        })
        .args(instruction::TransferOwnership { new_owner })
        .instructions()?;

    tx_sender.send(ixs)
}

/// Runs `get_results` as a simulation and decodes the returned tallies.
/// Nothing is signed or submitted, but the program's payer must exist on the
/// cluster to cover the simulated fee.
pub fn simulate_get_results(
    program: &Program<&Keypair>,
    session_id: u64,
) -> anyhow::Result<SessionResults> {
    let ixs = program
        .request()
        .accounts(accounts::GetResults {
            registry: VotingRegistry::pda().0,
            voting_session: VotingSession::pda(session_id).0,
        })
        .args(instruction::GetResults { session_id })
        .instructions()?;

    let tx = Transaction::new_with_payer(&ixs, Some(&program.payer()));
    let simulation = program
        .rpc()
        .simulate_transaction_with_config(
            &tx,
            RpcSimulateTransactionConfig {
                sig_verify: false,
                replace_recent_blockhash: true,
                commitment: Some(CommitmentConfig::confirmed()),
                ..RpcSimulateTransactionConfig::default()
            },
        )?
        .value;

    if let Some(err) = simulation.err {
        let logs = simulation.logs.unwrap_or_default().join("\n");
        return Err(anyhow!("get_results failed: {err}\n{logs}"));
    }
    // Absent return data means every returned byte was zero.
    let data = simulation
        .return_data
        .map(|return_data| return_data.data.0)
        .unwrap_or_default();
    parse_return_data(&data).map_err(|e| anyhow!(e))
}
