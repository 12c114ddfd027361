use anchor_client::{
    solana_client::rpc_config::RpcTransactionConfig,
    solana_sdk::{
        account::{from_account, Account},
        commitment_config::CommitmentConfig,
        signature::{Keypair, Signature},
        sysvar::{self, clock::Clock},
    },
    ClientError, Program,
};
use anchor_lang::Event;
use anyhow::anyhow;
use voting_registry::{
    events::VotingSessionCreated, VotingRegistry, VotingSession, VotingSessionSummary,
};

use crate::utils::parse_event;

pub fn fetch_registry(program: &Program<&Keypair>) -> Result<VotingRegistry, ClientError> {
    program.account(VotingRegistry::pda().0)
}

pub fn fetch_session(
    program: &Program<&Keypair>,
    session_id: u64,
) -> Result<VotingSession, ClientError> {
    program.account(VotingSession::pda(session_id).0)
}

/// Summary of one session. Ids past the registry's count come back as the
/// default summary with `exists == false`.
pub fn fetch_voting_session(
    program: &Program<&Keypair>,
    session_id: u64,
) -> Result<VotingSessionSummary, ClientError> {
    if session_id >= fetch_registry(program)?.voting_session_count() {
        return Ok(VotingSessionSummary::default());
    }
    Ok(VotingSessionSummary::from(&fetch_session(program, session_id)?))
}

/// Every session in id order.
pub fn fetch_sessions(
    program: &Program<&Keypair>,
    registry: &VotingRegistry,
) -> Result<Vec<VotingSession>, ClientError> {
    (0..registry.voting_session_count())
        .map(|id| fetch_session(program, id))
        .collect()
}

/// Unix timestamp from the cluster's `Clock` sysvar. Voting windows are
/// judged against this clock, not the local one.
pub fn fetch_cluster_time(program: &Program<&Keypair>) -> Result<i64, ClientError> {
    let account = program.rpc().get_account(&sysvar::clock::ID)?;
    clock_unix_timestamp(&account)
}

fn clock_unix_timestamp(account: &Account) -> Result<i64, ClientError> {
    let clock: Clock = from_account(account).ok_or(ClientError::AccountNotFound)?;
    Ok(clock.unix_timestamp)
}

/// First `E` emitted by a confirmed transaction.
pub fn fetch_tx_event<E: Event>(
    program: &Program<&Keypair>,
    tx: &Signature,
) -> anyhow::Result<E> {
    let tx_details = program.rpc().get_transaction_with_config(
        tx,
        RpcTransactionConfig {
            encoding: None,
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: None,
        },
    )?;
    let logs: Option<Vec<String>> = tx_details
        .transaction
        .meta
        .and_then(|meta| meta.log_messages.into());
    parse_event(&logs.unwrap_or_default()).ok_or_else(|| anyhow!("no matching event in {tx}"))
}

/// Id the program assigned in a `create_voting_session` transaction, taken
/// from its `VotingSessionCreated` event.
pub fn fetch_created_session_id(
    program: &Program<&Keypair>,
    tx: &Signature,
) -> anyhow::Result<u64> {
    let event: VotingSessionCreated = fetch_tx_event(program, tx)?;
    Ok(event.session_id)
}
