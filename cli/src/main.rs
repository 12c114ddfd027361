use anchor_client::{
    solana_sdk::{
        commitment_config::CommitmentConfig,
        pubkey::Pubkey,
        signature::{read_keypair_file, Keypair},
        signer::Signer,
    },
    Client, Cluster, Program,
};
use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{display::*, utils::*};
use log::info;
use std::path::{Path, PathBuf};
use tokio::runtime::Builder;
use voting_registry::{VoterRecord, VotingRegistry};

#[derive(Clone, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, env, default_value = "/")]
    pub payer_path: PathBuf,

    #[arg(short, long, env, default_value = "/")]
    pub authority_path: PathBuf,

    #[arg(short, long, env, default_value = "http://localhost:8899")]
    pub rpc_url: String,

    #[arg(long, env)]
    pub micro_lamports: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Clone)]
pub enum Commands {
    InitRegistry {},
    CreateSession {
        #[arg(long, help = "Free-text label of the session")]
        description: String,

        #[arg(long, value_delimiter = ',', help = "Comma-separated candidate names")]
        candidates: Vec<String>,

        #[arg(long, help = "Unix timestamp voting opens at. Defaults to the cluster time.")]
        start: Option<i64>,

        #[arg(long, help = "Unix timestamp voting closes at. Defaults to start + duration.")]
        end: Option<i64>,

        #[arg(long, default_value = "3600", help = "Window length in seconds when --end is omitted")]
        duration: i64,
    },
    Vote {
        #[arg(long, help = "Id of voting session")]
        id: u64,

        #[arg(long, help = "Index of the candidate in the session")]
        candidate: u32,
    },
    Results {
        #[arg(long, help = "Id of voting session")]
        id: u64,
    },
    ListSessions {},
    TransferOwnership {
        #[arg(long, value_parser = parse_owner_address)]
        new_owner: Pubkey,
    },
    Log {
        #[arg(long, help = "Id of voting session, for sessions and voter records")]
        id: Option<u64>,

        #[arg(long, value_parser = parse_pubkey)]
        voter: Option<Pubkey>,

        #[arg(long, value_parser = parse_log_type, help = "Account type: registry | session | voter-record")]
        ty: LogType,
    },
}

fn read_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| anyhow!("failed to read keypair {}: {e}", path.display()))
}

fn load_client_program(payer: &Keypair, rpc_url: String) -> Result<Program<&Keypair>> {
    let client: Client<&Keypair> = Client::new_with_options(
        Cluster::Custom(rpc_url.clone(), rpc_url),
        payer,
        CommitmentConfig::confirmed(),
    );
    Ok(client.program(voting_registry::id())?)
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(false)
        .try_init();

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    let _enter = runtime.enter();
    let cli = Cli::parse();

    match cli.command {
        Commands::Log { id, voter, ty } => {
            let temp = Keypair::new();
            let program = load_client_program(&temp, cli.rpc_url)?;

            match ty {
                LogType::Registry => {
                    let data = fetch_registry(&program)?;
                    println!("{:?}", data);
                }
                LogType::VotingSession => {
                    let id = id.ok_or_else(|| anyhow!("Missing --id argument"))?;
                    let data = fetch_session(&program, id)?;
                    println!("{:?}", data);
                }
                LogType::VoterRecord => {
                    let id = id.ok_or_else(|| anyhow!("Missing --id argument"))?;
                    let voter = voter.ok_or_else(|| anyhow!("Missing --voter argument"))?;
                    let data: VoterRecord = program.account(VoterRecord::pda(id, &voter).0)?;
                    println!("{:?}", data);
                }
            }
        }
        Commands::ListSessions {} => {
            let temp = Keypair::new();
            let program = load_client_program(&temp, cli.rpc_url)?;

            let registry = fetch_registry(&program)?;
            let sessions = fetch_sessions(&program, &registry)?;
            let now = fetch_cluster_time(&program)?;
            info!(
                "Owner: {}, sessions: {}",
                registry.owner,
                registry.voting_session_count()
            );
            for row in session_rows(&sessions, now) {
                println!("{}", row);
            }
        }
        Commands::Results { id } => {
            // The simulated fee is charged to the payer, so it must be funded.
            let payer = read_keypair(&cli.payer_path)?;
            let program = load_client_program(&payer, cli.rpc_url)?;

            let results = simulate_get_results(&program, id)?;
            info!("== Results For Voting Session {} ==", id);
            for row in result_rows(&results) {
                println!("{}", row);
            }
        }
        Commands::InitRegistry {} => {
            info!("InitRegistry...");

            let payer = read_keypair(&cli.payer_path)?;
            let authority = read_keypair(&cli.authority_path)?;
            let program = load_client_program(&payer, cli.rpc_url)?;

            let tx_sender = &TxSender {
                program: &program,
                micro_lamports: cli.micro_lamports,
                payer: &payer,
                authority: &authority,
            };
            let tx = send_init_registry(tx_sender)?;
            info!("Transaction sent: {}", tx);
            info!("VotingRegistry deployed at address: {}", VotingRegistry::pda().0);
            info!("Registry owned by: {}", authority.pubkey());
        }
        Commands::CreateSession {
            description,
            candidates,
            start,
            end,
            duration,
        } => {
            info!("CreateVotingSession...");

            let payer = read_keypair(&cli.payer_path)?;
            let authority = read_keypair(&cli.authority_path)?;
            let program = load_client_program(&payer, cli.rpc_url)?;

            let start_time = match start {
                Some(start) => start,
                None => fetch_cluster_time(&program)?,
            };
            let end_time = match end {
                Some(end) => end,
                None => start_time
                    .checked_add(duration)
                    .ok_or_else(|| anyhow!("--duration overflows the end time"))?,
            };

            let tx_sender = &TxSender {
                program: &program,
                micro_lamports: cli.micro_lamports,
                payer: &payer,
                authority: &authority,
            };
            let tx = send_create_voting_session(
                tx_sender,
                description,
                candidates,
                start_time,
                end_time,
            )?;
            info!("Transaction sent: {}", tx);
            let session_id = fetch_created_session_id(&program, &tx)?;
            info!(
                "== Created Voting Session {} [{}, {}) ==",
                session_id, start_time, end_time
            );
        }
        Commands::Vote { id, candidate } => {
            info!("Vote...");

            let payer = read_keypair(&cli.payer_path)?;
            let authority = read_keypair(&cli.authority_path)?;
            let program = load_client_program(&payer, cli.rpc_url)?;

            let tx_sender = &TxSender {
                program: &program,
                micro_lamports: cli.micro_lamports,
                payer: &payer,
                authority: &authority,
            };
            let tx = send_vote(tx_sender, id, candidate)?;
            info!("Transaction sent: {}", tx);
            info!(
                "== Voted For Candidate {} In Session {} as {} ==",
                candidate,
                id,
                authority.pubkey()
            );
        }
        Commands::TransferOwnership { new_owner } => {
            info!("TransferOwnership...");

            let payer = read_keypair(&cli.payer_path)?;
            let authority = read_keypair(&cli.authority_path)?;
            let program = load_client_program(&payer, cli.rpc_url)?;

            let tx_sender = &TxSender {
                program: &program,
                micro_lamports: cli.micro_lamports,
                payer: &payer,
                authority: &authority,
            };
            let tx = send_transfer_ownership(tx_sender, new_owner)?;
            info!("Transaction sent: {}", tx);
            info!("Ownership transferred to {}", new_owner);
        }
    }

    Ok(())
}
