use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_lang::{AnchorDeserialize, Event};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::str::FromStr;

/// Upper bound on instruction return data.
pub const MAX_RETURN_DATA: usize = 1024;

const PROGRAM_DATA_PREFIX: &str = "Program data: ";

pub fn parse_pubkey(s: &str) -> Result<Pubkey, String> {
    Pubkey::from_str(s).map_err(|e| format!("invalid pubkey: {e}"))
}

/// Parses the target of an ownership transfer. The default key is rejected
/// up front since the program refuses it as well.
pub fn parse_owner_address(s: &str) -> Result<Pubkey, String> {
    let pubkey = Pubkey::from_str(s).map_err(|e| format!("Invalid address: {e}"))?;
    if pubkey == Pubkey::default() {
        return Err("Invalid address: the default key cannot own the registry".to_string());
    }
    Ok(pubkey)
}

pub fn parse_log_type(s: &str) -> Result<LogType, String> {
    match s.to_lowercase().as_str() {
        "registry" => Ok(LogType::Registry),
        "session" => Ok(LogType::VotingSession),
        "voter-record" => Ok(LogType::VoterRecord),
        _ => Err(format!("invalid log type: {}", s)),
    }
}

#[derive(Clone, Debug)]
pub enum LogType {
    Registry,
    VotingSession,
    VoterRecord,
}

/// First `E` emitted in a transaction's log messages.
pub fn parse_event<E: Event>(logs: &[String]) -> Option<E> {
    logs.iter()
        .filter_map(|line| line.strip_prefix(PROGRAM_DATA_PREFIX))
        .filter_map(|data| STANDARD.decode(data).ok())
        .find_map(|bytes| {
            let payload = bytes.strip_prefix(E::DISCRIMINATOR)?;
            E::try_from_slice(payload).ok()
        })
}

/// Decodes base64 return data. The runtime trims trailing zero bytes off
/// return data, so they are restored before deserializing.
pub fn parse_return_data<T: AnchorDeserialize>(data: &str) -> Result<T, String> {
    let mut bytes = STANDARD
        .decode(data)
        .map_err(|e| format!("invalid return data: {e}"))?;
    if bytes.len() < MAX_RETURN_DATA {
        bytes.resize(MAX_RETURN_DATA, 0);
    }
    T::deserialize(&mut bytes.as_slice()).map_err(|e| format!("invalid return data: {e}"))
}
