use std::{fmt, io::Cursor};

use anchor_lang::prelude::*;

use crate::{error::ErrorCode, VoterRecord};

#[account]
#[derive(InitSpace, Debug)]
pub struct VotingRegistry {
    /// Only key allowed to create sessions and hand over ownership.
    pub owner: Pubkey,
    /// Bump seed for the PDA
    pub bump: u8,
    /// Number of sessions ever created. Also the id of the next one.
    pub session_count: u64,
}

impl VotingRegistry {
    pub fn pda() -> (Pubkey, u8) {
        Pubkey::find_program_address(&[b"VotingRegistry"], &crate::ID)
    }

    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            bump,
            session_count: 0,
        }
    }

    pub fn voting_session_count(&self) -> u64 {
        self.session_count
    }

    pub fn require_session(&self, session_id: u64) -> Result<()> {
        require!(session_id < self.session_count, ErrorCode::SessionNotFound);
        Ok(())
    }

    /// Allocates the next id and builds its session record with zeroed tallies.
    pub fn create_session(
        &mut self,
        caller: &Pubkey,
        bump: u8,
        description: String,
        candidates: Vec<String>,
        start_time: i64,
        end_time: i64,
    ) -> Result<VotingSession> {
        require_keys_eq!(*caller, self.owner, ErrorCode::Unauthorized);

        let session_id = self.session_count;
        self.session_count = session_id
            .checked_add(1)
            .ok_or(ProgramError::ArithmeticOverflow)?;

        let vote_counts = vec![0; candidates.len()];
        Ok(VotingSession {
            session_id,
            bump,
            description,
            candidates,
            vote_counts,
            start_time,
            end_time,
            exists: true,
        })
    }

    /// Counts `voter`'s ballot in the session stored at `session_info`.
    ///
    /// Unknown ids fail with `SessionNotFound` before the session account is
    /// read, so an unallocated address never reaches deserialization. Every
    /// other precondition is checked before anything is written.
    pub fn cast_vote(
        &self,
        session_id: u64,
        session_info: &AccountInfo,
        voter: &Pubkey,
        candidate_index: u32,
        voter_record: &mut VoterRecord,
        now: i64,
    ) -> Result<()> {
        self.require_session(session_id)?;
        let mut session = VotingSession::load(session_info)?;
        session.cast_vote(voter, candidate_index, voter_record, now)?;
        session.store(session_info)
    }

    pub fn results(&self, session_id: u64, session_info: &AccountInfo) -> Result<SessionResults> {
        self.require_session(session_id)?;
        Ok(VotingSession::load(session_info)?.results())
    }

    /// Hands ownership to `new_owner` and returns the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        require_keys_eq!(*caller, self.owner, ErrorCode::Unauthorized);
        require_keys_neq!(new_owner, Pubkey::default(), ErrorCode::InvalidAddress);

        let previous_owner = self.owner;
        self.owner = new_owner;

        Ok(previous_owner)
    }
}

#[account]
#[derive(Debug, PartialEq, Default)]
pub struct VotingSession {
    /// ID
    pub session_id: u64,
    /// Bump seed for the PDA
    pub bump: u8,
    /// Free-text label
    pub description: String,
    /// Candidate names. Positions are the indices votes refer to.
    pub candidates: Vec<String>,
    /// Tally per candidate, index-aligned with `candidates`
    pub vote_counts: Vec<u64>,
    /// First second (inclusive) at which votes are accepted
    pub start_time: i64,
    /// First second at which votes are no longer accepted
    pub end_time: i64,
    /// Always true for an allocated session
    pub exists: bool,
}

impl VotingSession {
    pub fn pda(session_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[b"VotingSession", &session_id.to_le_bytes()], &crate::ID)
    }

    /// Account size, discriminator included, of a session with the given
    /// description and candidates.
    pub fn space(description: &str, candidates: &[String]) -> usize {
        8 + 8
            + 1
            + 4
            + description.len()
            + 4
            + candidates.iter().map(|c| 4 + c.len()).sum::<usize>()
            + 4
            + 8 * candidates.len()
            + 8
            + 8
            + 1
    }

    pub fn load(info: &AccountInfo) -> Result<Self> {
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::SessionNotFound);
        let data = info.try_borrow_data()?;
        let mut bytes: &[u8] = &data;
        Self::try_deserialize(&mut bytes)
    }

    /// Writes the record back in place. Tallies are fixed width, so the size
    /// never changes after creation.
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let dst: &mut [u8] = &mut data;
        self.try_serialize(&mut Cursor::new(dst))
    }

    /// Checks the window, the ballot and the index, in that order, then
    /// counts the vote. A rejected vote leaves both records untouched.
    pub fn cast_vote(
        &mut self,
        voter: &Pubkey,
        candidate_index: u32,
        voter_record: &mut VoterRecord,
        now: i64,
    ) -> Result<()> {
        require!(self.is_active(now), ErrorCode::VotingNotActive);
        require!(!voter_record.has_voted, ErrorCode::AlreadyVoted);

        let tally = usize::try_from(candidate_index)
            .ok()
            .and_then(|idx| self.vote_counts.get_mut(idx))
            .ok_or_else(|| error!(ErrorCode::InvalidCandidate))?;
        let new_tally = tally
            .checked_add(1)
            .ok_or(ProgramError::ArithmeticOverflow)?;

        *tally = new_tally;
        voter_record.session_id = self.session_id;
        voter_record.voter = *voter;
        voter_record.has_voted = true;

        Ok(())
    }

    pub fn results(&self) -> SessionResults {
        SessionResults {
            names: self.candidates.clone(),
            vote_counts: self.vote_counts.clone(),
        }
    }

    pub fn is_active(&self, now: i64) -> bool {
        self.start_time <= now && now < self.end_time
    }

    pub fn phase(&self, now: i64) -> SessionPhase {
        if now < self.start_time {
            SessionPhase::Upcoming
        } else if self.is_active(now) {
            SessionPhase::Active
        } else {
            SessionPhase::Closed
        }
    }

    pub fn total_votes(&self) -> u64 {
        self.vote_counts.iter().sum()
    }
}

/// Where a session's window stands relative to a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Upcoming,
    Active,
    Closed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::Upcoming => "upcoming",
            SessionPhase::Active => "active",
            SessionPhase::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// The `voting_session(id)` read view. Ids that were never allocated map to
/// the default value, with `exists == false`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VotingSessionSummary {
    pub description: String,
    pub candidates: Vec<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub exists: bool,
}

impl From<&VotingSession> for VotingSessionSummary {
    fn from(session: &VotingSession) -> Self {
        Self {
            description: session.description.clone(),
            candidates: session.candidates.clone(),
            start_time: session.start_time,
            end_time: session.end_time,
            exists: session.exists,
        }
    }
}

/// Candidate names and their tallies, index-aligned.
#[derive(Debug, AnchorSerialize, AnchorDeserialize, Clone, PartialEq)]
pub struct SessionResults {
    pub names: Vec<String>,
    pub vote_counts: Vec<u64>,
}
