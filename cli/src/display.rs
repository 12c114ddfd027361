use voting_registry::{SessionResults, VotingSession, VotingSessionSummary};

/// One line per session, in the given order, with the phase derived from `now`.
pub fn session_rows(sessions: &[VotingSession], now: i64) -> Vec<String> {
    sessions
        .iter()
        .map(|session| {
            let summary = VotingSessionSummary::from(session);
            format!(
                "#{} {:?} [{}, {}) candidates={} exists={} phase={}",
                session.session_id,
                summary.description,
                summary.start_time,
                summary.end_time,
                summary.candidates.len(),
                summary.exists,
                session.phase(now),
            )
        })
        .collect()
}

pub fn result_rows(results: &SessionResults) -> Vec<String> {
    results
        .names
        .iter()
        .zip(&results.vote_counts)
        .enumerate()
        .map(|(idx, (name, votes))| format!("[{idx}] {name}: {votes}"))
        .collect()
}
