pub mod cast_vote;
pub mod create_voting_session;
pub mod get_results;

pub use cast_vote::*;
pub use create_voting_session::*;
pub use get_results::*;
