pub mod voter_record;
pub mod voting_sessions;

pub use voter_record::*;
pub use voting_sessions::*;
