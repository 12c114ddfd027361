pub mod init_registry;
pub mod transfer_ownership;

pub use init_registry::*;
pub use transfer_ownership::*;
