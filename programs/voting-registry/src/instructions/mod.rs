pub mod registry;
pub mod session;

pub use registry::*;
pub use session::*;
