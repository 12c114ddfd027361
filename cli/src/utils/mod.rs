pub mod fetch_utils;
pub mod parsers;
pub mod send_utils;

pub use fetch_utils::*;
pub use parsers::*;
pub use send_utils::*;
