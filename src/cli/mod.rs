pub mod commands;
pub mod commands_funnel;
pub mod error;
pub mod output;
pub mod status;
pub mod abbrev;

pub use commands::*;
pub use output::*;
pub use error::*;
