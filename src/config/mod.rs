pub mod context;
pub mod settings;

pub use context::AppContext;
pub use settings::*;
