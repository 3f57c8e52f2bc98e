pub mod admin;
pub mod analytics;
pub mod auth;
pub mod contact;
pub mod tenant;

pub use admin::*;
pub use analytics::*;
pub use auth::*;
pub use contact::*;
pub use tenant::*;
