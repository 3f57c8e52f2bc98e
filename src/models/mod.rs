// Data models for provadmin
// These structs mirror the JSON payloads of the platform API

pub mod funnel;
pub mod tenant;
pub mod admin;
pub mod contact;

pub use funnel::*;
pub use tenant::*;
pub use admin::*;
pub use contact::*;
