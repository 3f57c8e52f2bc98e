// Platform API access: transports, typed client and errors

pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, ReplayTransport, Transport, REPLAY_LOG};
