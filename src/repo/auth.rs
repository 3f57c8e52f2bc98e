use crate::api::ApiClient;
use crate::models::LoginResponse;
use anyhow::{Context, Result};

pub struct AuthRepo;

impl AuthRepo {
    /// Exchange credentials for a bearer token
    pub fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse> {
        let response = client
            .post_json("/auth/login", &serde_json::json!({ "email": email, "password": password }))
            .context("Login failed")?;
        Ok(response)
    }
}
