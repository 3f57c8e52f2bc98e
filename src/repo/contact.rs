use crate::api::{ApiClient, ApiError};
use crate::models::{ContactMessage, ContactStatus};
use anyhow::{Context, Result};

/// Contact-form submissions awaiting triage
pub struct ContactRepo;

impl ContactRepo {
    pub fn list(client: &ApiClient, status: Option<ContactStatus>) -> Result<Vec<ContactMessage>> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default();
        let messages = client
            .get_json("/contacts", &query)
            .context("Failed to list contact messages")?;
        Ok(messages)
    }

    pub fn get(client: &ApiClient, id: i64) -> Result<Option<ContactMessage>> {
        match client.get_json(&format!("/contacts/{}", id), &[]) {
            Ok(message) => Ok(Some(message)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to get contact message {}", id)),
        }
    }

    pub fn set_status(client: &ApiClient, id: i64, status: ContactStatus) -> Result<()> {
        client
            .patch(&format!("/contacts/{}", id), &serde_json::json!({ "status": status.as_str() }))
            .with_context(|| format!("Failed to update contact message {}", id))?;
        Ok(())
    }
}
