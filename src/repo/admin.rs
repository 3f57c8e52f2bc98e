use crate::api::{ApiClient, ApiError};
use crate::models::{AdminRole, AdminUser, NewAdmin};
use anyhow::{Context, Result};

pub struct AdminRepo;

impl AdminRepo {
    pub fn list(client: &ApiClient) -> Result<Vec<AdminUser>> {
        let admins = client
            .get_json("/admins", &[])
            .context("Failed to list admin users")?;
        Ok(admins)
    }

    pub fn get(client: &ApiClient, id: i64) -> Result<Option<AdminUser>> {
        match client.get_json(&format!("/admins/{}", id), &[]) {
            Ok(admin) => Ok(Some(admin)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to get admin user {}", id)),
        }
    }

    /// Create an admin user; the API returns the stored record
    pub fn create(client: &ApiClient, new_admin: &NewAdmin) -> Result<AdminUser> {
        let admin = client
            .post_json("/admins", new_admin)
            .with_context(|| format!("Failed to create admin user: {}", new_admin.email))?;
        Ok(admin)
    }

    pub fn set_role(client: &ApiClient, id: i64, role: AdminRole) -> Result<()> {
        client
            .patch(&format!("/admins/{}", id), &serde_json::json!({ "role": role.as_str() }))
            .with_context(|| format!("Failed to change role of admin user {}", id))?;
        Ok(())
    }

    pub fn delete(client: &ApiClient, id: i64) -> Result<()> {
        client
            .delete(&format!("/admins/{}", id))
            .with_context(|| format!("Failed to remove admin user {}", id))?;
        Ok(())
    }
}
