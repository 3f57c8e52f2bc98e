use crate::api::{ApiClient, ApiError};
use crate::models::{Tenant, TenantStatus};
use anyhow::{Context, Result};

/// Tenant repository over the platform API
///
/// # Example
///
/// ```no_run
/// use provadmin::config::AppContext;
/// use provadmin::models::TenantStatus;
/// use provadmin::repo::TenantRepo;
///
/// let ctx = AppContext::load().unwrap();
/// let active = TenantRepo::list(&ctx.client, Some(TenantStatus::Active), None).unwrap();
/// ```
pub struct TenantRepo;

impl TenantRepo {
    /// List tenants, optionally filtered server-side by status and plan
    pub fn list(client: &ApiClient, status: Option<TenantStatus>, plan: Option<&str>) -> Result<Vec<Tenant>> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(plan) = plan {
            query.push(("plan", plan.to_string()));
        }
        let tenants = client
            .get_json("/tenants", &query)
            .context("Failed to list tenants")?;
        Ok(tenants)
    }

    /// Get tenant by ID
    pub fn get(client: &ApiClient, id: i64) -> Result<Option<Tenant>> {
        match client.get_json(&format!("/tenants/{}", id), &[]) {
            Ok(tenant) => Ok(Some(tenant)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to get tenant {}", id)),
        }
    }

    /// Change a tenant's status (suspend or resume)
    pub fn set_status(client: &ApiClient, id: i64, status: TenantStatus) -> Result<()> {
        client
            .patch(&format!("/tenants/{}", id), &serde_json::json!({ "status": status.as_str() }))
            .with_context(|| format!("Failed to set status of tenant {}", id))?;
        Ok(())
    }
}
