use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Tenant lifecycle state on the provisioning platform
///
/// - Provisioning: signup finished, infrastructure still being created
/// - Active: serving traffic
/// - Suspended: disabled by an administrator, data retained
/// - Failed: provisioning did not complete
/// - Cancelled: subscription ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Provisioning,
    Suspended,
    Failed,
    Cancelled,
}

impl TenantStatus {
    pub const ALL: [TenantStatus; 5] = [
        TenantStatus::Active,
        TenantStatus::Provisioning,
        TenantStatus::Suspended,
        TenantStatus::Failed,
        TenantStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Provisioning => "provisioning",
            TenantStatus::Suspended => "suspended",
            TenantStatus::Failed => "failed",
            TenantStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(TenantStatus::Active),
            "provisioning" => Some(TenantStatus::Provisioning),
            "suspended" => Some(TenantStatus::Suspended),
            "failed" => Some(TenantStatus::Failed),
            "cancelled" => Some(TenantStatus::Cancelled),
            _ => None,
        }
    }
}

/// Tenant model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub subdomain: String,
    pub plan: String,
    pub status: TenantStatus,
    pub admin_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
}
