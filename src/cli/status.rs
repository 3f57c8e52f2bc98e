// Dashboard data for `provadmin status`

use serde::Serialize;
use crate::api::ApiError;
use crate::cli::error::find_api_error;
use crate::config::AppContext;
use crate::funnel::{consolidate_stages, overall_conversion};
use crate::models::{ContactStatus, SessionSummary, TenantStatus};
use crate::repo::{AnalyticsRepo, ContactRepo, TenantRepo};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantCount {
    pub status: TenantStatus,
    pub count: usize,
}

/// Headline numbers of the consolidated funnel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelHeadline {
    pub stages: usize,
    pub overall_conversion: Option<f64>,
}

/// One value per dashboard section; `None` means the section is unavailable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub days: u32,
    pub tenants: Option<Vec<TenantCount>>,
    pub funnel: Option<FunnelHeadline>,
    pub sessions: Option<SessionSummary>,
    pub new_contacts: Option<usize>,
}

/// Turn a failed optional fetch into `None`. Internal failures (network, bad
/// responses) still abort the whole command.
pub(crate) fn section<T>(name: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            if find_api_error(&e).map(ApiError::is_internal).unwrap_or(false) {
                return Err(e);
            }
            log::warn!("{} unavailable: {:#}", name, e);
            Ok(None)
        }
    }
}

pub fn compute_dashboard(ctx: &AppContext) -> Result<Dashboard> {
    let client = &ctx.client;
    let days = ctx.settings.funnel_days;

    let tenants = section("tenants", TenantRepo::list(client, None, None))?.map(|tenants| {
        TenantStatus::ALL
            .iter()
            .map(|status| TenantCount {
                status: *status,
                count: tenants.iter().filter(|t| t.status == *status).count(),
            })
            .collect()
    });

    let funnel = section("funnel", AnalyticsRepo::funnel(client, days, 0))?.map(|snapshot| {
        let stages = consolidate_stages(&snapshot.stages);
        FunnelHeadline {
            stages: stages.len(),
            overall_conversion: overall_conversion(&stages),
        }
    });

    let sessions = section("sessions", AnalyticsRepo::sessions(client, days))?;

    let new_contacts = section("contacts", ContactRepo::list(client, Some(ContactStatus::New)))?
        .map(|messages| messages.iter().filter(|m| m.status == ContactStatus::New).count());

    Ok(Dashboard { days, tenants, funnel, sessions, new_contacts })
}
