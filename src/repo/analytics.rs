use crate::api::ApiClient;
use crate::models::{FunnelSnapshot, SessionSummary, StageErrorCount, StageTiming};
use anyhow::{Context, Result};

/// Signup analytics endpoints.
/// All queries cover the last `days` days; `offset` shifts the window back,
/// so `offset == days` is the previous period.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    pub fn funnel(client: &ApiClient, days: u32, offset: u32) -> Result<FunnelSnapshot> {
        let mut query = vec![("days", days.to_string())];
        if offset > 0 {
            query.push(("offset", offset.to_string()));
        }
        let snapshot = client
            .get_json("/analytics/funnel", &query)
            .context("Failed to fetch funnel analytics")?;
        Ok(snapshot)
    }

    pub fn timing(client: &ApiClient, days: u32) -> Result<Vec<StageTiming>> {
        let timings = client
            .get_json("/analytics/timing", &[("days", days.to_string())])
            .context("Failed to fetch stage timing")?;
        Ok(timings)
    }

    pub fn sessions(client: &ApiClient, days: u32) -> Result<SessionSummary> {
        let summary = client
            .get_json("/analytics/sessions", &[("days", days.to_string())])
            .context("Failed to fetch session summary")?;
        Ok(summary)
    }

    pub fn errors(client: &ApiClient, days: u32) -> Result<Vec<StageErrorCount>> {
        let errors = client
            .get_json("/analytics/errors", &[("days", days.to_string())])
            .context("Failed to fetch stage error counts")?;
        Ok(errors)
    }
}
