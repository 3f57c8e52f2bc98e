use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// One named checkpoint of the signup funnel, as reported by the analytics API.
///
/// `dropoff` is derived data. The API may omit it; funnel consolidation
/// always fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub count: i64,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<i64>,
}

impl FunnelStage {
    pub fn new(name: &str, count: i64, percentage: f64) -> Self {
        Self {
            name: name.to_string(),
            count,
            percentage,
            dropoff: None,
        }
    }
}

/// Funnel response for one reporting period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunnelSnapshot {
    #[serde(default)]
    pub stages: Vec<FunnelStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Average time spent reaching a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: String,
    pub avg_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_seconds: Option<f64>,
}

/// Signup session totals for a period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub abandoned: i64,
}

impl SessionSummary {
    /// Share of sessions that completed signup, if any sessions exist
    pub fn completion_rate(&self) -> Option<f64> {
        if self.total <= 0 {
            None
        } else {
            Some(self.completed as f64 * 100.0 / self.total as f64)
        }
    }
}

/// Client-side errors recorded against a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageErrorCount {
    pub stage: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_without_dropoff_deserializes() {
        let stage: FunnelStage =
            serde_json::from_str(r#"{"name":"Started","count":80,"percentage":80.0}"#).unwrap();
        assert_eq!(stage.name, "Started");
        assert_eq!(stage.dropoff, None);
    }

    #[test]
    fn test_snapshot_missing_stages_is_empty() {
        let snapshot: FunnelSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.stages.is_empty());
    }

    #[test]
    fn test_completion_rate() {
        let summary = SessionSummary { total: 200, active: 20, completed: 50, abandoned: 130 };
        assert_eq!(summary.completion_rate(), Some(25.0));
        assert_eq!(SessionSummary::default().completion_rate(), None);
    }
}
