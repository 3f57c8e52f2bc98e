// Display metrics derived from consolidated funnel stages

use serde::Serialize;
use crate::models::{FunnelStage, StageErrorCount, StageTiming};
use crate::funnel::aggregate::{consolidate_stages, resolve_stage};

/// Expected share of entry traffic per canonical bucket
pub const BENCHMARKS: &[(&str, f64)] = &[
    ("Button Clicks", 100.0),
    ("Plan Selected", 60.0),
    ("Account Setup", 45.0),
    ("Stripe Checkout", 30.0),
    ("Provisioned", 25.0),
];

/// Deltas within this many percentage points of the benchmark count as on par
pub const BENCHMARK_TOLERANCE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkVerdict {
    Above,
    OnPar,
    Below,
}

impl BenchmarkVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkVerdict::Above => "above",
            BenchmarkVerdict::OnPar => "on par",
            BenchmarkVerdict::Below => "below",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub benchmark: f64,
    /// Percentage points above (positive) or below (negative) the benchmark
    pub delta: f64,
    pub verdict: BenchmarkVerdict,
}

/// One rendered funnel row with its derived metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelReportRow {
    pub stage: FunnelStage,
    /// Conversion from the previous row, None for the first row
    pub step_conversion: Option<f64>,
    /// Percent change in count against the previous period
    pub period_change: Option<f64>,
    pub benchmark: Option<BenchmarkComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelReport {
    pub rows: Vec<FunnelReportRow>,
    pub overall_conversion: Option<f64>,
}

impl FunnelReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Conversion from one stage count to the next, in percent
pub fn step_conversion(prev_count: i64, count: i64) -> Option<f64> {
    if prev_count <= 0 {
        None
    } else {
        Some(count as f64 * 100.0 / prev_count as f64)
    }
}

/// Conversion from the first to the last consolidated stage
pub fn overall_conversion(consolidated: &[FunnelStage]) -> Option<f64> {
    match (consolidated.first(), consolidated.last()) {
        (Some(first), Some(last)) => step_conversion(first.count, last.count),
        _ => None,
    }
}

/// Percent change of a stage's count against the same canonical stage
/// in a previous snapshot. `previous` may be raw; it is consolidated first.
pub fn period_change(current: &FunnelStage, previous: &[FunnelStage]) -> Option<f64> {
    let previous = consolidate_stages(previous);
    period_change_consolidated(current, &previous)
}

fn period_change_consolidated(current: &FunnelStage, previous: &[FunnelStage]) -> Option<f64> {
    let canonical = resolve_stage(&current.name);
    let matched = previous.iter().find(|p| p.name == canonical)?;
    if matched.count == 0 {
        return None;
    }
    Some((current.count as f64 - matched.count as f64) * 100.0 / matched.count as f64)
}

/// Benchmark percentage for a canonical bucket
pub fn benchmark_for(stage_name: &str) -> Option<f64> {
    BENCHMARKS
        .iter()
        .find(|(name, _)| *name == stage_name)
        .map(|(_, pct)| *pct)
}

/// Compare a consolidated stage against the benchmark table.
/// Pass-through stages have no benchmark.
pub fn compare_to_benchmark(stage: &FunnelStage) -> Option<BenchmarkComparison> {
    let benchmark = benchmark_for(&stage.name)?;
    let delta = stage.percentage - benchmark;
    let verdict = if delta > BENCHMARK_TOLERANCE {
        BenchmarkVerdict::Above
    } else if delta < -BENCHMARK_TOLERANCE {
        BenchmarkVerdict::Below
    } else {
        BenchmarkVerdict::OnPar
    };
    Some(BenchmarkComparison { benchmark, delta, verdict })
}

/// Consolidate a funnel and attach every display metric.
/// All funnel views render from this.
pub fn build_report(current: &[FunnelStage], previous: Option<&[FunnelStage]>) -> FunnelReport {
    let stages = consolidate_stages(current);
    let previous = previous.map(consolidate_stages);
    let overall = overall_conversion(&stages);

    let mut rows = Vec::with_capacity(stages.len());
    let mut prev_count: Option<i64> = None;
    for stage in stages {
        let step = prev_count.and_then(|prev| step_conversion(prev, stage.count));
        let change = previous
            .as_deref()
            .and_then(|prev| period_change_consolidated(&stage, prev));
        let benchmark = compare_to_benchmark(&stage);
        prev_count = Some(stage.count);
        rows.push(FunnelReportRow {
            stage,
            step_conversion: step,
            period_change: change,
            benchmark,
        });
    }

    FunnelReport { rows, overall_conversion: overall }
}

/// Error counts summed per canonical bucket, in first-encounter order
pub fn errors_by_bucket(errors: &[StageErrorCount]) -> Vec<StageErrorCount> {
    let mut buckets: Vec<StageErrorCount> = Vec::new();
    for error in errors {
        let canonical = resolve_stage(&error.stage);
        match buckets.iter_mut().find(|b| b.stage == canonical) {
            Some(bucket) => bucket.count = bucket.count.saturating_add(error.count),
            None => buckets.push(StageErrorCount { stage: canonical.to_string(), count: error.count }),
        }
    }
    buckets
}

/// One timing per canonical bucket. When several raw stages share a bucket
/// the slowest average is kept.
pub fn timing_by_bucket(timings: &[StageTiming]) -> Vec<StageTiming> {
    let mut buckets: Vec<StageTiming> = Vec::new();
    for timing in timings {
        let canonical = resolve_stage(&timing.stage);
        match buckets.iter_mut().find(|b| b.stage == canonical) {
            Some(bucket) => {
                if timing.avg_seconds > bucket.avg_seconds {
                    bucket.avg_seconds = timing.avg_seconds;
                    bucket.median_seconds = timing.median_seconds;
                }
            }
            None => buckets.push(StageTiming { stage: canonical.to_string(), ..timing.clone() }),
        }
    }
    buckets
}
