// Funnel stage consolidation
//
// Raw stage labels change from release to release ("Started", "Step 1 Completed",
// "Stripe Redirect Page", ...). Display code works with a fixed set of canonical
// buckets, so every raw stage is resolved to a bucket before rendering.

use crate::models::FunnelStage;

/// Canonical buckets, in funnel order
pub const CANONICAL_STAGES: &[&str] = &[
    "Button Clicks",
    "Plan Selected",
    "Account Setup",
    "Stripe Checkout",
    "Provisioned",
];

/// Raw stage label -> canonical bucket.
/// Order matters: substring resolution takes the first key that matches.
/// Every canonical name is also a key so canonical names resolve to themselves.
pub const STAGE_MAP: &[(&str, &str)] = &[
    ("Button Clicks", "Button Clicks"),
    ("Button Click", "Button Clicks"),
    ("Signup Clicked", "Button Clicks"),
    ("Started", "Plan Selected"),
    ("Plan Selected", "Plan Selected"),
    ("Step 1 Completed", "Account Setup"),
    ("Account Setup", "Account Setup"),
    ("Account Created", "Account Setup"),
    ("Stripe Redirect", "Stripe Checkout"),
    ("Stripe Checkout", "Stripe Checkout"),
    ("Payment Completed", "Stripe Checkout"),
    ("Provisioned", "Provisioned"),
    ("Provisioning Complete", "Provisioned"),
    ("Tenant Provisioned", "Provisioned"),
];

/// Resolve a raw stage label to its canonical bucket name.
///
/// 1. exact key match
/// 2. first key (declared order) where either string contains the other,
///    case-sensitive and untrimmed
/// 3. otherwise the raw label is its own bucket
pub fn resolve_stage(raw: &str) -> &str {
    if let Some((_, canonical)) = STAGE_MAP.iter().find(|(key, _)| *key == raw) {
        return canonical;
    }

    STAGE_MAP
        .iter()
        .find(|(key, _)| raw.contains(key) || key.contains(raw))
        .map(|(_, canonical)| *canonical)
        .unwrap_or(raw)
}

/// True if the name is one of the fixed canonical buckets
pub fn is_canonical(name: &str) -> bool {
    CANONICAL_STAGES.contains(&name)
}

/// Collapse raw funnel stages into canonical buckets.
///
/// Within a bucket the stage with the highest count survives; a later stage only
/// replaces the kept one on a strictly greater count. Buckets are ordered by
/// percentage, highest first; equal percentages keep first-encounter order.
/// `dropoff` is recomputed against the previous output entry and is not clamped,
/// so non-monotonic counts produce negative drop-offs. It saturates at the
/// `i64` bounds.
///
/// The input is left untouched. An empty input gives an empty output.
pub fn consolidate_stages(stages: &[FunnelStage]) -> Vec<FunnelStage> {
    let mut buckets: Vec<FunnelStage> = Vec::new();

    for stage in stages {
        let canonical = resolve_stage(&stage.name);
        match buckets.iter_mut().find(|b| b.name == canonical) {
            Some(kept) => {
                if stage.count > kept.count {
                    kept.count = stage.count;
                    kept.percentage = stage.percentage;
                }
            }
            None => buckets.push(FunnelStage {
                name: canonical.to_string(),
                count: stage.count,
                percentage: stage.percentage,
                dropoff: None,
            }),
        }
    }

    // sort_by is stable, which gives the first-encounter tie-break
    buckets.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    let mut previous_count: Option<i64> = None;
    for bucket in buckets.iter_mut() {
        bucket.dropoff = Some(match previous_count {
            Some(prev) => prev.saturating_sub(bucket.count),
            None => 0,
        });
        previous_count = Some(bucket.count);
    }

    buckets
}
