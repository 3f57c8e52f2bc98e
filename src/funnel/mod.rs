// Signup funnel analytics: stage consolidation and derived metrics

pub mod aggregate;
pub mod metrics;

pub use aggregate::{consolidate_stages, resolve_stage, is_canonical, CANONICAL_STAGES, STAGE_MAP};
pub use metrics::*;
