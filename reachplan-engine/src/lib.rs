//! Reachplan Engine
//!
//! Deterministic reach and frequency estimation for broadcast and streaming
//! media plans. Every output is a pure function of the plan: identical plans
//! produce identical KPIs, curves, matrices and competitor profiles.

pub mod catalog;
pub mod competitive;
pub mod constants;
pub mod contribution;
pub mod ctv;
pub mod curve;
pub mod daypart;
pub mod engine;
pub mod error;
pub mod kpi;
pub mod numbers;
pub mod overlap;
pub mod plan;
pub mod scenario;
pub mod seed;

// Re-export commonly used types
pub use catalog::{StaticTaxonomy, TaxonomySource};
pub use competitive::{
    CompetitorChannels, CompetitorProfile, DaypartAllocation, competitor_key, competitor_profile,
    competitor_profiles,
};
pub use contribution::{ChannelContribution, channel_contributions};
pub use ctv::{CtvCombinedResult, PlatformReach, combine_ctv};
pub use curve::{ReachCurvePoint, reach_curve};
pub use daypart::{DaypartEfficiencyEntry, EfficiencyRating, daypart_efficiency, optimize_dayparts};
pub use engine::{PlanEngine, PlanRun, estimate_plan};
pub use error::{PlanError, RunError, ScenarioError};
pub use kpi::{KpiResult, estimate_kpis};
pub use overlap::{OverlapEntry, overlap_between, overlap_matrix};
pub use plan::{Daypart, DaypartSchedule, MediaPlanConfig, PlanGuards, SlotAllocation};
pub use scenario::{
    ComparisonMetric, ComparisonRow, MetricValue, Scenario, ScenarioComparison, ScenarioId,
    ScenarioStore,
};
pub use seed::{PlanStreams, SeededStream, StreamDomain, seed_from_key};
