//! Centralized estimation constants for the reach & frequency engine.
//!
//! These values define the deterministic math for every generator. Keeping
//! them together ensures the model can only be retuned via code changes
//! reviewed in version control, rather than through external plan files.

// Seeded stream ------------------------------------------------------------
pub(crate) const HASH_MULTIPLIER: i32 = 33;
pub(crate) const LCG_MULTIPLIER: u64 = 9_301;
pub(crate) const LCG_INCREMENT: u64 = 49_297;
pub(crate) const LCG_MODULUS: u64 = 233_280;

// Reach ceiling shared by KPIs and CTV ------------------------------------
pub(crate) const MAX_REACH_PCT: f64 = 95.0;

// KPI estimation -----------------------------------------------------------
pub(crate) const CHANNEL_SATURATION: f64 = 10.0;
pub(crate) const SLOT_SATURATION: f64 = 30.0;
pub(crate) const CTV_BOOST_PER_PLATFORM: f64 = 0.04;
pub(crate) const UNIVERSE_BASE: f64 = 40_000_000.0;
pub(crate) const UNIVERSE_SPREAD: f64 = 20_000_000.0;
pub(crate) const REACH_BASE: f64 = 30.0;
pub(crate) const REACH_CHANNEL_WEIGHT: f64 = 35.0;
pub(crate) const REACH_SLOT_WEIGHT: f64 = 20.0;
pub(crate) const REACH_NOISE: f64 = 10.0;
pub(crate) const FREQUENCY_BASE: f64 = 2.5;
pub(crate) const FREQUENCY_CHANNEL_WEIGHT: f64 = 3.0;
pub(crate) const FREQUENCY_SLOT_WEIGHT: f64 = 2.0;
pub(crate) const FREQUENCY_NOISE: f64 = 1.5;
pub(crate) const EFFECTIVE_BASE: f64 = 0.55;
pub(crate) const EFFECTIVE_CHANNEL_WEIGHT: f64 = 0.2;
pub(crate) const EFFECTIVE_NOISE: f64 = 0.1;
pub(crate) const SPEND_PER_CHANNEL: f64 = 120_000.0;
pub(crate) const SPEND_PER_SLOT: f64 = 8_000.0;

// Reach curve --------------------------------------------------------------
pub(crate) const CURVE_MAX_FREQUENCY: u8 = 12;
pub(crate) const CURVE_DECAY_RATE: f64 = 0.35;

// Channel contribution -----------------------------------------------------
pub(crate) const CONTRIBUTION_WEIGHT_NOISE: f64 = 0.3;
pub(crate) const CONTRIBUTION_OVERLAP_BASE: f64 = 5.0;
pub(crate) const CONTRIBUTION_OVERLAP_SPREAD: f64 = 25.0;
pub(crate) const CONTRIBUTION_COST_BASE: f64 = 8_000.0;
pub(crate) const CONTRIBUTION_COST_SPREAD: f64 = 15_000.0;

// Overlap matrix -----------------------------------------------------------
pub(crate) const SELF_OVERLAP_PCT: f64 = 100.0;
pub(crate) const PAIR_OVERLAP_BASE: f64 = 8.0;
pub(crate) const PAIR_OVERLAP_SPREAD: f64 = 30.0;

// Daypart efficiency -------------------------------------------------------
pub(crate) const DAYPART_SLOT_CAP: u32 = 5;
pub(crate) const DAYPART_SLOT_DIVISOR: f64 = 3.0;
pub(crate) const PEAK_REACH_BASE: f64 = 12.0;
pub(crate) const PEAK_REACH_SPREAD: f64 = 8.0;
pub(crate) const OFFPEAK_REACH_BASE: f64 = 4.0;
pub(crate) const OFFPEAK_REACH_SPREAD: f64 = 6.0;
pub(crate) const DAYPART_GRP_MULT_BASE: f64 = 2.0;
pub(crate) const DAYPART_GRP_MULT_SPREAD: f64 = 3.0;
pub(crate) const PEAK_CPM_BASE: f64 = 18.0;
pub(crate) const PEAK_CPM_SPREAD: f64 = 12.0;
pub(crate) const OFFPEAK_CPM_BASE: f64 = 6.0;
pub(crate) const OFFPEAK_CPM_SPREAD: f64 = 8.0;
pub(crate) const PEAK_ATTENTION_BASE: f64 = 65.0;
pub(crate) const PEAK_ATTENTION_SPREAD: f64 = 25.0;
pub(crate) const OFFPEAK_ATTENTION_BASE: f64 = 30.0;
pub(crate) const OFFPEAK_ATTENTION_SPREAD: f64 = 35.0;
pub(crate) const EFFICIENCY_HIGH_THRESHOLD: f64 = 1.2;
pub(crate) const EFFICIENCY_MEDIUM_THRESHOLD: f64 = 0.6;

// CTV combination ----------------------------------------------------------
pub(crate) const CTV_ONLY_BASE: f64 = 3.0;
pub(crate) const CTV_ONLY_PER_PLATFORM: f64 = 2.5;
pub(crate) const LINEAR_ONLY_SHARE: f64 = 0.7;
pub(crate) const DEDUP_SAVINGS_SHARE: f64 = 0.6;
pub(crate) const PLATFORM_REACH_BASE: f64 = 2.0;
pub(crate) const PLATFORM_REACH_SPREAD: f64 = 6.0;
pub(crate) const PLATFORM_INCREMENTAL_BASE: f64 = 1.0;
pub(crate) const PLATFORM_INCREMENTAL_SPREAD: f64 = 3.0;

// Competitive profiles -----------------------------------------------------
pub(crate) const COMPETITOR_MIN_CHANNELS: usize = 2;
pub(crate) const COMPETITOR_CHANNEL_SPREAD: usize = 5;
pub(crate) const COMPETITOR_SPEND_BASE: f64 = 200_000.0;
pub(crate) const COMPETITOR_SPEND_SPREAD: f64 = 1_800_000.0;
pub(crate) const COMPETITOR_SOV_BASE: f64 = 5.0;
pub(crate) const COMPETITOR_SOV_SPREAD: f64 = 20.0;
pub(crate) const COMPETITOR_GRP_BASE: f64 = 100.0;
pub(crate) const COMPETITOR_GRP_SPREAD: f64 = 400.0;
pub(crate) const ALLOCATION_TOTAL_PCT: u32 = 100;
pub(crate) const ALLOCATION_DAYPART_CAP: u32 = 30;

// Scenario comparison ------------------------------------------------------
pub(crate) const MIN_COMPARE_SCENARIOS: usize = 2;
