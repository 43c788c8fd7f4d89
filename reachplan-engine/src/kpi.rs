//! Headline plan KPIs: universe, reach, frequency, GRPs, effective reach, spend and CPM.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CHANNEL_SATURATION, CTV_BOOST_PER_PLATFORM, EFFECTIVE_BASE, EFFECTIVE_CHANNEL_WEIGHT,
    EFFECTIVE_NOISE, FREQUENCY_BASE, FREQUENCY_CHANNEL_WEIGHT, FREQUENCY_NOISE,
    FREQUENCY_SLOT_WEIGHT, MAX_REACH_PCT, REACH_BASE, REACH_CHANNEL_WEIGHT, REACH_NOISE,
    REACH_SLOT_WEIGHT, SLOT_SATURATION, SPEND_PER_CHANNEL, SPEND_PER_SLOT, UNIVERSE_BASE,
    UNIVERSE_SPREAD,
};
use crate::numbers::{round_f64_to_u64, round1, round2, u64_to_f64, usize_to_f64};
use crate::plan::MediaPlanConfig;
use crate::seed::SeededStream;

/// Derived plan KPIs, immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub universe: u64,
    /// Absolute reach: `round(universe * reach_pct / 100)`.
    pub reach: u64,
    pub reach_pct: f64,
    pub avg_frequency: f64,
    /// `round(reach_pct * avg_frequency, 1)`.
    pub grp: f64,
    pub effective_reach_pct: f64,
    pub estimated_spend: u64,
    pub cpm: f64,
}

/// Diminishing returns past ten channels.
#[must_use]
pub fn channel_factor(channel_count: usize) -> f64 {
    (usize_to_f64(channel_count) / CHANNEL_SATURATION).min(1.0)
}

/// Diminishing returns past thirty booked slots.
#[must_use]
pub fn slot_factor(total_slots: u32) -> f64 {
    (f64::from(total_slots) / SLOT_SATURATION).min(1.0)
}

/// Reach and spend uplift from streaming platforms, `1.0` without CTV.
#[must_use]
pub fn ctv_boost(config: &MediaPlanConfig) -> f64 {
    1.0 + CTV_BOOST_PER_PLATFORM * usize_to_f64(config.active_platforms().len())
}

/// Absolute reach implied by a universe and reach percentage.
#[must_use]
pub fn absolute_reach(universe: u64, reach_pct: f64) -> u64 {
    round_f64_to_u64(u64_to_f64(universe) * reach_pct / 100.0)
}

/// Estimate plan KPIs, drawing noise from `stream`.
///
/// Draw order: universe, reach, frequency, effective reach.
pub fn estimate_kpis(config: &MediaPlanConfig, stream: &mut SeededStream) -> KpiResult {
    let channels = config.channels.len();
    let total_slots = config.total_slots();
    let cf = channel_factor(channels);
    let sf = slot_factor(total_slots);
    let boost = ctv_boost(config);

    let universe = round_f64_to_u64(stream.spread(UNIVERSE_BASE, UNIVERSE_SPREAD));

    let raw_reach = REACH_BASE
        + REACH_CHANNEL_WEIGHT * cf
        + REACH_SLOT_WEIGHT * sf
        + REACH_NOISE * stream.draw();
    let reach_pct = round1((raw_reach * boost).clamp(0.0, MAX_REACH_PCT));

    let avg_frequency = round1(
        FREQUENCY_BASE
            + FREQUENCY_CHANNEL_WEIGHT * cf
            + FREQUENCY_SLOT_WEIGHT * sf
            + FREQUENCY_NOISE * stream.draw(),
    );

    let grp = round1(reach_pct * avg_frequency);
    let effective_share =
        EFFECTIVE_BASE + EFFECTIVE_CHANNEL_WEIGHT * cf + EFFECTIVE_NOISE * stream.draw();
    let effective_reach_pct = round1((reach_pct * effective_share).min(100.0));

    let estimated_spend = round_f64_to_u64(
        (SPEND_PER_CHANNEL * usize_to_f64(channels) + SPEND_PER_SLOT * f64::from(total_slots))
            * boost,
    );

    let reach = absolute_reach(universe, reach_pct);
    let reach_thousands = (u64_to_f64(reach) / 1_000.0).max(1.0);
    let cpm = round2(u64_to_f64(estimated_spend) / reach_thousands);

    log::debug!(
        "kpis estimated: channels={channels} slots={total_slots} reach_pct={reach_pct} freq={avg_frequency} draws={}",
        stream.draws()
    );

    KpiResult {
        universe,
        reach,
        reach_pct,
        avg_frequency,
        grp,
        effective_reach_pct,
        estimated_spend,
        cpm,
    }
}
