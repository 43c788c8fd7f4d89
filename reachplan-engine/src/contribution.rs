//! Per-channel incremental, overlapping and exclusive reach.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONTRIBUTION_COST_BASE, CONTRIBUTION_COST_SPREAD, CONTRIBUTION_OVERLAP_BASE,
    CONTRIBUTION_OVERLAP_SPREAD, CONTRIBUTION_WEIGHT_NOISE,
};
use crate::kpi::KpiResult;
use crate::numbers::{round1, round2, usize_to_f64};
use crate::seed::SeededStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelContribution {
    pub channel: String,
    pub incremental_reach_pct: f64,
    pub overlap_pct: f64,
    /// `incremental_reach_pct * (1 - overlap_pct / 100)`.
    pub exclusive_reach_pct: f64,
    pub cost_per_reach_point: f64,
}

/// Positional weight: earlier channels contribute more, perturbed by noise.
fn positional_weight(index: usize, stream: &mut SeededStream) -> f64 {
    1.0 / usize_to_f64(index + 1) + stream.draw() * CONTRIBUTION_WEIGHT_NOISE
}

/// Estimate each channel's share of plan reach.
///
/// Each channel draws weight, overlap and cost in that order.
#[must_use]
pub fn channel_contributions(
    channels: &[String],
    kpis: &KpiResult,
    stream: &mut SeededStream,
) -> Vec<ChannelContribution> {
    let divisor = usize_to_f64(channels.len().max(1));
    channels
        .iter()
        .enumerate()
        .map(|(index, channel)| {
            let weight = positional_weight(index, stream);
            let incremental_reach_pct = round1(kpis.reach_pct * weight / divisor);
            let overlap_pct =
                round1(stream.spread(CONTRIBUTION_OVERLAP_BASE, CONTRIBUTION_OVERLAP_SPREAD));
            let exclusive_reach_pct = round1(incremental_reach_pct * (1.0 - overlap_pct / 100.0));
            let cost_per_reach_point =
                round2(stream.spread(CONTRIBUTION_COST_BASE, CONTRIBUTION_COST_SPREAD));
            ChannelContribution {
                channel: channel.clone(),
                incremental_reach_pct,
                overlap_pct,
                exclusive_reach_pct,
                cost_per_reach_point,
            }
        })
        .collect()
}
