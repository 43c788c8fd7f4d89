//! Linear TV plus streaming-platform reach, deduplicated.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CTV_ONLY_BASE, CTV_ONLY_PER_PLATFORM, DEDUP_SAVINGS_SHARE, LINEAR_ONLY_SHARE, MAX_REACH_PCT,
    PLATFORM_INCREMENTAL_BASE, PLATFORM_INCREMENTAL_SPREAD, PLATFORM_REACH_BASE,
    PLATFORM_REACH_SPREAD,
};
use crate::numbers::{round1, usize_to_f64};
use crate::seed::SeededStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformReach {
    pub platform: String,
    pub reach_pct: f64,
    pub incremental_reach_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtvCombinedResult {
    pub linear_only_pct: f64,
    pub ctv_only_pct: f64,
    pub overlap_pct: f64,
    /// Never above 95: reach is not reported as universal.
    pub combined_reach_pct: f64,
    pub dedup_savings_pct: f64,
    pub platform_breakdown: Vec<PlatformReach>,
}

/// Merge linear reach with the streaming add-on.
///
/// Returns `None` when no platforms are selected. Platform breakdowns draw
/// reach then incremental reach per platform from `stream`.
#[must_use]
pub fn combine_ctv(
    linear_reach_pct: f64,
    platforms: &[String],
    stream: &mut SeededStream,
) -> Option<CtvCombinedResult> {
    if platforms.is_empty() {
        return None;
    }
    let ctv_only_pct =
        round1(CTV_ONLY_BASE + CTV_ONLY_PER_PLATFORM * usize_to_f64(platforms.len()));
    let linear_only_pct = round1(linear_reach_pct * LINEAR_ONLY_SHARE);
    let overlap_pct = round1(linear_reach_pct - linear_only_pct);
    let combined_reach_pct =
        round1((linear_only_pct + ctv_only_pct + overlap_pct).min(MAX_REACH_PCT));
    let dedup_savings_pct = round1(overlap_pct * DEDUP_SAVINGS_SHARE);

    let platform_breakdown = platforms
        .iter()
        .map(|platform| PlatformReach {
            platform: platform.clone(),
            reach_pct: round1(stream.spread(PLATFORM_REACH_BASE, PLATFORM_REACH_SPREAD)),
            incremental_reach_pct: round1(
                stream.spread(PLATFORM_INCREMENTAL_BASE, PLATFORM_INCREMENTAL_SPREAD),
            ),
        })
        .collect();

    Some(CtvCombinedResult {
        linear_only_pct,
        ctv_only_pct,
        overlap_pct,
        combined_reach_pct,
        dedup_savings_pct,
        platform_breakdown,
    })
}
