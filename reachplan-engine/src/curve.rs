//! Saturating reach-by-frequency curve.
use serde::{Deserialize, Serialize};

use crate::constants::{CURVE_DECAY_RATE, CURVE_MAX_FREQUENCY};
use crate::kpi::{KpiResult, absolute_reach};
use crate::numbers::round1;

/// Reach achieved at a given exposure frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachCurvePoint {
    pub frequency: u8,
    pub reach_pct: f64,
    pub cumulative_reach: u64,
}

/// Build the curve for frequencies `1..=12`.
///
/// `reach_pct = max_reach * (1 - e^(-0.35 * frequency))`, which stays below the
/// plan's reach percentage and never decreases.
#[must_use]
pub fn reach_curve(kpis: &KpiResult) -> Vec<ReachCurvePoint> {
    (1..=CURVE_MAX_FREQUENCY)
        .map(|frequency| {
            let share = 1.0 - (-CURVE_DECAY_RATE * f64::from(frequency)).exp();
            let raw = kpis.reach_pct * share;
            let rounded = round1(raw);
            // Rounding must not lift a point onto the ceiling.
            let reach_pct = if rounded >= kpis.reach_pct { raw } else { rounded };
            ReachCurvePoint {
                frequency,
                reach_pct,
                cumulative_reach: absolute_reach(kpis.universe, raw),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpis(reach_pct: f64) -> KpiResult {
        KpiResult {
            universe: 50_000_000,
            reach: absolute_reach(50_000_000, reach_pct),
            reach_pct,
            avg_frequency: 4.2,
            grp: round1(reach_pct * 4.2),
            effective_reach_pct: round1(reach_pct * 0.6),
            estimated_spend: 1_000_000,
            cpm: 30.0,
        }
    }

    #[test]
    fn curve_has_twelve_points() {
        let curve = reach_curve(&kpis(60.0));
        assert_eq!(curve.len(), 12);
        assert_eq!(curve.first().map(|p| p.frequency), Some(1));
        assert_eq!(curve.last().map(|p| p.frequency), Some(12));
    }

    #[test]
    fn first_point_matches_formula() {
        let curve = reach_curve(&kpis(80.0));
        let expected = round1(80.0 * (1.0 - (-0.35_f64).exp()));
        assert!((curve[0].reach_pct - expected).abs() < 1e-9);
    }

    #[test]
    fn small_ceilings_stay_strictly_below() {
        for reach in [0.3, 1.0, 2.5, 3.3] {
            let plan = kpis(reach);
            for point in reach_curve(&plan) {
                assert!(point.reach_pct < plan.reach_pct, "{reach}: {point:?}");
            }
        }
    }

    #[test]
    fn cumulative_reach_grows_with_frequency() {
        let curve = reach_curve(&kpis(70.0));
        assert!(
            curve
                .windows(2)
                .all(|pair| pair[0].cumulative_reach <= pair[1].cumulative_reach)
        );
        assert!(curve[11].cumulative_reach < absolute_reach(50_000_000, 70.0));
    }
}
