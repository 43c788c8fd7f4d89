//! Daypart reach, cost and attention with an efficiency rating.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DAYPART_GRP_MULT_BASE, DAYPART_GRP_MULT_SPREAD, DAYPART_SLOT_CAP, DAYPART_SLOT_DIVISOR,
    EFFICIENCY_HIGH_THRESHOLD, EFFICIENCY_MEDIUM_THRESHOLD, OFFPEAK_ATTENTION_BASE,
    OFFPEAK_ATTENTION_SPREAD, OFFPEAK_CPM_BASE, OFFPEAK_CPM_SPREAD, OFFPEAK_REACH_BASE,
    OFFPEAK_REACH_SPREAD, PEAK_ATTENTION_BASE, PEAK_ATTENTION_SPREAD, PEAK_CPM_BASE,
    PEAK_CPM_SPREAD, PEAK_REACH_BASE, PEAK_REACH_SPREAD,
};
use crate::numbers::{round1, round2};
use crate::plan::{Daypart, DaypartSchedule};
use crate::seed::SeededStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyRating {
    High,
    Medium,
    Low,
}

impl EfficiencyRating {
    /// Rate reach delivered per unit of CPM.
    #[must_use]
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency > EFFICIENCY_HIGH_THRESHOLD {
            Self::High
        } else if efficiency > EFFICIENCY_MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaypartEfficiencyEntry {
    pub daypart: Daypart,
    pub daypart_name: String,
    pub time_window: String,
    pub reach_pct: f64,
    pub grp: f64,
    pub cpm: f64,
    pub attention_score: f64,
    pub rating: EfficiencyRating,
}

impl DaypartEfficiencyEntry {
    /// `reach_pct / max(cpm, 1)`.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.reach_pct / self.cpm.max(1.0)
    }
}

/// Rate every daypart of the schedule.
///
/// Each daypart draws base reach, GRP multiplier, CPM and attention in that
/// order, including dayparts with no booked slots.
#[must_use]
pub fn daypart_efficiency(
    schedule: &DaypartSchedule,
    stream: &mut SeededStream,
) -> Vec<DaypartEfficiencyEntry> {
    schedule
        .iter()
        .map(|(daypart, slots)| {
            let peak = daypart.is_peak();
            let base_reach = if peak {
                stream.spread(PEAK_REACH_BASE, PEAK_REACH_SPREAD)
            } else {
                stream.spread(OFFPEAK_REACH_BASE, OFFPEAK_REACH_SPREAD)
            };
            let booked = f64::from(slots.total().min(DAYPART_SLOT_CAP));
            let reach_pct = round1(base_reach * booked / DAYPART_SLOT_DIVISOR);
            let grp_multiplier = stream.spread(DAYPART_GRP_MULT_BASE, DAYPART_GRP_MULT_SPREAD);
            let grp = round1(reach_pct * grp_multiplier);
            let cpm = round2(if peak {
                stream.spread(PEAK_CPM_BASE, PEAK_CPM_SPREAD)
            } else {
                stream.spread(OFFPEAK_CPM_BASE, OFFPEAK_CPM_SPREAD)
            });
            let attention_score = round1(if peak {
                stream.spread(PEAK_ATTENTION_BASE, PEAK_ATTENTION_SPREAD)
            } else {
                stream.spread(OFFPEAK_ATTENTION_BASE, OFFPEAK_ATTENTION_SPREAD)
            });
            let rating = EfficiencyRating::from_efficiency(reach_pct / cpm.max(1.0));
            DaypartEfficiencyEntry {
                daypart,
                daypart_name: daypart.name().to_string(),
                time_window: daypart.time_window().to_string(),
                reach_pct,
                grp,
                cpm,
                attention_score,
                rating,
            }
        })
        .collect()
}

/// Dayparts recommended by the optimiser: every entry rated high.
#[must_use]
pub fn optimize_dayparts(entries: &[DaypartEfficiencyEntry]) -> Vec<Daypart> {
    entries
        .iter()
        .filter(|entry| entry.rating == EfficiencyRating::High)
        .map(|entry| entry.daypart)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::SlotAllocation;

    #[test]
    fn rating_thresholds_are_exclusive() {
        assert_eq!(EfficiencyRating::from_efficiency(1.21), EfficiencyRating::High);
        assert_eq!(EfficiencyRating::from_efficiency(1.2), EfficiencyRating::Medium);
        assert_eq!(EfficiencyRating::from_efficiency(0.61), EfficiencyRating::Medium);
        assert_eq!(EfficiencyRating::from_efficiency(0.6), EfficiencyRating::Low);
        assert_eq!(EfficiencyRating::from_efficiency(0.0), EfficiencyRating::Low);
    }

    #[test]
    fn every_daypart_rated_in_order() {
        let schedule = DaypartSchedule::uniform(2, 1);
        let mut stream = SeededStream::from_key("order");
        let entries = daypart_efficiency(&schedule, &mut stream);
        assert_eq!(entries.len(), 7);
        assert_eq!(stream.draws(), 28);
        for (entry, daypart) in entries.iter().zip(Daypart::ALL) {
            assert_eq!(entry.daypart, daypart);
            assert_eq!(entry.time_window, daypart.time_window());
            assert_eq!(
                entry.rating,
                EfficiencyRating::from_efficiency(entry.efficiency())
            );
        }
    }

    #[test]
    fn peak_inventory_costs_more() {
        let entries = daypart_efficiency(
            &DaypartSchedule::uniform(1, 1),
            &mut SeededStream::from_key("peak"),
        );
        for entry in &entries {
            if entry.daypart.is_peak() {
                assert!((18.0..=30.0).contains(&entry.cpm));
                assert!((65.0..=90.0).contains(&entry.attention_score));
            } else {
                assert!((6.0..=14.0).contains(&entry.cpm));
                assert!((30.0..=65.0).contains(&entry.attention_score));
            }
        }
    }

    #[test]
    fn empty_daypart_has_no_reach_and_rates_low() {
        let mut schedule = DaypartSchedule::uniform(1, 1);
        schedule.set(Daypart::Overnight, SlotAllocation::default());
        let entries = daypart_efficiency(&schedule, &mut SeededStream::from_key("empty"));
        let overnight = &entries[Daypart::Overnight.index()];
        assert!(overnight.reach_pct.abs() < f64::EPSILON);
        assert!(overnight.grp.abs() < f64::EPSILON);
        assert_eq!(overnight.rating, EfficiencyRating::Low);
    }

    #[test]
    fn optimiser_keeps_only_high_ratings() {
        let entries = daypart_efficiency(
            &DaypartSchedule::uniform(3, 3),
            &mut SeededStream::from_key("optimise"),
        );
        let picks = optimize_dayparts(&entries);
        let expected: Vec<Daypart> = entries
            .iter()
            .filter(|e| e.efficiency() > 1.2)
            .map(|e| e.daypart)
            .collect();
        assert_eq!(picks, expected);
    }
}
