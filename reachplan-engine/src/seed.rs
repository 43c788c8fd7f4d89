//! Deterministic seeded streams keyed by plan content.
//!
//! Every generator draws from its own [`SeededStream`], derived from a string
//! key through a rolling hash. The same key always reproduces the same draw
//! sequence, so a plan run is a pure function of its configuration.

use crate::constants::{HASH_MULTIPLIER, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use crate::numbers::u64_to_f64;
use crate::plan::MediaPlanConfig;

/// Fold a string key into a non-negative 32-bit seed.
///
/// Uses `hash = hash * 33 + code_unit` over the UTF-16 code units with
/// wrapping 32-bit arithmetic, then takes the absolute value.
#[must_use]
pub fn seed_from_key(key: &str) -> u32 {
    let hash = key.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Linear-congruential stream producing unit draws in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededStream {
    state: u64,
    draws: u64,
}

impl SeededStream {
    /// Start a stream from a numeric seed.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed) % LCG_MODULUS,
            draws: 0,
        }
    }

    /// Start a stream from a string key.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::new(seed_from_key(key))
    }

    /// Advance the generator and return the next value in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        self.advance();
        u64_to_f64(self.state) / u64_to_f64(LCG_MODULUS)
    }

    /// Draw `base + draw() * spread`.
    pub fn spread(&mut self, base: f64, spread: f64) -> f64 {
        base + self.draw() * spread
    }

    /// Number of draws performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    fn advance(&mut self) {
        self.draws = self.draws.saturating_add(1);
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    }
}

/// Generator domains with independently keyed streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamDomain {
    Kpi,
    Contribution,
    Overlap,
    Daypart,
    Ctv,
}

impl StreamDomain {
    /// Stream key for this domain derived from the plan.
    #[must_use]
    pub fn key(self, config: &MediaPlanConfig) -> String {
        let channels = config.channel_key();
        match self {
            Self::Kpi => format!(
                "{channels}{}{}{}",
                config.audience, config.market, config.include_ctv
            ),
            Self::Contribution => channels,
            Self::Overlap => format!("overlap|{channels}"),
            Self::Daypart => format!("daypart|{channels}"),
            Self::Ctv => format!("ctv|{}", config.active_platforms().join(",")),
        }
    }
}

/// Deterministic bundle of streams segregated by generator domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStreams {
    kpi: SeededStream,
    contribution: SeededStream,
    overlap: SeededStream,
    daypart: SeededStream,
    ctv: SeededStream,
}

impl PlanStreams {
    /// Construct the bundle from plan content.
    #[must_use]
    pub fn from_config(config: &MediaPlanConfig) -> Self {
        let stream = |domain: StreamDomain| SeededStream::from_key(&domain.key(config));
        Self {
            kpi: stream(StreamDomain::Kpi),
            contribution: stream(StreamDomain::Contribution),
            overlap: stream(StreamDomain::Overlap),
            daypart: stream(StreamDomain::Daypart),
            ctv: stream(StreamDomain::Ctv),
        }
    }

    pub const fn kpi(&mut self) -> &mut SeededStream {
        &mut self.kpi
    }

    pub const fn contribution(&mut self) -> &mut SeededStream {
        &mut self.contribution
    }

    pub const fn overlap(&mut self) -> &mut SeededStream {
        &mut self.overlap
    }

    pub const fn daypart(&mut self) -> &mut SeededStream {
        &mut self.daypart
    }

    pub const fn ctv(&mut self) -> &mut SeededStream {
        &mut self.ctv
    }

    /// Draw counts per domain, in declaration order.
    #[must_use]
    pub const fn draw_counts(&self) -> [(StreamDomain, u64); 5] {
        [
            (StreamDomain::Kpi, self.kpi.draws()),
            (StreamDomain::Contribution, self.contribution.draws()),
            (StreamDomain::Overlap, self.overlap.draws()),
            (StreamDomain::Daypart, self.daypart.draws()),
            (StreamDomain::Ctv, self.ctv.draws()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_hash_matches_hand_computation() {
        assert_eq!(seed_from_key(""), 0);
        assert_eq!(seed_from_key("a"), 97);
        assert_eq!(seed_from_key("ab"), 97 * 33 + 98);
    }

    #[test]
    fn rolling_hash_wraps_and_stays_non_negative() {
        let long = "BBC One,ITV,Channel 4,Channel 5,Sky One".repeat(8);
        let seed = seed_from_key(&long);
        assert_eq!(seed, seed_from_key(&long));
        assert!(seed <= i32::MAX.unsigned_abs() + 1);
    }

    #[test]
    fn stream_reproduces_known_sequence() {
        let mut stream = SeededStream::new(0);
        let first = stream.draw();
        assert!((first - 49_297.0 / 233_280.0).abs() < f64::EPSILON);
        let expected_state = (49_297_u64 * 9_301 + 49_297) % 233_280;
        let second = stream.draw();
        assert!((second - u64_to_f64(expected_state) / 233_280.0).abs() < f64::EPSILON);
        assert_eq!(stream.draws(), 2);
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut stream = SeededStream::from_key("Adults 16-64");
        for _ in 0..1_000 {
            let value = stream.draw();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn same_key_same_sequence() {
        let mut one = SeededStream::from_key("BBC One,ITV");
        let mut two = SeededStream::from_key("BBC One,ITV");
        let a: Vec<f64> = (0..16).map(|_| one.draw()).collect();
        let b: Vec<f64> = (0..16).map(|_| two.draw()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn domains_draw_independently() {
        let config = MediaPlanConfig::new(["BBC One", "ITV"], "Adults 16-64", "United Kingdom");
        let mut streams = PlanStreams::from_config(&config);
        let mut fresh = PlanStreams::from_config(&config);
        for _ in 0..5 {
            streams.overlap().draw();
        }
        assert_eq!(streams.kpi().draw(), fresh.kpi().draw());
        assert_eq!(
            streams.draw_counts(),
            [
                (StreamDomain::Kpi, 1),
                (StreamDomain::Contribution, 0),
                (StreamDomain::Overlap, 5),
                (StreamDomain::Daypart, 0),
                (StreamDomain::Ctv, 0),
            ]
        );
    }

    #[test]
    fn ctv_key_ignores_platforms_when_disabled() {
        let mut config = MediaPlanConfig::new(["ITV"], "Adults 16-64", "United Kingdom");
        config.streaming_platforms = vec!["Netflix".to_string()];
        assert_eq!(StreamDomain::Ctv.key(&config), "ctv|");
        let enabled = config.with_ctv(["Netflix"]);
        assert_eq!(StreamDomain::Ctv.key(&enabled), "ctv|Netflix");
    }
}
