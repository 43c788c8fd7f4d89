//! Competitor spend, share of voice and daypart mix.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    ALLOCATION_DAYPART_CAP, ALLOCATION_TOTAL_PCT, COMPETITOR_CHANNEL_SPREAD,
    COMPETITOR_GRP_BASE, COMPETITOR_GRP_SPREAD, COMPETITOR_MIN_CHANNELS, COMPETITOR_SOV_BASE,
    COMPETITOR_SOV_SPREAD, COMPETITOR_SPEND_BASE, COMPETITOR_SPEND_SPREAD,
};
use crate::numbers::{round_f64_to_u64, round1, scaled_index};
use crate::plan::Daypart;
use crate::seed::SeededStream;

/// Channels a competitor is active on; stored inline for typical sizes.
pub type CompetitorChannels = SmallVec<[String; 6]>;

/// Percentage of a competitor's weight per daypart, summing to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaypartAllocation([u32; Daypart::COUNT]);

impl DaypartAllocation {
    /// Walk the dayparts in order, drawing a capped share for each but the
    /// last, which absorbs the remainder.
    fn draw(stream: &mut SeededStream) -> Self {
        let mut shares = [0_u32; Daypart::COUNT];
        let mut remaining = ALLOCATION_TOTAL_PCT;
        for share in shares.iter_mut().take(Daypart::COUNT - 1) {
            let cap = remaining.min(ALLOCATION_DAYPART_CAP);
            let options = usize::try_from(cap).unwrap_or(0) + 1;
            let picked = u32::try_from(scaled_index(stream.draw(), options)).unwrap_or(0);
            *share = picked.min(cap);
            remaining -= *share;
        }
        shares[Daypart::COUNT - 1] = remaining;
        Self(shares)
    }

    #[must_use]
    pub const fn get(&self, daypart: Daypart) -> u32 {
        self.0[daypart.index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Daypart, u32)> + '_ {
        Daypart::ALL.into_iter().zip(self.0.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub brand: String,
    pub channels: CompetitorChannels,
    pub spend: u64,
    pub share_of_voice_pct: f64,
    pub grp: f64,
    pub daypart_allocation: DaypartAllocation,
}

/// Stream key for a competitor brand.
#[must_use]
pub fn competitor_key(brand: &str) -> String {
    format!("competitor|{brand}")
}

/// Build one competitor profile from an injected stream.
///
/// Draw order: channel count, channel picks, spend, share of voice, GRPs,
/// then six daypart shares.
#[must_use]
pub fn competitor_profile(
    brand: &str,
    channel_universe: &[String],
    stream: &mut SeededStream,
) -> CompetitorProfile {
    let num_channels =
        COMPETITOR_MIN_CHANNELS + scaled_index(stream.draw(), COMPETITOR_CHANNEL_SPREAD);
    let mut channels = CompetitorChannels::new();
    for _ in 0..num_channels {
        let pick = scaled_index(stream.draw(), channel_universe.len());
        if let Some(channel) = channel_universe.get(pick)
            && !channels.contains(channel)
        {
            channels.push(channel.clone());
        }
    }
    let spend = round_f64_to_u64(stream.spread(COMPETITOR_SPEND_BASE, COMPETITOR_SPEND_SPREAD));
    let share_of_voice_pct = round1(stream.spread(COMPETITOR_SOV_BASE, COMPETITOR_SOV_SPREAD));
    let grp = round1(stream.spread(COMPETITOR_GRP_BASE, COMPETITOR_GRP_SPREAD));
    let daypart_allocation = DaypartAllocation::draw(stream);

    CompetitorProfile {
        brand: brand.to_string(),
        channels,
        spend,
        share_of_voice_pct,
        grp,
        daypart_allocation,
    }
}

/// Profile every brand, each from its own brand-keyed stream.
#[must_use]
pub fn competitor_profiles(
    brands: &[String],
    channel_universe: &[String],
) -> Vec<CompetitorProfile> {
    brands
        .iter()
        .map(|brand| {
            let mut stream = SeededStream::from_key(&competitor_key(brand));
            let profile = competitor_profile(brand, channel_universe, &mut stream);
            log::debug!("competitor {brand} profiled with {} draws", stream.draws());
            profile
        })
        .collect()
}
