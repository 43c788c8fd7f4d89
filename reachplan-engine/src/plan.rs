//! Media plan configuration: channels, audience, market, daypart schedule and CTV add-on.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::PlanError;

/// Broadcast dayparts in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Daypart {
    Breakfast,
    Daytime,
    EarlyEvening,
    Peak,
    LatePeak,
    LateNight,
    Overnight,
}

impl Daypart {
    pub const COUNT: usize = 7;

    /// Every daypart in schedule order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Breakfast,
        Self::Daytime,
        Self::EarlyEvening,
        Self::Peak,
        Self::LatePeak,
        Self::LateNight,
        Self::Overnight,
    ];

    /// Display name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Daytime => "Daytime",
            Self::EarlyEvening => "Early Evening",
            Self::Peak => "Peak",
            Self::LatePeak => "Late Peak",
            Self::LateNight => "Late Night",
            Self::Overnight => "Overnight",
        }
    }

    /// Broadcast time window, local time.
    #[must_use]
    pub const fn time_window(self) -> &'static str {
        match self {
            Self::Breakfast => "06:00-09:30",
            Self::Daytime => "09:30-17:00",
            Self::EarlyEvening => "17:00-19:00",
            Self::Peak => "19:00-21:00",
            Self::LatePeak => "21:00-23:00",
            Self::LateNight => "23:00-01:00",
            Self::Overnight => "01:00-06:00",
        }
    }

    /// Whether the daypart is priced and rated as peak inventory.
    #[must_use]
    pub const fn is_peak(self) -> bool {
        matches!(self, Self::Peak | Self::LatePeak)
    }

    /// Position in [`Daypart::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Daypart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Spot counts booked into one daypart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAllocation {
    #[serde(default)]
    pub weekday_slots: u32,
    #[serde(default)]
    pub weekend_slots: u32,
}

impl SlotAllocation {
    #[must_use]
    pub const fn new(weekday_slots: u32, weekend_slots: u32) -> Self {
        Self {
            weekday_slots,
            weekend_slots,
        }
    }

    #[must_use]
    pub const fn total(self) -> u32 {
        self.weekday_slots.saturating_add(self.weekend_slots)
    }
}

/// Slot allocations for the seven fixed dayparts, indexed by [`Daypart`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaypartSchedule([SlotAllocation; Daypart::COUNT]);

impl DaypartSchedule {
    /// Same allocation in every daypart.
    #[must_use]
    pub const fn uniform(weekday_slots: u32, weekend_slots: u32) -> Self {
        Self([SlotAllocation::new(weekday_slots, weekend_slots); Daypart::COUNT])
    }

    #[must_use]
    pub const fn get(&self, daypart: Daypart) -> SlotAllocation {
        self.0[daypart.index()]
    }

    pub fn set(&mut self, daypart: Daypart, allocation: SlotAllocation) {
        self.0[daypart.index()] = allocation;
    }

    /// Total slots across every daypart and day type.
    #[must_use]
    pub fn total_slots(&self) -> u32 {
        self.0
            .iter()
            .fold(0_u32, |acc, slots| acc.saturating_add(slots.total()))
    }

    /// Iterate dayparts with their allocation in schedule order.
    pub fn iter(&self) -> impl Iterator<Item = (Daypart, SlotAllocation)> + '_ {
        Daypart::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// Inputs to every plan computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPlanConfig {
    /// Ordered channel set; earlier channels carry more contribution weight.
    pub channels: Vec<String>,
    pub audience: String,
    pub market: String,
    #[serde(default)]
    pub dayparts: DaypartSchedule,
    #[serde(default)]
    pub include_ctv: bool,
    /// Only meaningful when `include_ctv` is set.
    #[serde(default)]
    pub streaming_platforms: Vec<String>,
    /// Time periods selected by the caller; checked by [`PlanGuards`] only.
    #[serde(default)]
    pub waves: Vec<String>,
}

impl MediaPlanConfig {
    /// Create a linear-only plan with an empty daypart schedule.
    #[must_use]
    pub fn new<I, S>(channels: I, audience: &str, market: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channels: channels.into_iter().map(Into::into).collect(),
            audience: audience.to_string(),
            market: market.to_string(),
            dayparts: DaypartSchedule::default(),
            include_ctv: false,
            streaming_platforms: Vec::new(),
            waves: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dayparts(mut self, dayparts: DaypartSchedule) -> Self {
        self.dayparts = dayparts;
        self
    }

    /// Enable the CTV add-on with the given streaming platforms.
    #[must_use]
    pub fn with_ctv<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_ctv = true;
        self.streaming_platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_waves<I, S>(mut self, waves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.waves = waves.into_iter().map(Into::into).collect();
        self
    }

    /// Channels joined in plan order.
    #[must_use]
    pub fn channel_key(&self) -> String {
        self.channels.join(",")
    }

    /// Streaming platforms that take part in the run; empty unless CTV is enabled.
    #[must_use]
    pub fn active_platforms(&self) -> &[String] {
        if self.include_ctv {
            &self.streaming_platforms
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn total_slots(&self) -> u32 {
        self.dayparts.total_slots()
    }

    /// Check the plan against structural rules and caller minimums.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self, guards: &PlanGuards) -> Result<(), PlanError> {
        guards.validate()?;
        if self.channels.is_empty() {
            return Err(PlanError::EmptyChannels);
        }
        if self.channels.len() < guards.min_channels {
            return Err(PlanError::TooFewChannels {
                min: guards.min_channels,
                got: self.channels.len(),
            });
        }
        if let Some(channel) = first_duplicate(&self.channels) {
            return Err(PlanError::DuplicateChannel {
                channel: channel.to_string(),
            });
        }
        if self.audience.trim().is_empty() {
            return Err(PlanError::BlankLabel { field: "audience" });
        }
        if self.market.trim().is_empty() {
            return Err(PlanError::BlankLabel { field: "market" });
        }
        if let Some(platform) = first_duplicate(self.active_platforms()) {
            return Err(PlanError::DuplicatePlatform {
                platform: platform.to_string(),
            });
        }
        if self.waves.len() < guards.min_waves {
            return Err(PlanError::TooFewWaves {
                min: guards.min_waves,
                got: self.waves.len(),
            });
        }
        Ok(())
    }
}

fn first_duplicate(values: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .find(|value| !seen.insert(value.as_str()))
        .map(String::as_str)
}

/// Caller-imposed minimums checked before any generator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanGuards {
    #[serde(default = "PlanGuards::default_min_channels")]
    pub min_channels: usize,
    #[serde(default)]
    pub min_waves: usize,
}

impl PlanGuards {
    const fn default_min_channels() -> usize {
        1
    }

    /// Minimums enforced by the planning screen: one channel and four waves.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            min_channels: 1,
            min_waves: 4,
        }
    }

    /// # Errors
    ///
    /// Returns [`PlanError::InvalidGuards`] when the channel minimum is zero.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.min_channels == 0 {
            return Err(PlanError::InvalidGuards {
                field: "min_channels",
                min: 1,
                value: self.min_channels,
            });
        }
        Ok(())
    }
}

impl Default for PlanGuards {
    fn default() -> Self {
        Self {
            min_channels: Self::default_min_channels(),
            min_waves: 0,
        }
    }
}
