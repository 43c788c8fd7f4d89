//! Plan engine facade: validation, stream wiring and a full run.
use serde::{Deserialize, Serialize};

use crate::catalog::TaxonomySource;
use crate::competitive::{CompetitorProfile, competitor_profiles};
use crate::contribution::{ChannelContribution, channel_contributions};
use crate::ctv::{CtvCombinedResult, combine_ctv};
use crate::curve::{ReachCurvePoint, reach_curve};
use crate::daypart::{DaypartEfficiencyEntry, daypart_efficiency, optimize_dayparts};
use crate::error::{PlanError, RunError};
use crate::kpi::{KpiResult, estimate_kpis};
use crate::overlap::{OverlapEntry, overlap_matrix};
use crate::plan::{Daypart, MediaPlanConfig, PlanGuards};
use crate::seed::PlanStreams;

/// Every output of one plan run; the unsaved draft a scenario is saved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRun {
    pub config: MediaPlanConfig,
    pub kpis: KpiResult,
    pub reach_curve: Vec<ReachCurvePoint>,
    pub contributions: Vec<ChannelContribution>,
    pub overlap: Vec<OverlapEntry>,
    pub dayparts: Vec<DaypartEfficiencyEntry>,
    pub recommended_dayparts: Vec<Daypart>,
    pub ctv: Option<CtvCombinedResult>,
    pub competitors: Vec<CompetitorProfile>,
}

/// Validate a plan against the default guards and run every generator.
///
/// # Errors
///
/// Returns the first violated plan rule; no generator runs for an invalid plan.
pub fn estimate_plan(
    config: &MediaPlanConfig,
    channel_universe: &[String],
    competitor_brands: &[String],
) -> Result<PlanRun, PlanError> {
    config.validate(&PlanGuards::default())?;
    Ok(run_generators(config, channel_universe, competitor_brands))
}

/// Each generator draws from its own stream in [`PlanStreams`], so the result
/// does not depend on the order the generators are evaluated in.
fn run_generators(
    config: &MediaPlanConfig,
    channel_universe: &[String],
    competitor_brands: &[String],
) -> PlanRun {
    let mut streams = PlanStreams::from_config(config);
    let kpis = estimate_kpis(config, streams.kpi());
    let reach_curve = reach_curve(&kpis);
    let contributions = channel_contributions(&config.channels, &kpis, streams.contribution());
    let overlap = overlap_matrix(&config.channels, streams.overlap());
    let dayparts = daypart_efficiency(&config.dayparts, streams.daypart());
    let recommended_dayparts = optimize_dayparts(&dayparts);
    let ctv = combine_ctv(kpis.reach_pct, config.active_platforms(), streams.ctv());
    let competitors = competitor_profiles(competitor_brands, channel_universe);

    for (domain, draws) in streams.draw_counts() {
        log::debug!("stream {domain:?} consumed {draws} draws");
    }

    PlanRun {
        config: config.clone(),
        kpis,
        reach_curve,
        contributions,
        overlap,
        dayparts,
        recommended_dayparts,
        ctv,
        competitors,
    }
}

/// Engine bound to a taxonomy source and caller minimums.
pub struct PlanEngine<T>
where
    T: TaxonomySource,
{
    taxonomy: T,
    guards: PlanGuards,
}

impl<T> PlanEngine<T>
where
    T: TaxonomySource,
{
    /// Create an engine with default guards.
    pub fn new(taxonomy: T) -> Self {
        Self::with_guards(taxonomy, PlanGuards::default())
    }

    pub const fn with_guards(taxonomy: T, guards: PlanGuards) -> Self {
        Self { taxonomy, guards }
    }

    #[must_use]
    pub const fn guards(&self) -> &PlanGuards {
        &self.guards
    }

    #[must_use]
    pub const fn taxonomy(&self) -> &T {
        &self.taxonomy
    }

    /// Validate a plan without running it.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self, config: &MediaPlanConfig) -> Result<(), PlanError> {
        config.validate(&self.guards).inspect_err(|err| {
            log::warn!("plan rejected: {err}");
        })
    }

    /// Validate and run a plan against the market's tracked competitors.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is invalid or the taxonomy lookup fails.
    pub fn run(&self, config: &MediaPlanConfig) -> Result<PlanRun, RunError<T::Error>> {
        self.validate(config)?;
        let brands = self
            .taxonomy
            .competitors(&config.market)
            .map_err(RunError::Taxonomy)?;
        self.run_validated(config, &brands)
    }

    /// Validate and run a plan against an explicit competitor list.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is invalid or the taxonomy lookup fails.
    pub fn run_with_competitors(
        &self,
        config: &MediaPlanConfig,
        competitor_brands: &[String],
    ) -> Result<PlanRun, RunError<T::Error>> {
        self.validate(config)?;
        self.run_validated(config, competitor_brands)
    }

    fn run_validated(
        &self,
        config: &MediaPlanConfig,
        competitor_brands: &[String],
    ) -> Result<PlanRun, RunError<T::Error>> {
        let universe = self.taxonomy.channels().map_err(RunError::Taxonomy)?;
        let run = run_generators(config, &universe, competitor_brands);
        log::info!(
            "plan run: {} channels, reach {}%, {} GRPs",
            config.channels.len(),
            run.kpis.reach_pct,
            run.kpis.grp
        );
        Ok(run)
    }
}
