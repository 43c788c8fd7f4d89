//! Saved plan scenarios and side-by-side comparison.
//!
//! A scenario freezes a plan configuration together with the KPIs computed for
//! it. Scenarios are never edited: they are saved from a finished run, read,
//! compared and deleted. Comparison is a projection over stored fields and
//! never re-runs the estimator.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_COMPARE_SCENARIOS;
use crate::engine::PlanRun;
use crate::error::ScenarioError;
use crate::kpi::KpiResult;
use crate::plan::MediaPlanConfig;

/// Store-assigned scenario identifier; never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub u64);

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable snapshot of a plan and its KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub config: MediaPlanConfig,
    pub kpis: KpiResult,
    pub created_at: DateTime<Utc>,
}

/// Metrics projected into a comparison table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    Channels,
    Universe,
    Reach,
    ReachPct,
    AvgFrequency,
    Grp,
    EffectiveReachPct,
    EstimatedSpend,
    Cpm,
    IncludeCtv,
}

impl ComparisonMetric {
    pub const ALL: [Self; 10] = [
        Self::Channels,
        Self::Universe,
        Self::Reach,
        Self::ReachPct,
        Self::AvgFrequency,
        Self::Grp,
        Self::EffectiveReachPct,
        Self::EstimatedSpend,
        Self::Cpm,
        Self::IncludeCtv,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Channels => "Channels",
            Self::Universe => "Universe",
            Self::Reach => "Reach",
            Self::ReachPct => "Reach %",
            Self::AvgFrequency => "Avg Frequency",
            Self::Grp => "GRPs",
            Self::EffectiveReachPct => "Effective Reach %",
            Self::EstimatedSpend => "Estimated Spend",
            Self::Cpm => "CPM",
            Self::IncludeCtv => "CTV Included",
        }
    }

    /// Read the stored value for this metric.
    #[must_use]
    pub fn value(self, scenario: &Scenario) -> MetricValue {
        let kpis = &scenario.kpis;
        match self {
            Self::Channels => MetricValue::Text(scenario.config.channels.join(", ")),
            Self::Universe => MetricValue::Count(kpis.universe),
            Self::Reach => MetricValue::Count(kpis.reach),
            Self::ReachPct => MetricValue::Number(kpis.reach_pct),
            Self::AvgFrequency => MetricValue::Number(kpis.avg_frequency),
            Self::Grp => MetricValue::Number(kpis.grp),
            Self::EffectiveReachPct => MetricValue::Number(kpis.effective_reach_pct),
            Self::EstimatedSpend => MetricValue::Count(kpis.estimated_spend),
            Self::Cpm => MetricValue::Number(kpis.cpm),
            Self::IncludeCtv => MetricValue::Flag(scenario.config.include_ctv),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Count(u64),
    Number(f64),
    Flag(bool),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Count(count) => write!(f, "{count}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Flag(true) => f.write_str("yes"),
            Self::Flag(false) => f.write_str("no"),
        }
    }
}

/// One metric across every compared scenario, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: ComparisonMetric,
    pub label: String,
    pub values: Vec<MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario_ids: Vec<ScenarioId>,
    pub scenario_names: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ScenarioComparison {
    #[must_use]
    pub fn row(&self, metric: ComparisonMetric) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.metric == metric)
    }
}

/// Ordered collection of saved scenarios owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredScenarios")]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    next_id: u64,
}

/// Persisted store layout; loading never lets the id counter fall behind a stored id.
#[derive(Deserialize)]
struct StoredScenarios {
    #[serde(default)]
    scenarios: Vec<Scenario>,
    #[serde(default)]
    next_id: u64,
}

impl From<StoredScenarios> for ScenarioStore {
    fn from(stored: StoredScenarios) -> Self {
        let highest = stored
            .scenarios
            .iter()
            .map(|scenario| scenario.id.0)
            .max()
            .unwrap_or(0);
        Self {
            next_id: stored.next_id.max(highest),
            scenarios: stored.scenarios,
        }
    }
}

impl ScenarioStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a snapshot of `config` and `kpis`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::BlankName`] when the name is empty.
    pub fn save(
        &mut self,
        name: &str,
        config: MediaPlanConfig,
        kpis: KpiResult,
        created_at: DateTime<Utc>,
    ) -> Result<ScenarioId, ScenarioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioError::BlankName);
        }
        self.next_id = self.next_id.saturating_add(1);
        let id = ScenarioId(self.next_id);
        self.scenarios.push(Scenario {
            id,
            name: name.to_string(),
            config,
            kpis,
            created_at,
        });
        log::info!("scenario {id} saved as {name:?}");
        Ok(id)
    }

    /// Save the configuration and KPIs of a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::BlankName`] when the name is empty.
    pub fn save_run(
        &mut self,
        name: &str,
        run: &PlanRun,
        created_at: DateTime<Utc>,
    ) -> Result<ScenarioId, ScenarioError> {
        self.save(name, run.config.clone(), run.kpis.clone(), created_at)
    }

    #[must_use]
    pub fn get(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    /// Saved scenarios in save order.
    #[must_use]
    pub fn list(&self) -> &[Scenario] {
        &self.scenarios
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Remove a scenario, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::NotFound`] for unknown ids.
    pub fn delete(&mut self, id: ScenarioId) -> Result<Scenario, ScenarioError> {
        let position = self
            .scenarios
            .iter()
            .position(|scenario| scenario.id == id)
            .ok_or(ScenarioError::NotFound { id })?;
        let removed = self.scenarios.remove(position);
        log::info!("scenario {id} deleted");
        Ok(removed)
    }

    /// Build a metric-by-scenario table from stored snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::TooFewToCompare`] for fewer than two ids and
    /// [`ScenarioError::NotFound`] for the first unknown id.
    pub fn compare(&self, ids: &[ScenarioId]) -> Result<ScenarioComparison, ScenarioError> {
        if ids.len() < MIN_COMPARE_SCENARIOS {
            return Err(ScenarioError::TooFewToCompare {
                min: MIN_COMPARE_SCENARIOS,
                got: ids.len(),
            });
        }
        let selected = ids
            .iter()
            .map(|&id| self.get(id).ok_or(ScenarioError::NotFound { id }))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = ComparisonMetric::ALL
            .iter()
            .map(|&metric| ComparisonRow {
                metric,
                label: metric.label().to_string(),
                values: selected.iter().map(|scenario| metric.value(scenario)).collect(),
            })
            .collect();

        Ok(ScenarioComparison {
            scenario_ids: ids.to_vec(),
            scenario_names: selected.iter().map(|s| s.name.clone()).collect(),
            rows,
        })
    }
}
