//! Several policy variants run side by side
//!
//! Every variant gets its own world built from the same configuration and the
//! same seed, so all of them start from identical land and turtles. Worlds
//! advance in lock-step; after each tick the Gini coefficient and mean wealth
//! of every variant are recorded.

use serde::{Deserialize, Serialize};

use crate::core::config::{RunConfig, VariantConfig, WorldConfig};
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::policy::Policies;
use crate::simulation::recorder::{Row, RowSink};
use crate::simulation::world::World;

/// One named world and its recorded series
pub struct VariantRun {
    pub name: String,
    pub world: World,
    gini_series: Vec<f64>,
    mean_series: Vec<f64>,
}

impl VariantRun {
    /// Gini after each completed tick
    pub fn gini_series(&self) -> &[f64] {
        &self.gini_series
    }

    /// Mean wealth after each completed tick
    pub fn mean_series(&self) -> &[f64] {
        &self.mean_series
    }

    fn record(&mut self) {
        let snapshot = self.world.snapshot();
        if snapshot.population > 0 {
            self.gini_series.push(snapshot.gini);
            self.mean_series.push(snapshot.mean_wealth);
        }
    }
}

/// Final numbers for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub name: String,
    pub population: usize,
    pub final_gini: f64,
    pub average_gini: f64,
    pub final_mean_wealth: f64,
    pub average_mean_wealth: f64,
    /// Change of `average_gini` relative to the first variant, in percent
    pub gini_change_percent: Option<f64>,
    /// Change of `average_mean_wealth` relative to the first variant, in percent
    pub wealth_change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Ticks completed by every world
    pub ticks: Tick,
    pub variants: Vec<VariantSummary>,
}

impl ComparisonSummary {
    pub fn variant(&self, name: &str) -> Option<&VariantSummary> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct Comparison {
    variants: Vec<VariantRun>,
}

impl Comparison {
    pub fn new<I, S>(config: &WorldConfig, variants: I, seed: u64) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Policies)>,
        S: Into<String>,
    {
        let variants = variants
            .into_iter()
            .map(|(name, policies)| {
                let world = World::initialize(config.clone(), policies, seed)?;
                Ok(VariantRun {
                    name: name.into(),
                    world,
                    gini_series: Vec::new(),
                    mean_series: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            variants = variants.len(),
            seed,
            "Comparison initialized"
        );
        Ok(Self { variants })
    }

    /// Build the variants a run configuration asks for
    pub fn from_run_config(run: &RunConfig) -> Result<Self> {
        let variants = run
            .comparison_variants()
            .into_iter()
            .map(|VariantConfig { name, policies }| (name, policies));
        Self::new(&run.world, variants, run.seed)
    }

    pub fn variants(&self) -> &[VariantRun] {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&VariantRun> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Step every world `ticks` times in lock-step
    ///
    /// Every `report_every` ticks (0 disables) one labeled row per variant
    /// goes to `sink` and a summary line per variant is logged.
    pub fn run(
        &mut self,
        ticks: u64,
        report_every: u64,
        mut sink: Option<&mut dyn RowSink>,
    ) -> Result<ComparisonSummary> {
        for _ in 0..ticks {
            for variant in &mut self.variants {
                variant.world.step();
                variant.record();
            }

            let Some(tick) = self.variants.first().map(|v| v.world.tick()) else {
                continue;
            };
            if report_every == 0 || tick % report_every != 0 {
                continue;
            }

            for variant in &self.variants {
                let snapshot = variant.world.snapshot();
                tracing::info!(
                    variant = %variant.name,
                    tick,
                    population = snapshot.population,
                    mean_wealth = snapshot.mean_wealth,
                    gini = snapshot.gini,
                    "Comparison report"
                );
                if let Some(sink) = sink.as_deref_mut() {
                    sink.accept(&Row::Labeled {
                        label: &variant.name,
                        snapshot: &snapshot,
                    })?;
                }
            }
        }

        Ok(self.summary())
    }

    pub fn summary(&self) -> ComparisonSummary {
        let mut summaries: Vec<VariantSummary> = self
            .variants
            .iter()
            .map(|variant| VariantSummary {
                name: variant.name.clone(),
                population: variant.world.turtles().len(),
                final_gini: variant.gini_series.last().copied().unwrap_or(0.0),
                average_gini: average(&variant.gini_series),
                final_mean_wealth: variant.mean_series.last().copied().unwrap_or(0.0),
                average_mean_wealth: average(&variant.mean_series),
                gini_change_percent: None,
                wealth_change_percent: None,
            })
            .collect();

        if let Some((baseline_gini, baseline_wealth)) = summaries
            .first()
            .map(|s| (s.average_gini, s.average_mean_wealth))
        {
            for summary in summaries.iter_mut().skip(1) {
                summary.gini_change_percent = relative_change(summary.average_gini, baseline_gini);
                summary.wealth_change_percent =
                    relative_change(summary.average_mean_wealth, baseline_wealth);
            }
        }

        ComparisonSummary {
            ticks: self.variants.first().map_or(0, |v| v.world.tick()),
            variants: summaries,
        }
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn relative_change(value: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some((value - baseline) / baseline * 100.0)
    }
}
