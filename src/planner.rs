//! Public API for the site planner.
//!
//! The `PlannerBuilder` provides a fluent, append-only API for configuring the
//! planning pass. Layers run in order against the site's stored plan; a layer
//! that halts (no anchor) stops every later layer that needs the anchor.

use crate::config::PlannerConfig;
use crate::error::PlanningWarning;
use crate::layer::{LayerOutcome, PassContext, PlanningLayer};
use crate::layers::default_layers;
use crate::pathing::AStarPathFinder;
use crate::placer::{PlacementReport, StampPlacer};
use crate::site_data::{InventoryQuery, SiteDataSource};
use crate::store::{PlanStore, SiteId};
use crate::throughput::{BodyPlan, PopulationTargets, ThroughputProfile};
use log::*;

/// Outcome of one planning pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassSummary {
    /// New entries appended to the site's plan.
    pub structures_added: usize,
    pub report: PlacementReport,
    pub warnings: Vec<PlanningWarning>,
}

/// Append-only builder for configuring the planner.
pub struct PlannerBuilder {
    config: PlannerConfig,
    layers: Vec<Box<dyn PlanningLayer>>,
}

impl PlannerBuilder {
    /// Start with default configuration and an empty layer stack.
    pub fn new() -> Self {
        PlannerBuilder {
            config: PlannerConfig::default(),
            layers: Vec::new(),
        }
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a layer to the end of the stack.
    pub fn add_layer(mut self, layer: Box<dyn PlanningLayer>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Append the standard layers, sized from the current configuration.
    pub fn with_default_layers(mut self) -> Self {
        let layers = default_layers(&self.config);
        self.layers.extend(layers);
        self
    }

    pub fn build(self) -> SitePlanner {
        SitePlanner {
            config: self.config,
            layers: self.layers,
        }
    }
}

impl Default for PlannerBuilder {
    /// Returns a builder pre-loaded with the default layer stack.
    fn default() -> Self {
        PlannerBuilder::new().with_default_layers()
    }
}

pub struct SitePlanner {
    config: PlannerConfig,
    layers: Vec<Box<dyn PlanningLayer>>,
}

impl SitePlanner {
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run every layer against the stored plan for `site`. Safe to repeat;
    /// a pass over an already planned site adds nothing.
    pub fn run_planning_pass(
        &self,
        site: &SiteId,
        data: &dyn SiteDataSource,
        inventory: &dyn InventoryQuery,
        store: &mut dyn PlanStore,
    ) -> PassSummary {
        let plan = store.get_or_create(site);
        let before = plan.len();

        let pathfinder = AStarPathFinder::for_config(&self.config.roads);
        let reserved = data.reserved_tiles();
        let inset = self.config.placement.build_inset;
        let placer =
            StampPlacer::new(data.get_terrain(), inventory, inset).with_reserved(&reserved);
        let mut context = PassContext::new(data, &self.config, placer, &pathfinder, plan);

        let mut halted = false;
        for layer in &self.layers {
            if halted && layer.requires_anchor(&self.config) {
                debug!("Skipping layer {}: no anchor", layer.name());
                continue;
            }

            if layer.apply(&mut context) == LayerOutcome::Halt {
                halted = true;
            }
        }

        let summary = PassSummary {
            structures_added: context.plan.len() - before,
            report: context.report,
            warnings: context.warnings,
        };

        info!(
            "Planning pass for {}: {} structures added, {} warnings",
            site,
            summary.structures_added,
            summary.warnings.len()
        );

        summary
    }

    /// Spawn-to-node path costs for the site; cache it and query targets and
    /// bodies from it while the terrain is unchanged.
    pub fn throughput_profile(
        &self,
        data: &dyn SiteDataSource,
    ) -> (ThroughputProfile, Vec<PlanningWarning>) {
        let pathfinder = AStarPathFinder::for_config(&self.config.roads);
        ThroughputProfile::compute(data, &pathfinder, &self.config.roads, &self.config.throughput)
    }

    pub fn population_targets(
        &self,
        data: &dyn SiteDataSource,
        tier: u8,
        energy: u32,
    ) -> PopulationTargets {
        self.throughput_profile(data).0.population_targets(tier, energy)
    }

    pub fn body_composition(&self, data: &dyn SiteDataSource, tier: u8, energy: u32) -> BodyPlan {
        self.throughput_profile(data).0.body_composition(tier, energy)
    }
}
