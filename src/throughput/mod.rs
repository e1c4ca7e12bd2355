//! Hauling and population math.
//!
//! Everything here is a pure function of path costs, tier and energy. The
//! only grid input is the spawn-to-node path cost, measured on terrain alone
//! so the figures do not drift as the plan grows.

pub mod body;

pub use body::{Body, BodyPlan, PartKind};

use crate::config::{RoadConfig, ThroughputConfig};
use crate::constants::*;
use crate::error::PlanningWarning;
use crate::pathing::*;
use crate::site_data::SiteDataSource;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkerRole {
    Harvester,
    Hauler,
    Upgrader,
    Builder,
}

impl WorkerRole {
    pub const ALL: [WorkerRole; 4] = [
        WorkerRole::Harvester,
        WorkerRole::Hauler,
        WorkerRole::Upgrader,
        WorkerRole::Builder,
    ];
}

/// Desired number of workers per role.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationTargets {
    pub harvesters: u32,
    pub haulers: u32,
    pub upgraders: u32,
    pub builders: u32,
}

impl PopulationTargets {
    pub fn get(&self, role: WorkerRole) -> u32 {
        match role {
            WorkerRole::Harvester => self.harvesters,
            WorkerRole::Hauler => self.haulers,
            WorkerRole::Upgrader => self.upgraders,
            WorkerRole::Builder => self.builders,
        }
    }

    pub fn total(&self) -> u32 {
        self.harvesters + self.haulers + self.upgraders + self.builders
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkerRole, u32)> + '_ {
        WorkerRole::ALL.iter().map(move |role| (*role, self.get(*role)))
    }
}

/// Path costs from the spawn to each resource node, and the figures derived
/// from them.
#[derive(Clone, Debug, PartialEq)]
pub struct ThroughputProfile {
    /// Path cost per resource node, `None` where no route exists.
    pub node_distances: Vec<Option<u32>>,
    config: ThroughputConfig,
}

impl ThroughputProfile {
    /// Measure spawn-to-node costs on terrain alone.
    pub fn compute(
        site: &dyn SiteDataSource,
        pathfinder: &dyn PathFinder,
        roads: &RoadConfig,
        config: &ThroughputConfig,
    ) -> (ThroughputProfile, Vec<PlanningWarning>) {
        let mut warnings = Vec::new();
        let nodes = site.get_resource_nodes();

        let spawn = match site.get_spawns().first() {
            Some(spawn) => *spawn,
            None => {
                warnings.push(PlanningWarning::MissingSpawn);
                return (
                    ThroughputProfile::from_distances(vec![None; nodes.len()], config),
                    warnings,
                );
            }
        };

        let reserved = site.reserved_tiles();
        let costs = TileCost::new(site.get_terrain(), None, roads).with_reserved(&reserved);
        let distances = nodes
            .iter()
            .map(|node| {
                let result = pathfinder.shortest_path(
                    spawn,
                    PathGoal::new(*node, roads.resource_range),
                    &|loc| costs.cost(loc),
                );
                if result.is_none() {
                    warnings.push(PlanningWarning::PathUnreachable { from: spawn, to: *node });
                }
                result.map(|r| r.cost)
            })
            .collect();

        let profile = ThroughputProfile::from_distances(distances, config);
        debug!(
            "Throughput profile: {} of {} nodes reachable, round trip {}",
            profile.reachable_nodes(),
            nodes.len(),
            profile.round_trip()
        );

        (profile, warnings)
    }

    pub fn from_distances(node_distances: Vec<Option<u32>>, config: &ThroughputConfig) -> Self {
        ThroughputProfile {
            node_distances,
            config: config.clone(),
        }
    }

    pub fn reachable_nodes(&self) -> u32 {
        self.node_distances.iter().flatten().count() as u32
    }

    /// Mean path cost over reachable nodes, 0 if there are none.
    pub fn average_distance(&self) -> f64 {
        let reachable = self.reachable_nodes();
        if reachable == 0 {
            return 0.0;
        }
        let sum: u32 = self.node_distances.iter().flatten().sum();
        sum as f64 / reachable as f64
    }

    /// Ticks for one hauling round trip: `2 * avg + turnaround`.
    pub fn round_trip(&self) -> f64 {
        2.0 * self.average_distance() + self.config.turnaround as f64
    }

    /// Carry one hauler needs to keep up over a round trip, before rounding.
    pub fn carry_target(&self) -> f64 {
        self.config.carry_ratio * self.round_trip()
    }

    /// Carry parts one hauler needs to keep up over a round trip.
    pub fn carry_parts_per_hauler(&self) -> u32 {
        self.carry_target().ceil() as u32
    }

    /// Share of a hauler's time spent moving cargo rather than in transit overhead.
    pub fn efficiency(&self) -> f64 {
        1.0 / (1.0 + self.round_trip() / self.config.efficiency_horizon)
    }

    pub fn total_extraction_rate(&self) -> f64 {
        self.config.extraction_rate * self.reachable_nodes() as f64
    }

    /// Bodies for every role, sized for this profile's round trip.
    pub fn body_composition(&self, tier: u8, energy: u32) -> BodyPlan {
        BodyPlan::compose(
            tier,
            energy,
            self.config.max_extraction_work,
            Some(self.carry_parts_per_hauler()),
        )
    }

    fn haulers(&self, carry_available: u32) -> u32 {
        let reachable = self.reachable_nodes();
        if reachable == 0 {
            return 0;
        }

        let round_trip = self.round_trip();
        // Unrounded carry target; rounding it up would make the count step
        // down as the round trip crosses a whole part.
        let carry = self.carry_target().min(carry_available.max(1) as f64);
        let per_trip = carry * self.config.unit_capacity as f64 * self.efficiency();
        let needed = self.total_extraction_rate() * round_trip / per_trip;

        (needed.ceil() as u32).clamp(1, self.config.max_haulers.max(1))
    }

    pub fn population_targets(&self, tier: u8, energy: u32) -> PopulationTargets {
        let bodies = self.body_composition(tier, energy);

        // Hauler count uses the carry of a full-size body, independent of the
        // round trip.
        let uncapped_hauler =
            BodyPlan::compose(tier, energy, self.config.max_extraction_work, None);
        let carry_available = uncapped_hauler.get(WorkerRole::Hauler).count(PartKind::Carry);

        let harvesters = self.reachable_nodes();
        let haulers = self.haulers(carry_available);

        let upkeep = (harvesters * bodies.get(WorkerRole::Harvester).cost()
            + haulers * bodies.get(WorkerRole::Hauler).cost()) as f64
            / WORKER_LIFETIME as f64;
        let remaining = (self.total_extraction_rate() - upkeep).max(0.0);

        let upgrader_work = bodies.get(WorkerRole::Upgrader).count(PartKind::Work).max(1) as f64;
        let builder_work = bodies.get(WorkerRole::Builder).count(PartKind::Work).max(1) as f64;

        let growth = remaining * self.config.growth_share;
        let construction = remaining * (1.0 - self.config.growth_share);

        let growth_rate = upgrader_work * self.config.growth_rate_per_work;
        let upgraders = ((growth / growth_rate).floor() as u32)
            .clamp(1, self.config.max_growth_workers.max(1));

        let min_builders = if tier <= 3 { 2 } else { 1 };
        let construction_rate = builder_work * self.config.construction_rate_per_work;
        let builders = ((construction / construction_rate).floor() as u32)
            .clamp(min_builders, self.config.max_construction_workers.max(min_builders));

        let targets = PopulationTargets {
            harvesters,
            haulers,
            upgraders,
            builders,
        };

        debug!(
            "Population at tier {} / {} energy: {:?} (upkeep {:.2}/tick)",
            tier, energy, targets, upkeep
        );

        targets
    }
}
