//! Tunables for every planning component. All structs default to the values
//! the planner ships with and deserialize with missing fields filled from
//! those defaults.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub anchor: AnchorConfig,
    pub placement: PlacementConfig,
    pub roads: RoadConfig,
    pub seal: SealConfig,
    pub throughput: ThroughputConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Minimum wall distance for an anchor (room for the core stamp).
    pub min_wall_distance: u8,
    /// Rows/columns skipped along each edge when scanning for candidates.
    pub candidate_inset: u8,
    /// Controller distance stops mattering beyond this.
    pub controller_cap: u8,
    /// Spawn distance stops mattering beyond this.
    pub spawn_cap: u8,
    /// Upper bound on distance-transform sweep pairs.
    pub max_relaxation_passes: usize,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        AnchorConfig {
            min_wall_distance: 3,
            candidate_inset: 4,
            controller_cap: 15,
            spawn_cap: 10,
            max_relaxation_passes: 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Stamps never place inside this many border rows/columns.
    pub build_inset: u8,
    /// Containers beside resource nodes and the controller may sit this close to an edge.
    pub infra_inset: u8,
    pub extension_fields: usize,
    pub tower_clusters: usize,
    /// Max Chebyshev distance from the anchor searched for peripheral clusters.
    pub cluster_search_radius: u8,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig {
            build_inset: 3,
            infra_inset: 1,
            extension_fields: 5,
            tower_clusters: 1,
            cluster_search_radius: 12,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub open_cost: u32,
    pub hazardous_cost: u32,
    /// Cost of a tile that already carries a planned road.
    pub road_cost: u32,
    /// Added to a tile that carries a planned non-road building.
    pub building_penalty: u32,
    pub resource_range: u8,
    pub controller_range: u8,
    pub cluster_range: u8,
    /// Roads stay at least this far from every edge.
    pub inset: u8,
}

impl Default for RoadConfig {
    fn default() -> Self {
        RoadConfig {
            open_cost: 1,
            hazardous_cost: 5,
            road_cost: 1,
            building_penalty: 20,
            resource_range: 1,
            controller_range: 2,
            cluster_range: 1,
            inset: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SealPolicy {
    /// Walls at both ends of each entrance.
    Bookend,
    /// A wall line across each entrance with one gate at its midpoint.
    Curtain,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealConfig {
    pub policy: SealPolicy,
    /// Segments on one edge separated by at most this many blocked tiles merge.
    pub gap_tolerance: u8,
    /// Tiles added to each end of an entrance span before projecting.
    pub overhang: u8,
    /// Depth of the curtain line from the border.
    pub curtain_depth: u8,
    /// Deepest row a bookend wall may retreat to.
    pub max_depth: u8,
    /// Seal tiles must be at least this far from every edge.
    pub inset: u8,
    /// Seal the border even when no anchor was found.
    pub run_without_anchor: bool,
}

impl Default for SealConfig {
    fn default() -> Self {
        SealConfig {
            policy: SealPolicy::Bookend,
            gap_tolerance: 5,
            overhang: 1,
            curtain_depth: 2,
            max_depth: 2,
            inset: 1,
            run_without_anchor: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThroughputConfig {
    /// Fixed ticks added to every round trip for loading and turnaround.
    pub turnaround: u32,
    /// Carry parts needed per tick of round trip.
    pub carry_ratio: f64,
    /// Energy extracted per tick from one resource node.
    pub extraction_rate: f64,
    /// Cargo held by one carry part.
    pub unit_capacity: u32,
    /// Round-trip length at which hauling efficiency halves.
    pub efficiency_horizon: f64,
    pub max_haulers: u32,
    /// Share of spare energy spent on growth rather than construction.
    pub growth_share: f64,
    /// Energy per tick consumed by one work part on growth.
    pub growth_rate_per_work: f64,
    /// Energy per tick consumed by one work part on construction, averaged over idle time.
    pub construction_rate_per_work: f64,
    pub max_growth_workers: u32,
    pub max_construction_workers: u32,
    /// Work parts beyond this add nothing to a node's extraction.
    pub max_extraction_work: usize,
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        ThroughputConfig {
            turnaround: 4,
            carry_ratio: 0.4,
            extraction_rate: 10.0,
            unit_capacity: 50,
            efficiency_horizon: 50.0,
            max_haulers: 10,
            growth_share: 0.6,
            growth_rate_per_work: 1.0,
            construction_rate_per_work: 2.5,
            max_growth_workers: 8,
            max_construction_workers: 4,
            max_extraction_work: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "seal": { "policy": "curtain", "overhang": 0 } }"#).unwrap();

        assert_eq!(config.seal.policy, SealPolicy::Curtain);
        assert_eq!(config.seal.overhang, 0);
        assert_eq!(config.seal.gap_tolerance, 5);
        assert_eq!(config.anchor, AnchorConfig::default());
    }
}
