//! Shortest-path seam shared by road planning and throughput math.

use crate::config::RoadConfig;
use crate::location::*;
use crate::plan::Plan;
use crate::terrain::*;
use pathfinding::directed::astar::astar;

/// Destination of a path: any tile within `range` of `target`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathGoal {
    pub target: Location,
    pub range: u8,
}

impl PathGoal {
    pub fn new(target: Location, range: u8) -> Self {
        PathGoal { target, range }
    }

    pub fn is_reached(&self, loc: Location) -> bool {
        loc.distance_to(self.target) <= self.range
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// Tiles from origin to the final tile, both included.
    pub path: Vec<Location>,
    pub cost: u32,
}

pub trait PathFinder {
    /// Cheapest path from `origin` to `goal`. `cost` returns the cost of
    /// entering a tile, or `None` if the tile cannot be entered.
    fn shortest_path(
        &self,
        origin: Location,
        goal: PathGoal,
        cost: &dyn Fn(Location) -> Option<u32>,
    ) -> Option<PathResult>;
}

/// A* over 8-connected tiles.
pub struct AStarPathFinder {
    /// Lowest cost any tile can have; scales the heuristic so it stays admissible.
    pub min_step_cost: u32,
}

impl AStarPathFinder {
    pub fn for_config(config: &RoadConfig) -> Self {
        AStarPathFinder {
            min_step_cost: config
                .open_cost
                .min(config.hazardous_cost)
                .min(config.road_cost),
        }
    }
}

impl PathFinder for AStarPathFinder {
    fn shortest_path(
        &self,
        origin: Location,
        goal: PathGoal,
        cost: &dyn Fn(Location) -> Option<u32>,
    ) -> Option<PathResult> {
        let min_step = self.min_step_cost;

        astar(
            &origin,
            |&loc| {
                NEIGHBORS_8
                    .iter()
                    .filter_map(move |&(dx, dy)| {
                        let next = loc.checked_add(dx, dy)?;
                        cost(next).map(|c| (next, c))
                    })
                    .collect::<Vec<_>>()
            },
            |&loc| {
                let dist = loc.distance_to(goal.target).saturating_sub(goal.range);
                dist as u32 * min_step
            },
            |&loc| goal.is_reached(loc),
        )
        .map(|(path, cost)| PathResult { path, cost })
    }
}

/// Movement cost of a tile given terrain and what is already planned on it.
pub struct TileCost<'a> {
    terrain: &'a SiteTerrain,
    plan: Option<&'a Plan>,
    config: &'a RoadConfig,
    reserved: &'a [Location],
}

impl<'a> TileCost<'a> {
    pub fn new(terrain: &'a SiteTerrain, plan: Option<&'a Plan>, config: &'a RoadConfig) -> Self {
        TileCost {
            terrain,
            plan,
            config,
            reserved: &[],
        }
    }

    /// Treat `reserved` tiles as impassable.
    pub fn with_reserved(mut self, reserved: &'a [Location]) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn cost(&self, loc: Location) -> Option<u32> {
        let base = match self.terrain.kind(loc) {
            TerrainKind::Impassable => return None,
            _ if self.reserved.contains(&loc) => return None,
            TerrainKind::Hazardous => self.config.hazardous_cost,
            TerrainKind::Open => self.config.open_cost,
        };

        match self.plan {
            Some(plan) if plan.non_road_at(loc).is_some() => {
                Some(base + self.config.building_penalty)
            }
            Some(plan) if plan.has_road(loc) => Some(self.config.road_cost),
            _ => Some(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{BuildingKind, PlannedStructure};
    use crate::test_support::*;

    fn loc(x: u8, y: u8) -> Location {
        Location::from_xy(x, y)
    }

    #[test]
    fn straight_path_costs_its_length() {
        let terrain = walled_terrain();
        let config = RoadConfig::default();
        let costs = TileCost::new(&terrain, None, &config);
        let finder = AStarPathFinder::for_config(&config);

        let result = finder
            .shortest_path(loc(10, 10), PathGoal::new(loc(20, 10), 1), &|l| costs.cost(l))
            .unwrap();

        assert_eq!(result.cost, 9);
        assert_eq!(result.path.first(), Some(&loc(10, 10)));
        assert_eq!(result.path.last().map(|l| l.distance_to(loc(20, 10))), Some(1));
    }

    #[test]
    fn hazardous_crossing_costs_more() {
        let mut rows = walled_rows();
        fill_rect(&mut rows, 15, 1, 15, 48, '~');
        let terrain = terrain_from(&rows);
        let config = RoadConfig::default();
        let costs = TileCost::new(&terrain, None, &config);
        let finder = AStarPathFinder::for_config(&config);

        let result = finder
            .shortest_path(loc(10, 10), PathGoal::new(loc(20, 10), 0), &|l| costs.cost(l))
            .unwrap();

        // The strip spans the whole site, so one crossing at cost 5 is unavoidable.
        assert_eq!(result.cost, 14);
    }

    #[test]
    fn walled_off_target_is_unreachable() {
        let mut rows = walled_rows();
        fill_rect(&mut rows, 30, 1, 30, 48, '#');
        let terrain = terrain_from(&rows);
        let config = RoadConfig::default();
        let costs = TileCost::new(&terrain, None, &config);
        let finder = AStarPathFinder::for_config(&config);

        assert!(finder
            .shortest_path(loc(10, 10), PathGoal::new(loc(40, 10), 1), &|l| costs.cost(l))
            .is_none());
    }

    #[test]
    fn paths_go_around_reserved_tiles() {
        let terrain = walled_terrain();
        let config = RoadConfig::default();
        let reserved = [loc(20, 10)];
        let costs = TileCost::new(&terrain, None, &config).with_reserved(&reserved);
        let finder = AStarPathFinder::for_config(&config);

        let result = finder
            .shortest_path(loc(10, 10), PathGoal::new(loc(30, 10), 0), &|l| costs.cost(l))
            .unwrap();

        assert_eq!(costs.cost(loc(20, 10)), None);
        assert!(!result.path.contains(&loc(20, 10)));
        assert_eq!(result.cost, 20);
    }

    #[test]
    fn planned_entries_change_tile_cost() {
        let mut rows = walled_rows();
        set_tile(&mut rows, 6, 5, '~');
        let terrain = terrain_from(&rows);
        let config = RoadConfig::default();
        let mut plan = Plan::new();
        plan.insert(PlannedStructure::new(loc(5, 5), BuildingKind::Extension, 2));
        plan.insert(PlannedStructure::new(loc(6, 5), BuildingKind::Road, 1));
        let costs = TileCost::new(&terrain, Some(&plan), &config);

        assert_eq!(costs.cost(loc(5, 5)), Some(21));
        assert_eq!(costs.cost(loc(6, 5)), Some(1));
        assert_eq!(costs.cost(loc(7, 5)), Some(1));
        assert_eq!(costs.cost(loc(0, 5)), None);
    }
}
