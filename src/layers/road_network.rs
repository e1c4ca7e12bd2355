//! RoadNetworkLayer: Routes roads from the spawn to every key destination.
//!
//! Each pair is routed on its own with the plan as it stands, so later routes
//! ride on earlier roads (cheap) and bend around planned buildings (penalised,
//! not forbidden). Interior path tiles become road entries; the origin and
//! the final tile are left alone.

use crate::error::PlanningWarning;
use crate::layer::*;
use crate::location::*;
use crate::pathing::*;
use crate::plan::*;
use crate::stamps::TierRule;
use log::*;

/// One routing request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoadRoute {
    pub origin: Location,
    pub goal: PathGoal,
}

pub struct RoadNetworkLayer;

impl RoadNetworkLayer {
    /// Spawn to nodes, controller and clusters, in that order.
    fn routes(&self, context: &mut PassContext) -> Vec<RoadRoute> {
        let origin = match context.site.get_spawns().first() {
            Some(spawn) => *spawn,
            None => match context.get_landmark("anchor") {
                Some(anchor) => {
                    context.warn(PlanningWarning::MissingSpawn);
                    anchor
                }
                None => return Vec::new(),
            },
        };

        let roads = &context.config.roads;
        let mut routes: Vec<RoadRoute> = context
            .site
            .get_resource_nodes()
            .iter()
            .map(|node| RoadRoute {
                origin,
                goal: PathGoal::new(*node, roads.resource_range),
            })
            .collect();

        if let Some(controller) = context.site.get_controller() {
            routes.push(RoadRoute {
                origin,
                goal: PathGoal::new(controller, roads.controller_range),
            });
        }

        routes.extend(context.get_landmark_set("clusters").iter().map(|cluster| RoadRoute {
            origin,
            goal: PathGoal::new(*cluster, roads.cluster_range),
        }));

        routes
    }
}

impl PlanningLayer for RoadNetworkLayer {
    fn name(&self) -> &str {
        "road_network"
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let placer = context.placer.with_inset(context.config.roads.inset);

        for route in self.routes(context) {
            let path = {
                let costs =
                    TileCost::new(context.terrain(), Some(&*context.plan), &context.config.roads)
                        .with_reserved(context.placer.reserved());
                context
                    .pathfinder
                    .shortest_path(route.origin, route.goal, &|loc| costs.cost(loc))
            };

            let path = match path {
                Some(path) => path,
                None => {
                    context.warn(PlanningWarning::PathUnreachable {
                        from: route.origin,
                        to: route.goal.target,
                    });
                    continue;
                }
            };

            let interior = path.path.len().saturating_sub(1);
            let mut added = 0;
            for loc in path.path.iter().take(interior).skip(1) {
                let report =
                    placer.place_single(
                        context.plan,
                        "road",
                        *loc,
                        BuildingKind::Road,
                        TierRule::Auto,
                        None,
                    );
                added += report.added;
                context.report += report;
            }

            debug!(
                "Route {} -> {}: cost {}, {} new road tiles",
                route.origin, route.goal.target, path.cost, added
            );
        }

        LayerOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::site_data::*;
    use crate::test_support::*;

    fn loc(x: u8, y: u8) -> Location {
        Location::from_xy(x, y)
    }

    fn run(
        site: &StaticSiteData,
        plan: &mut Plan,
        anchor: Option<Location>,
    ) -> Vec<PlanningWarning> {
        let inventory = StaticInventory::empty();
        let config = PlannerConfig::default();
        with_context(site, &inventory, &config, plan, |context| {
            if let Some(anchor) = anchor {
                context.set_landmark("anchor", anchor);
            }
            RoadNetworkLayer.apply(context);
            context.warnings.clone()
        })
    }

    #[test]
    fn route_interior_becomes_road() {
        let site = StaticSiteData::new(walled_terrain())
            .with_spawn(loc(10, 25))
            .with_resource_node(loc(30, 25));
        let mut plan = Plan::new();

        let warnings = run(&site, &mut plan, None);

        assert!(warnings.is_empty());
        // 19 steps to reach (29, 25): 20 tiles, minus both endpoints.
        assert_eq!(plan.count(BuildingKind::Road), 18);
        assert!(!plan.has_road(loc(10, 25)));
        assert!(!plan.has_road(loc(29, 25)));
    }

    #[test]
    fn unreachable_node_adds_no_roads() {
        let mut rows = walled_rows();
        fill_rect(&mut rows, 20, 1, 20, 48, '#');
        let site = StaticSiteData::new(terrain_from(&rows))
            .with_spawn(loc(10, 25))
            .with_resource_node(loc(30, 25));
        let mut plan = Plan::new();

        let warnings = run(&site, &mut plan, None);

        assert_eq!(
            warnings,
            vec![PlanningWarning::PathUnreachable {
                from: loc(10, 25),
                to: loc(30, 25)
            }]
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn roads_bend_around_planned_buildings() {
        let site = StaticSiteData::new(walled_terrain())
            .with_spawn(loc(10, 25))
            .with_resource_node(loc(30, 25));
        let mut plan = Plan::new();
        plan.insert(PlannedStructure::new(loc(20, 25), BuildingKind::Tower, 3));

        run(&site, &mut plan, None);

        assert!(!plan.has_road(loc(20, 25)));
        assert_eq!(plan.count(BuildingKind::Road), 18);
    }

    #[test]
    fn second_route_reuses_first() {
        let site = StaticSiteData::new(walled_terrain())
            .with_spawn(loc(10, 25))
            .with_resource_node(loc(30, 25))
            .with_controller(loc(40, 25));
        let mut plan = Plan::new();

        run(&site, &mut plan, None);
        let roads = plan.count(BuildingKind::Road);

        // A rerun sees its own roads and adds nothing.
        run(&site, &mut plan, None);
        assert_eq!(plan.count(BuildingKind::Road), roads);
    }

    #[test]
    fn missing_spawn_routes_from_anchor() {
        let site = StaticSiteData::new(walled_terrain()).with_resource_node(loc(30, 25));
        let mut plan = Plan::new();

        let warnings = run(&site, &mut plan, Some(loc(20, 25)));

        assert_eq!(warnings, vec![PlanningWarning::MissingSpawn]);
        assert_eq!(plan.count(BuildingKind::Road), 8);
    }
}
