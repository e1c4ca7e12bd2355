//! SourceInfraLayer: Places one container beside each resource node.
//!
//! Container placement is optimized for harvest throughput: the primary sort
//! key is the number of "harvest positions" -- tiles adjacent to both the
//! node and the container where a worker can extract and unload without
//! moving. Ties are broken by distance to the anchor for shorter haul routes,
//! then by row-major order.
//!
//! Each container is tagged with the index of the node it serves, so a later
//! pass recognises it without looking at proximity again.

use crate::constants::INFRA_CONTAINER_TIER;
use crate::error::PlanningWarning;
use crate::layer::*;
use crate::location::*;
use crate::placer::*;
use crate::plan::*;
use crate::stamps::TierRule;
use crate::terrain::*;
use log::*;
use std::cmp::Reverse;

pub struct SourceInfraLayer;

impl PlanningLayer for SourceInfraLayer {
    fn name(&self) -> &str {
        "source_infra"
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let anchor = context.get_landmark("anchor");
        let placer = context.placer.with_inset(context.config.placement.infra_inset);
        let nodes = context.site.get_resource_nodes();

        for (index, &node) in nodes.iter().enumerate() {
            let role = StructureRole::ResourceContainer { node: index };

            if let Some(existing) = context.plan.with_role(role) {
                trace!("Resource node {} already served by {}", node, existing.location);
                continue;
            }

            let terrain = context.terrain();
            let site = match best_container_site(&placer, context.plan, terrain, node, anchor) {
                Some(loc) => loc,
                None => {
                    context.warn(PlanningWarning::NoContainerSite { target: node });
                    continue;
                }
            };

            let report = placer.place_single(
                context.plan,
                "resource_container",
                site,
                BuildingKind::Container,
                TierRule::Fixed(INFRA_CONTAINER_TIER),
                Some(role),
            );
            context.report += report;
            context.add_to_landmark_set("resource_containers", site);
        }

        LayerOutcome::Continue
    }
}

/// Best free tile next to `node`, or `None` if every neighbour is blocked.
fn best_container_site(
    placer: &StampPlacer,
    plan: &Plan,
    terrain: &SiteTerrain,
    node: Location,
    anchor: Option<Location>,
) -> Option<Location> {
    NEIGHBORS_8
        .iter()
        .filter_map(|&(dx, dy)| node.checked_add(dx, dy))
        .filter(|&loc| {
            placer.check_tile(plan, Some(loc), BuildingKind::Container) == TileCheck::Place
        })
        .min_by_key(|&loc| {
            let harvest_positions = count_harvest_positions(node, loc, terrain, plan);
            let anchor_dist = anchor.map_or(0, |a| a.distance_to(loc));
            (Reverse(harvest_positions), anchor_dist, loc.scan_key())
        })
}

/// Count the tiles adjacent to both the node and the container candidate
/// where a worker could stand (not wall, no planned building).
fn count_harvest_positions(
    node: Location,
    container: Location,
    terrain: &SiteTerrain,
    plan: &Plan,
) -> u8 {
    let mut count = 0u8;
    for &(dx, dy) in &NEIGHBORS_8 {
        if let Some(nloc) = node.checked_add(dx, dy) {
            if terrain.is_wall_at(nloc) || plan.non_road_at(nloc).is_some() {
                continue;
            }

            if nloc.distance_to(container) == 1 {
                count += 1;
            }
        }
    }
    count
}
