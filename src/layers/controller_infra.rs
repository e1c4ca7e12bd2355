//! ControllerInfraLayer: Places the controller container.
//! Deterministic: the free tile within range of the controller that sits
//! closest to the anchor, ties broken in row-major order.

use crate::constants::INFRA_CONTAINER_TIER;
use crate::error::PlanningWarning;
use crate::layer::*;
use crate::location::*;
use crate::placer::TileCheck;
use crate::plan::*;
use crate::stamps::TierRule;
use log::*;

pub struct ControllerInfraLayer;

impl PlanningLayer for ControllerInfraLayer {
    fn name(&self) -> &str {
        "controller_infra"
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let controller = match context.site.get_controller() {
            Some(loc) => loc,
            None => return LayerOutcome::Continue,
        };

        if let Some(existing) = context.plan.with_role(StructureRole::ControllerContainer) {
            trace!("Controller already served by {}", existing.location);
            return LayerOutcome::Continue;
        }

        let anchor = context.get_landmark("anchor");
        let range = context.config.roads.controller_range as i8;
        let placer = context.placer.with_inset(context.config.placement.infra_inset);

        let mut candidates = Vec::new();
        for dy in -range..=range {
            for dx in -range..=range {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(loc) = controller.checked_add(dx, dy) {
                    let check = placer.check_tile(context.plan, Some(loc), BuildingKind::Container);
                    if check == TileCheck::Place {
                        candidates.push(loc);
                    }
                }
            }
        }

        let site = candidates
            .into_iter()
            .min_by_key(|loc| (anchor.map_or(0, |a| a.distance_to(*loc)), loc.scan_key()));

        match site {
            Some(site) => {
                context.report += placer.place_single(
                    context.plan,
                    "controller_container",
                    site,
                    BuildingKind::Container,
                    TierRule::Fixed(INFRA_CONTAINER_TIER),
                    Some(StructureRole::ControllerContainer),
                );
            }
            None => context.warn(PlanningWarning::NoContainerSite { target: controller }),
        }

        LayerOutcome::Continue
    }
}
