//! StampLayer: Commits a stamp exactly at a named landmark.
//! Optional placements that do not fit are skipped; the rest of the stamp is
//! still placed.

use crate::layer::*;
use crate::stamps::Stamp;
use log::*;

pub struct StampLayer {
    /// Name for debugging.
    pub layer_name: &'static str,
    /// Landmark to read as the anchor position.
    pub anchor_landmark: &'static str,
    pub stamp: Stamp,
}

impl PlanningLayer for StampLayer {
    fn name(&self) -> &str {
        self.layer_name
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let anchor = match context.get_landmark(self.anchor_landmark) {
            Some(loc) => loc,
            None => {
                debug!("{}: no {} landmark", self.layer_name, self.anchor_landmark);
                return LayerOutcome::Continue;
            }
        };

        let report = context.placer.place(context.plan, &self.stamp, anchor);
        context.report += report;

        LayerOutcome::Continue
    }
}

/// Create a StampLayer that places the core cluster at the "anchor" landmark.
pub fn hub_stamp_layer() -> StampLayer {
    use crate::stamps::hub_stamp;

    let stamp = hub_stamp();
    debug_assert!(stamp.validate(), "hub stamp failed validation");

    StampLayer {
        layer_name: "hub_stamp",
        anchor_landmark: "anchor",
        stamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::location::*;
    use crate::pathing::AStarPathFinder;
    use crate::placer::StampPlacer;
    use crate::plan::*;
    use crate::site_data::*;
    use crate::stamps::hub_stamp;
    use crate::test_support::*;

    #[test]
    fn hub_lands_on_anchor() {
        let site = StaticSiteData::new(walled_terrain());
        let inventory = StaticInventory::empty();
        let config = PlannerConfig::default();
        let pathfinder = AStarPathFinder::for_config(&config.roads);
        let mut plan = Plan::new();
        let placer = StampPlacer::new(&site.terrain, &inventory, 3);
        let mut context = PassContext::new(&site, &config, placer, &pathfinder, &mut plan);
        context.set_landmark("anchor", Location::from_xy(20, 30));

        hub_stamp_layer().apply(&mut context);

        assert_eq!(context.report.added, hub_stamp().placements().len());
        assert!(context.plan.contains(Location::from_xy(20, 31), BuildingKind::Storage));
        assert!(context.plan.contains(Location::from_xy(20, 30), BuildingKind::Road));
    }

    #[test]
    fn missing_landmark_places_nothing() {
        let site = StaticSiteData::new(walled_terrain());
        let inventory = StaticInventory::empty();
        let config = PlannerConfig::default();
        let pathfinder = AStarPathFinder::for_config(&config.roads);
        let mut plan = Plan::new();
        let placer = StampPlacer::new(&site.terrain, &inventory, 3);
        let mut context = PassContext::new(&site, &config, placer, &pathfinder, &mut plan);

        let outcome = hub_stamp_layer().apply(&mut context);

        assert_eq!(outcome, LayerOutcome::Continue);
        assert!(context.plan.is_empty());
    }
}
