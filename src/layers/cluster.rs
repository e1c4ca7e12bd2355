//! ClusterLayer: Places peripheral stamps (extension fields, tower clusters)
//! around the anchor.
//!
//! Candidates are visited ring by ring (Chebyshev radius ascending, row-major
//! within a ring) and every rotation of the stamp is tried at each. The first
//! candidate whose required placements all hold, and that no earlier cluster
//! in this pass has claimed, wins. Claimed anchors are published in the
//! "clusters" landmark set and become road destinations.

use crate::error::PlanningWarning;
use crate::layer::*;
use crate::location::*;
use crate::placer::TileCheck;
use crate::plan::*;
use crate::stamps::*;
use itertools::Itertools;
use log::*;

pub struct ClusterLayer {
    pub layer_name: &'static str,
    pub stamp: Stamp,
    /// How many copies of the stamp to place.
    pub count: usize,
}

/// Tiles at exactly Chebyshev `radius` from `center`, row-major.
fn ring(center: Location, radius: u8) -> impl Iterator<Item = Location> {
    let r = radius as i8;
    (-r..=r).flat_map(move |dy| {
        (-r..=r)
            .filter(move |dx| dx.abs() == r || dy.abs() == r)
            .filter_map(move |dx| center.checked_add(dx, dy))
    })
}

impl ClusterLayer {
    fn find_anchor(
        &self,
        context: &PassContext,
        center: Location,
        rotations: &[Stamp],
    ) -> Option<(Location, usize)> {
        let claimed = context.get_landmark_set("clusters");
        let max_radius = context.config.placement.cluster_search_radius;

        for radius in 1..=max_radius {
            for candidate in ring(center, radius) {
                if claimed.contains(&candidate) {
                    continue;
                }
                for (index, stamp) in rotations.iter().enumerate() {
                    if self.fits_fresh(context, stamp, candidate) {
                        return Some((candidate, index));
                    }
                }
            }
        }

        None
    }

    /// Every required placement holds and no required building is already
    /// planned, so clusters never share buildings.
    fn fits_fresh(&self, context: &PassContext, stamp: &Stamp, anchor: Location) -> bool {
        stamp
            .placements()
            .iter()
            .filter(|p| p.required)
            .all(|p| {
                let check =
                    context.placer.check_tile(context.plan, stamp.resolve(p, anchor), p.kind);
                if p.kind.is_road() {
                    check.is_satisfied()
                } else {
                    check == TileCheck::Place
                }
            })
    }

    /// Anchors of copies of this stamp planned by an earlier pass, in plan order.
    fn planned_anchors(&self, context: &PassContext, rotations: &[Stamp]) -> Vec<Location> {
        context
            .plan
            .entries()
            .iter()
            .filter_map(|e| match e.role {
                Some(StructureRole::Cluster { anchor }) => Some(anchor),
                _ => None,
            })
            .unique()
            .filter(|&anchor| {
                rotations.iter().any(|stamp| is_fully_planned(context.plan, stamp, anchor))
            })
            .collect()
    }
}

fn is_fully_planned(plan: &Plan, stamp: &Stamp, anchor: Location) -> bool {
    stamp
        .placements()
        .iter()
        .filter(|p| p.required && !p.kind.is_road())
        .all(|p| {
            stamp
                .resolve(p, anchor)
                .map_or(false, |loc| plan.contains(loc, p.kind))
        })
}

impl PlanningLayer for ClusterLayer {
    fn name(&self) -> &str {
        self.layer_name
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let center = match context.get_landmark("anchor") {
            Some(loc) => loc,
            None => return LayerOutcome::Continue,
        };

        let rotations = self.stamp.all_rotations();

        // Copies from an earlier pass count towards the target and stay road
        // destinations.
        let mut placed = 0;
        for existing in self.planned_anchors(context, &rotations) {
            if placed >= self.count {
                break;
            }
            if !context.get_landmark_set("clusters").contains(&existing) {
                context.add_to_landmark_set("clusters", existing);
                placed += 1;
            }
        }

        while placed < self.count {
            match self.find_anchor(context, center, &rotations) {
                Some((anchor, rotation)) => {
                    let report = context.placer.place_with_role(
                        context.plan,
                        &rotations[rotation],
                        anchor,
                        Some(StructureRole::Cluster { anchor }),
                    );
                    context.report += report;
                    context.add_to_landmark_set("clusters", anchor);
                    placed += 1;
                }
                None => {
                    context.warn(PlanningWarning::ClusterUnplaced {
                        name: self.stamp.name,
                    });
                    break;
                }
            }
        }

        debug!("{}: {} of {} clusters planned", self.layer_name, placed, self.count);

        LayerOutcome::Continue
    }
}

pub fn extension_cluster_layer(count: usize) -> ClusterLayer {
    let stamp = extension_field_stamp();
    debug_assert!(stamp.validate(), "extension field stamp failed validation");

    ClusterLayer {
        layer_name: "extension_fields",
        stamp,
        count,
    }
}

pub fn tower_cluster_layer(count: usize) -> ClusterLayer {
    let stamp = tower_cluster_stamp();
    debug_assert!(stamp.validate(), "tower cluster stamp failed validation");

    ClusterLayer {
        layer_name: "tower_clusters",
        stamp,
        count,
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

    #[test]
    fn ring_is_row_major_and_exact() {
        let tiles: Vec<_> = ring(loc(10, 10), 1).collect();
        assert_eq!(
            tiles,
            vec![
                loc(9, 9),
                loc(10, 9),
                loc(11, 9),
                loc(9, 10),
                loc(11, 10),
                loc(9, 11),
                loc(10, 11),
                loc(11, 11),
            ]
        );
        assert_eq!(ring(loc(10, 10), 3).count(), 24);
    }

    #[test]
    fn clusters_do_not_overlap_the_hub() {
        let site = StaticSiteData::new(walled_terrain());
        let inventory = StaticInventory::empty();
        let config = PlannerConfig::default();
        let mut plan = Plan::new();

        let clusters = with_context(&site, &inventory, &config, &mut plan, |context| {
            context.set_landmark("anchor", loc(25, 25));
            crate::layers::stamp_layer::hub_stamp_layer().apply(context);
            extension_cluster_layer(3).apply(context);
            assert!(context.warnings.is_empty());
            context.get_landmark_set("clusters").to_vec()
        });

        assert_eq!(clusters.len(), 3);
        assert_eq!(plan.count(BuildingKind::Extension), 36);
        for entry in plan.entries() {
            assert!(plan.at(entry.location).filter(|e| !e.kind.is_road()).count() <= 1);
        }
    }

    #[test]
    fn rerun_reuses_planned_clusters() {
        let site = StaticSiteData::new(walled_terrain());
        let inventory = StaticInventory::empty();
        let config = PlannerConfig::default();
        let mut plan = Plan::new();

        let run = |plan: &mut Plan| {
            with_context(&site, &inventory, &config, plan, |context| {
                context.set_landmark("anchor", loc(25, 25));
                crate::layers::stamp_layer::hub_stamp_layer().apply(context);
                extension_cluster_layer(2).apply(context);
                (context.report.added, context.get_landmark_set("clusters").to_vec())
            })
        };

        let (first_added, first_clusters) = run(&mut plan);
        let (second_added, second_clusters) = run(&mut plan);

        assert!(first_added > 0);
        assert_eq!(second_added, 0);
        assert_eq!(first_clusters, second_clusters);
    }

    #[test]
    fn cramped_site_warns_when_nothing_fits() {
        let mut rows = walled_rows();
        fill_rect(&mut rows, 1, 1, 48, 48, '#');
        fill_rect(&mut rows, 22, 22, 28, 28, '.');
        let site = StaticSiteData::new(terrain_from(&rows));
        let inventory = StaticInventory::empty();
        let config = PlannerConfig::default();
        let mut plan = Plan::new();

        let warnings = with_context(&site, &inventory, &config, &mut plan, |context| {
            context.set_landmark("anchor", loc(25, 25));
            crate::layers::stamp_layer::hub_stamp_layer().apply(context);
            extension_cluster_layer(1).apply(context);
            context.warnings.clone()
        });

        assert_eq!(
            warnings,
            vec![PlanningWarning::ClusterUnplaced {
                name: "extension_field"
            }]
        );
    }
}
