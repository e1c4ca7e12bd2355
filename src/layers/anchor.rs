//! AnchorLayer: Picks the base centre from the distance transform.
//! Does NOT place any structures; that is the job of a subsequent StampLayer.
//!
//! Every candidate must have at least `min_wall_distance` open tiles around it
//! so the hub stamp fits. Among those the score
//! `wall_distance * 2 - min(controller_dist, 15) * 0.5 - min(spawn_dist, 10) * 0.3`
//! is maximised, with ties going to the first tile in row-major order.

use crate::config::{AnchorConfig, PlannerConfig};
use crate::constants::*;
use crate::error::PlanningWarning;
use crate::layer::*;
use crate::location::*;
use crate::terrain::*;
use log::*;

/// Distance matrix plus the chosen anchor, if any tile qualified.
#[derive(Clone, Debug)]
pub struct TerrainAnalysis {
    pub dist_transform: SiteDataArray<u8>,
    pub anchor: Option<Location>,
}

/// Score of a single candidate tile.
pub fn anchor_score(
    wall_distance: u8,
    controller_distance: Option<u8>,
    spawn_distance: Option<u8>,
    config: &AnchorConfig,
) -> f32 {
    let controller = controller_distance.map_or(0, |d| d.min(config.controller_cap));
    let spawn = spawn_distance.map_or(0, |d| d.min(config.spawn_cap));
    wall_distance as f32 * 2.0 - controller as f32 * 0.5 - spawn as f32 * 0.3
}

/// Choose the anchor from a precomputed distance matrix.
pub fn select_anchor(
    dist_transform: &SiteDataArray<u8>,
    controller: Option<Location>,
    spawns: &[Location],
    config: &AnchorConfig,
) -> Option<Location> {
    let inset = config.candidate_inset;
    let mut best: Option<(Location, f32)> = None;

    for y in inset..SITE_HEIGHT.saturating_sub(inset) {
        for x in inset..SITE_WIDTH.saturating_sub(inset) {
            let wall_distance = *dist_transform.get(x as usize, y as usize);
            if wall_distance < config.min_wall_distance {
                continue;
            }

            let loc = Location::from_xy(x, y);
            let controller_distance = controller.map(|c| loc.distance_to(c));
            let spawn_distance = spawns.iter().map(|s| loc.distance_to(*s)).min();
            let score = anchor_score(wall_distance, controller_distance, spawn_distance, config);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((loc, score));
            }
        }
    }

    best.map(|(loc, _)| loc)
}

pub fn analyze_terrain(
    terrain: &SiteTerrain,
    controller: Option<Location>,
    spawns: &[Location],
    config: &AnchorConfig,
) -> TerrainAnalysis {
    let dist_transform = distance_transform(terrain, config.max_relaxation_passes);
    let anchor = select_anchor(&dist_transform, controller, spawns, config);
    TerrainAnalysis {
        dist_transform,
        anchor,
    }
}

/// Sets the "anchor" landmark and publishes the distance matrix.
pub struct AnchorLayer;

impl PlanningLayer for AnchorLayer {
    fn name(&self) -> &str {
        "anchor"
    }

    fn requires_anchor(&self, _config: &PlannerConfig) -> bool {
        false
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let controller = context.site.get_controller();
        if controller.is_none() {
            context.warn(PlanningWarning::MissingController);
        }

        let config = &context.config.anchor;
        let analysis = analyze_terrain(
            context.terrain(),
            controller,
            context.site.get_spawns(),
            config,
        );
        context.dist_transform = Some(analysis.dist_transform);

        match analysis.anchor {
            Some(anchor) => {
                debug!("AnchorLayer: anchor at {}", anchor);
                context.set_landmark("anchor", anchor);
                LayerOutcome::Continue
            }
            None => {
                context.warn(PlanningWarning::NoAnchorFound {
                    min_wall_distance: config.min_wall_distance,
                });
                LayerOutcome::Halt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    fn loc(x: u8, y: u8) -> Location {
        Location::from_xy(x, y)
    }

    #[test]
    fn wall_distance_outweighs_proximity() {
        let terrain = walled_terrain();
        let config = AnchorConfig::default();
        let analysis = analyze_terrain(&terrain, Some(loc(20, 20)), &[loc(22, 22)], &config);

        // One step of wall distance is worth more than the combined proximity
        // penalties, so the anchor stays on the plateau nearest the controller.
        assert_eq!(analysis.anchor, Some(loc(24, 24)));
        assert_eq!(analysis.dist_transform.at(loc(24, 24)), 24);
    }

    #[test]
    fn proximity_breaks_plateau_ties() {
        let mut rows = walled_rows();
        // Two identical 7x7 pockets; the one near the controller wins.
        fill_rect(&mut rows, 1, 1, 48, 48, '#');
        fill_rect(&mut rows, 6, 6, 12, 12, '.');
        fill_rect(&mut rows, 30, 30, 36, 36, '.');
        let terrain = terrain_from(&rows);
        let config = AnchorConfig::default();

        let near_first = analyze_terrain(&terrain, Some(loc(9, 14)), &[], &config);
        assert_eq!(near_first.anchor, Some(loc(9, 9)));

        let near_second = analyze_terrain(&terrain, Some(loc(33, 38)), &[], &config);
        assert_eq!(near_second.anchor, Some(loc(33, 33)));
    }

    #[test]
    fn missing_inputs_contribute_nothing() {
        let config = AnchorConfig::default();
        assert_eq!(anchor_score(5, None, None, &config), 10.0);
        assert_eq!(anchor_score(5, Some(40), None, &config), 2.5);
        assert!((anchor_score(5, None, Some(40), &config) - 7.0).abs() < 1e-4);
    }

    #[test]
    fn ties_go_to_first_tile_in_scan_order() {
        let terrain = walled_terrain();
        let config = AnchorConfig::default();
        let analysis = analyze_terrain(&terrain, None, &[], &config);

        // Without controller or spawn only wall distance matters; the first
        // tile with the maximum distance (24) in row-major order is (24, 24).
        assert_eq!(analysis.anchor, Some(loc(24, 24)));
    }

    #[test]
    fn cramped_site_has_no_anchor() {
        let mut rows = walled_rows();
        // Pillars every third tile leave no tile three steps from a wall.
        for y in (0..50u8).step_by(3) {
            for x in (0..50u8).step_by(3) {
                set_tile(&mut rows, x, y, '#');
            }
        }
        let terrain = terrain_from(&rows);
        let analysis = analyze_terrain(&terrain, None, &[], &AnchorConfig::default());

        assert_eq!(analysis.anchor, None);
    }

    #[test]
    fn anchor_needs_room_for_the_hub() {
        let mut rows = walled_rows();
        fill_rect(&mut rows, 1, 1, 48, 48, '#');
        fill_rect(&mut rows, 10, 10, 14, 14, '.');
        let terrain = terrain_from(&rows);
        let analysis = analyze_terrain(&terrain, None, &[], &AnchorConfig::default());

        assert_eq!(analysis.anchor, Some(loc(12, 12)));
    }
}
