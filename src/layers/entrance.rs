//! Entrance sealing.
//!
//! Passable runs along each border edge are found and merged into entrance
//! groups when only a few blocked tiles separate them. Every group wider than
//! one tile is then fortified by one of two policies:
//!
//! * Bookend: a wall just past each end of the group, one row in from the
//!   border, or two rows in when the first row is unusable.
//! * Curtain: a wall line across the whole group a fixed depth in, with a
//!   single gate at the usable tile nearest the group's midpoint.
//!
//! Single-tile entrances are left open; they are already a choke point.

use crate::config::{PlannerConfig, SealConfig, SealPolicy};
use crate::constants::*;
use crate::error::PlanningWarning;
use crate::layer::*;
use crate::location::*;
use crate::plan::*;
use crate::stamps::TierRule;
use crate::terrain::*;
use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Tile `index` along the edge, `depth` rows in from the border.
    pub fn project(self, index: i16, depth: u8) -> Option<Location> {
        let last = SITE_WIDTH as i16 - 1;
        if !(0..=last).contains(&index) || depth as i16 > last {
            return None;
        }
        let i = index as u8;
        let (x, y) = match self {
            Edge::Top => (i, depth),
            Edge::Bottom => (i, SITE_HEIGHT - 1 - depth),
            Edge::Left => (depth, i),
            Edge::Right => (SITE_WIDTH - 1 - depth, i),
        };
        Some(Location::from_xy(x, y))
    }
}

/// A run of passable border tiles, or a merged group of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EntranceSegment {
    pub edge: Edge,
    pub start: u8,
    pub end: u8,
}

impl EntranceSegment {
    pub fn width(&self) -> u8 {
        self.end - self.start + 1
    }
}

/// Maximal passable runs on every edge, edges in `Edge::ALL` order.
pub fn find_segments(terrain: &SiteTerrain) -> Vec<EntranceSegment> {
    Edge::ALL
        .iter()
        .flat_map(|&edge| {
            (0..SITE_WIDTH)
                .filter(move |&i| {
                    edge.project(i as i16, 0)
                        .map_or(false, |loc| !terrain.is_wall_at(loc))
                })
                .map(move |i| EntranceSegment {
                    edge,
                    start: i,
                    end: i,
                })
                .coalesce(|a, b| {
                    if b.start == a.end + 1 {
                        Ok(EntranceSegment { end: b.end, ..a })
                    } else {
                        Err((a, b))
                    }
                })
        })
        .collect()
}

/// Merge same-edge segments separated by at most `gap_tolerance` blocked tiles.
pub fn consolidate(segments: &[EntranceSegment], gap_tolerance: u8) -> Vec<EntranceSegment> {
    segments
        .iter()
        .copied()
        .coalesce(|a, b| {
            let gap = b.start.saturating_sub(a.end).saturating_sub(1);
            if a.edge == b.edge && gap <= gap_tolerance {
                Ok(EntranceSegment { end: b.end, ..a })
            } else {
                Err((a, b))
            }
        })
        .collect()
}

/// Fortification tiles for every entrance, plus the tiles that could not be
/// placed anywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SealPlan {
    pub tiles: Vec<(Location, BuildingKind)>,
    pub unsealable: Vec<(Edge, Location)>,
}

impl SealPlan {
    /// Kind already emitted on `loc` by an earlier entrance group.
    fn emitted(&self, loc: Location) -> Option<BuildingKind> {
        self.tiles
            .iter()
            .find(|(tile, _)| *tile == loc)
            .map(|(_, kind)| *kind)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Unbuildable {
    OutOfBounds,
    Terrain,
    Occupied,
}

pub struct EntranceSealer<'a> {
    config: &'a SealConfig,
}

impl<'a> EntranceSealer<'a> {
    pub fn new(config: &'a SealConfig) -> Self {
        EntranceSealer { config }
    }

    /// Seal plan against raw terrain only.
    pub fn seal_plan(&self, terrain: &SiteTerrain) -> SealPlan {
        self.compute_seal_plan(terrain, &|_, _| false)
    }

    /// `is_blocked` reports tiles that cannot take the given kind for reasons
    /// other than bounds and terrain (planned or built structures).
    pub fn compute_seal_plan(
        &self,
        terrain: &SiteTerrain,
        is_blocked: &dyn Fn(Location, BuildingKind) -> bool,
    ) -> SealPlan {
        let segments = find_segments(terrain);
        let groups = consolidate(&segments, self.config.gap_tolerance);

        debug!(
            "Entrance scan: {} segments in {} groups",
            segments.len(),
            groups.len()
        );

        let mut plan = SealPlan::default();

        for group in groups.iter().filter(|g| g.width() > 1) {
            match self.config.policy {
                SealPolicy::Bookend => self.bookend(group, terrain, is_blocked, &mut plan),
                SealPolicy::Curtain => self.curtain(group, terrain, is_blocked, &mut plan),
            }
        }

        plan.tiles = plan.tiles.into_iter().unique().collect();
        plan
    }

    fn check(
        &self,
        loc: Option<Location>,
        kind: BuildingKind,
        terrain: &SiteTerrain,
        is_blocked: &dyn Fn(Location, BuildingKind) -> bool,
    ) -> Result<Location, Unbuildable> {
        let loc = match loc {
            Some(loc) if loc.is_inset(self.config.inset) => loc,
            _ => return Err(Unbuildable::OutOfBounds),
        };
        if terrain.is_wall_at(loc) {
            Err(Unbuildable::Terrain)
        } else if is_blocked(loc, kind) {
            Err(Unbuildable::Occupied)
        } else {
            Ok(loc)
        }
    }

    /// Report location for a tile that may lie off the site.
    fn clamped(edge: Edge, index: i16, depth: u8) -> Location {
        let index = index.clamp(0, SITE_WIDTH as i16 - 1);
        edge.project(index, depth)
            .unwrap_or_else(|| Location::from_xy(0, 0))
    }

    fn bookend(
        &self,
        group: &EntranceSegment,
        terrain: &SiteTerrain,
        is_blocked: &dyn Fn(Location, BuildingKind) -> bool,
        plan: &mut SealPlan,
    ) {
        let overhang = self.config.overhang as i16;
        let ends = [group.start as i16 - overhang, group.end as i16 + overhang];

        for index in ends {
            let mut reasons = Vec::new();
            let mut placed = false;

            for depth in 1..=self.config.max_depth.max(1) {
                let at = group.edge.project(index, depth);
                match self.check(at, BuildingKind::Wall, terrain, is_blocked) {
                    Ok(loc) => {
                        plan.tiles.push((loc, BuildingKind::Wall));
                        placed = true;
                        break;
                    }
                    Err(reason) => reasons.push(reason),
                }
            }

            if !placed && !reasons.contains(&Unbuildable::Terrain) {
                plan.unsealable.push((group.edge, Self::clamped(group.edge, index, 1)));
            }
        }
    }

    fn curtain(
        &self,
        group: &EntranceSegment,
        terrain: &SiteTerrain,
        is_blocked: &dyn Fn(Location, BuildingKind) -> bool,
        plan: &mut SealPlan,
    ) {
        let overhang = self.config.overhang as i16;
        let depth = self.config.curtain_depth;
        let first = group.start as i16 - overhang;
        let last = group.end as i16 + overhang;
        let midpoint = (group.start as i16 + group.end as i16) / 2;

        let at = |i: i16| group.edge.project(i, depth);

        // A line crossing another group's gate shares it; otherwise the gate
        // avoids tiles another group already walled.
        let shared_gate = (first..=last)
            .find(|&i| at(i).map_or(false, |loc| plan.emitted(loc) == Some(BuildingKind::Gate)));
        let gate = shared_gate.or_else(|| {
            (first..=last)
                .filter(|&i| match self.check(at(i), BuildingKind::Gate, terrain, is_blocked) {
                    Ok(loc) => plan.emitted(loc) != Some(BuildingKind::Wall),
                    Err(_) => false,
                })
                .min_by_key(|&i| ((i - midpoint).abs(), i))
        });

        if gate.is_none() {
            plan.unsealable
                .push((group.edge, Self::clamped(group.edge, midpoint, depth)));
        }

        for index in first..=last {
            let kind = if Some(index) == gate {
                BuildingKind::Gate
            } else {
                BuildingKind::Wall
            };
            match self.check(at(index), kind, terrain, is_blocked) {
                Ok(loc)
                    if kind == BuildingKind::Wall
                        && plan.emitted(loc) == Some(BuildingKind::Gate) => {}
                Ok(loc) => plan.tiles.push((loc, kind)),
                Err(Unbuildable::Terrain) => {}
                Err(_) => plan
                    .unsealable
                    .push((group.edge, Self::clamped(group.edge, index, depth))),
            }
        }
    }
}

/// Folds the seal plan into the site plan as single-tile stamps.
pub struct EntranceSealLayer;

impl PlanningLayer for EntranceSealLayer {
    fn name(&self) -> &str {
        "entrance_seal"
    }

    fn requires_anchor(&self, config: &PlannerConfig) -> bool {
        !config.seal.run_without_anchor
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome {
        let config = &context.config.seal;
        let placer = context.placer.with_inset(config.inset);

        let seal_plan = {
            let plan: &Plan = context.plan;
            EntranceSealer::new(config).compute_seal_plan(context.terrain(), &|loc, kind| {
                !placer.check_tile(plan, Some(loc), kind).is_satisfied()
            })
        };

        for (edge, target) in seal_plan.unsealable {
            context.warn(PlanningWarning::UnsealableEntrance { edge, target });
        }

        for (loc, kind) in seal_plan.tiles {
            context.report += placer.place_single(
                context.plan,
                "entrance_seal",
                loc,
                kind,
                TierRule::Auto,
                Some(StructureRole::EntranceSeal),
            );
        }

        LayerOutcome::Continue
    }
}
