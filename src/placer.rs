//! Stamp placement against the shared plan.
//!
//! Every offset is validated on its own: bounds inset, terrain, planned
//! entries and buildings that already exist. Offsets that fail are skipped and
//! counted; the rest of the stamp is still placed.

use crate::constants::*;
use crate::location::*;
use crate::plan::*;
use crate::site_data::InventoryQuery;
use crate::stamps::{Stamp, TierRule};
use crate::terrain::*;
use log::*;

/// Why a single tile was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockReason {
    OutOfBounds,
    Terrain,
    /// Resource node or controller tile.
    Reserved,
    Planned(BuildingKind),
    Built(BuildingKind),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileCheck {
    Place,
    Duplicate,
    Blocked(BlockReason),
}

impl TileCheck {
    /// True if the tile ends up holding the requested kind.
    pub fn is_satisfied(self) -> bool {
        matches!(self, TileCheck::Place | TileCheck::Duplicate)
    }
}

/// Counts from one or more placements.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub added: usize,
    pub duplicates: usize,
    pub conflicts: usize,
}

impl PlacementReport {
    fn record(&mut self, check: TileCheck) {
        match check {
            TileCheck::Place => self.added += 1,
            TileCheck::Duplicate => self.duplicates += 1,
            TileCheck::Blocked(_) => self.conflicts += 1,
        }
    }
}

impl std::ops::AddAssign for PlacementReport {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.duplicates += other.duplicates;
        self.conflicts += other.conflicts;
    }
}

pub struct StampPlacer<'a> {
    terrain: &'a SiteTerrain,
    inventory: &'a dyn InventoryQuery,
    inset: u8,
    reserved: &'a [Location],
}

impl<'a> StampPlacer<'a> {
    pub fn new(terrain: &'a SiteTerrain, inventory: &'a dyn InventoryQuery, inset: u8) -> Self {
        StampPlacer {
            terrain,
            inventory,
            inset,
            reserved: &[],
        }
    }

    /// Refuse every kind on `reserved` tiles.
    pub fn with_reserved(mut self, reserved: &'a [Location]) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn reserved(&self) -> &'a [Location] {
        self.reserved
    }

    /// Same terrain and inventory, different border inset.
    pub fn with_inset(&self, inset: u8) -> StampPlacer<'a> {
        StampPlacer {
            terrain: self.terrain,
            inventory: self.inventory,
            inset,
            reserved: self.reserved,
        }
    }

    pub fn check_tile(&self, plan: &Plan, loc: Option<Location>, kind: BuildingKind) -> TileCheck {
        let loc = match loc {
            Some(loc) if loc.is_inset(self.inset) => loc,
            _ => return TileCheck::Blocked(BlockReason::OutOfBounds),
        };

        if self.terrain.is_wall_at(loc) {
            return TileCheck::Blocked(BlockReason::Terrain);
        }

        if self.reserved.contains(&loc) {
            return TileCheck::Blocked(BlockReason::Reserved);
        }

        match plan.check(loc, kind) {
            InsertOutcome::Duplicate => return TileCheck::Duplicate,
            InsertOutcome::Conflict(existing) => {
                return TileCheck::Blocked(BlockReason::Planned(existing))
            }
            InsertOutcome::Added => {}
        }

        // Roads go under anything; buildings only clash with other buildings.
        if !kind.is_road() {
            let built = self
                .inventory
                .structures_at(loc)
                .into_iter()
                .map(|s| s.kind)
                .find(|k| !k.is_road() && *k != kind);
            if let Some(built) = built {
                return TileCheck::Blocked(BlockReason::Built(built));
            }
        }

        TileCheck::Place
    }

    /// True if every required placement of the stamp would hold at `anchor`.
    pub fn can_place(&self, plan: &Plan, stamp: &Stamp, anchor: Location) -> bool {
        stamp
            .placements()
            .iter()
            .filter(|p| p.required)
            .all(|p| {
                self.check_tile(plan, stamp.resolve(p, anchor), p.kind)
                    .is_satisfied()
            })
    }

    pub fn place(&self, plan: &mut Plan, stamp: &Stamp, anchor: Location) -> PlacementReport {
        self.place_with_role(plan, stamp, anchor, None)
    }

    /// Place every offset that validates, tagging new entries with `role`.
    pub fn place_with_role(
        &self,
        plan: &mut Plan,
        stamp: &Stamp,
        anchor: Location,
        role: Option<StructureRole>,
    ) -> PlacementReport {
        let mut report = PlacementReport::default();

        for placement in stamp.placements() {
            let loc = stamp.resolve(placement, anchor);
            let check = self.check_tile(plan, loc, placement.kind);
            report.record(check);

            if let (TileCheck::Place, Some(loc)) = (check, loc) {
                let tier = match placement.tier {
                    TierRule::Fixed(tier) => tier,
                    TierRule::Auto => {
                        min_tier_for_nth(placement.kind, plan.count(placement.kind) + 1)
                    }
                };
                let mut entry = PlannedStructure::new(loc, placement.kind, tier);
                entry.role = role;
                plan.insert(entry);
            } else if let TileCheck::Blocked(reason) = check {
                trace!(
                    "{}: {:?} at offset ({}, {}) blocked: {:?}",
                    stamp.name,
                    placement.kind,
                    placement.dx,
                    placement.dy,
                    reason
                );
            }
        }

        debug!(
            "Placed stamp {} at {}: {} added, {} duplicate, {} blocked",
            stamp.name, anchor, report.added, report.duplicates, report.conflicts
        );

        report
    }

    /// Place a single building through the one-offset stamp path.
    pub fn place_single(
        &self,
        plan: &mut Plan,
        name: &'static str,
        loc: Location,
        kind: BuildingKind,
        tier: TierRule,
        role: Option<StructureRole>,
    ) -> PlacementReport {
        self.place_with_role(plan, &Stamp::single(name, kind, tier), loc, role)
    }
}
