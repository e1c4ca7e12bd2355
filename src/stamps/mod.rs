pub mod extension;
pub mod hub;
pub mod tower;

pub use extension::extension_field_stamp;
pub use hub::hub_stamp;
pub use tower::tower_cluster_stamp;

use crate::location::Location;
use crate::plan::BuildingKind;

/// How a placement's required tier is decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TierRule {
    Fixed(u8),
    /// The tier that first allows one more building of this kind than the
    /// plan already holds.
    Auto,
}

/// A placement within a stamp: building kind at a relative offset from the stamp anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StampPlacement {
    pub kind: BuildingKind,
    pub dx: i8,
    pub dy: i8,
    pub tier: TierRule,
    /// If true, this placement must fit for the stamp to be considered placeable.
    /// If false, the placement is best-effort and will be skipped if blocked.
    pub required: bool,
}

/// A stamp is a fixed arrangement of buildings relative to an anchor point.
///
/// Non-road placements always come before roads so a road never claims a
/// tile before the building that needs it has been tried.
#[derive(Clone, Debug)]
pub struct Stamp {
    pub name: &'static str,
    placements: Vec<StampPlacement>,
    /// Minimum wall distance required at the anchor for this stamp to fit.
    pub min_radius: u8,
}

impl Stamp {
    pub fn new(name: &'static str, mut placements: Vec<StampPlacement>, min_radius: u8) -> Stamp {
        placements.sort_by_key(|p| p.kind.is_road());
        Stamp {
            name,
            placements,
            min_radius,
        }
    }

    /// One-offset stamp, used for containers and fortification tiles.
    pub fn single(name: &'static str, kind: BuildingKind, tier: TierRule) -> Stamp {
        Stamp::new(
            name,
            vec![StampPlacement {
                kind,
                dx: 0,
                dy: 0,
                tier,
                required: true,
            }],
            0,
        )
    }

    pub fn placements(&self) -> &[StampPlacement] {
        &self.placements
    }

    /// Absolute location of a placement, or `None` if it falls off the site.
    pub fn resolve(&self, placement: &StampPlacement, anchor: Location) -> Option<Location> {
        anchor.checked_add(placement.dx, placement.dy)
    }

    /// Validate that the stamp meets basic structural requirements:
    /// - At least one required placement exists.
    /// - No duplicate (dx, dy) positions for non-road buildings.
    /// - All required placements are within min_radius of the origin.
    pub fn validate(&self) -> bool {
        if !self.placements.iter().any(|p| p.required) {
            return false;
        }

        let mut seen = std::collections::HashSet::new();
        for p in &self.placements {
            if !p.kind.is_road() && !seen.insert((p.dx, p.dy)) {
                return false;
            }
        }

        self.placements
            .iter()
            .filter(|p| p.required)
            .all(|p| p.dx.unsigned_abs().max(p.dy.unsigned_abs()) <= self.min_radius)
    }

    /// Rotate the stamp 90 degrees clockwise.
    pub fn rotated_cw(&self) -> Stamp {
        Stamp::new(
            self.name,
            self.placements
                .iter()
                .map(|p| StampPlacement {
                    dx: -p.dy,
                    dy: p.dx,
                    ..p.clone()
                })
                .collect(),
            self.min_radius,
        )
    }

    /// Get all 4 rotations of this stamp.
    pub fn all_rotations(&self) -> Vec<Stamp> {
        let r0 = self.clone();
        let r1 = r0.rotated_cw();
        let r2 = r1.rotated_cw();
        let r3 = r2.rotated_cw();
        vec![r0, r1, r2, r3]
    }
}

/// Helper to create a required StampPlacement.
pub fn sp(kind: BuildingKind, dx: i8, dy: i8, tier: u8) -> StampPlacement {
    StampPlacement {
        kind,
        dx,
        dy,
        tier: TierRule::Fixed(tier),
        required: true,
    }
}

/// Helper to create a required StampPlacement with automatic tier assignment.
pub fn sp_auto(kind: BuildingKind, dx: i8, dy: i8) -> StampPlacement {
    StampPlacement {
        kind,
        dx,
        dy,
        tier: TierRule::Auto,
        required: true,
    }
}

/// Helper to create an optional StampPlacement with automatic tier assignment.
pub fn sp_opt_auto(kind: BuildingKind, dx: i8, dy: i8) -> StampPlacement {
    StampPlacement {
        kind,
        dx,
        dy,
        tier: TierRule::Auto,
        required: false,
    }
}
