pub const SITE_WIDTH: u8 = 50;
pub const SITE_HEIGHT: u8 = 50;

/// Highest unlockable tier.
pub const MAX_TIER: u8 = 8;

/// Ticks a spawned worker lives before it must be replaced.
pub const WORKER_LIFETIME: u32 = 1500;

/// Hard cap on the number of parts in a single worker body.
pub const MAX_BODY_PARTS: usize = 50;

pub const WORK_PART_COST: u32 = 100;
pub const CARRY_PART_COST: u32 = 50;
pub const MOVE_PART_COST: u32 = 50;

/// Tier of every node and controller container, however many the site needs.
pub const INFRA_CONTAINER_TIER: u8 = 1;

use crate::plan::BuildingKind;

/// Maximum number of a given building kind allowed at a given tier.
/// Returns 0 if the kind is not available at that tier.
///
/// Note: Road has no per-tier limit. Wall and Gate share the same limits.
pub fn max_structures_at_tier(kind: BuildingKind, tier: u8) -> u32 {
    match kind {
        BuildingKind::Spawn => match tier {
            0 => 0,
            1..=6 => 1,
            7 => 2,
            _ => 3,
        },
        BuildingKind::Extension => match tier {
            0 | 1 => 0,
            2 => 5,
            3 => 10,
            4 => 20,
            5 => 30,
            6 => 40,
            7 => 50,
            _ => 60,
        },
        BuildingKind::Link => match tier {
            0..=4 => 0,
            5 => 2,
            6 => 3,
            7 => 4,
            _ => 6,
        },
        BuildingKind::Storage => match tier {
            0..=3 => 0,
            _ => 1,
        },
        BuildingKind::Terminal => match tier {
            0..=5 => 0,
            _ => 1,
        },
        BuildingKind::Tower => match tier {
            0..=2 => 0,
            3..=4 => 1,
            5..=6 => 2,
            7 => 3,
            _ => 6,
        },
        BuildingKind::Container => 5,
        BuildingKind::Gate | BuildingKind::Wall => match tier {
            0 | 1 => 0,
            _ => 2500,
        },
        BuildingKind::Road => 2500,
    }
}

/// Return the minimum tier at which the Nth building of a given kind can be built.
/// `count` is 1-based (the 1st building, the 2nd building, etc.).
/// Returns 0 for a count of 0 and `MAX_TIER + 1` if the count can never be reached.
pub fn min_tier_for_nth(kind: BuildingKind, count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    for tier in 1..=MAX_TIER {
        if max_structures_at_tier(kind, tier) >= count {
            return tier;
        }
    }
    MAX_TIER + 1
}

/// Energy capacity the site reaches at each tier once all extensions are built.
/// Worker bodies are sized against these breakpoints.
pub fn tier_energy_capacity(tier: u8) -> u32 {
    match tier {
        0 | 1 => 300,
        2 => 550,
        3 => 800,
        4 => 1300,
        5 => 1800,
        6 => 2300,
        7 => 5600,
        _ => 12900,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_extension_unlocks_with_tier_table() {
        assert_eq!(min_tier_for_nth(BuildingKind::Extension, 1), 2);
        assert_eq!(min_tier_for_nth(BuildingKind::Extension, 5), 2);
        assert_eq!(min_tier_for_nth(BuildingKind::Extension, 6), 3);
        assert_eq!(min_tier_for_nth(BuildingKind::Extension, 60), 8);
        assert_eq!(min_tier_for_nth(BuildingKind::Extension, 61), MAX_TIER + 1);
    }

    #[test]
    fn roads_are_always_available() {
        assert_eq!(min_tier_for_nth(BuildingKind::Road, 400), 1);
        assert_eq!(min_tier_for_nth(BuildingKind::Road, 0), 0);
    }

    #[test]
    fn energy_breakpoints_never_shrink() {
        for tier in 1..=MAX_TIER {
            assert!(tier_energy_capacity(tier) >= tier_energy_capacity(tier - 1));
        }
    }
}
