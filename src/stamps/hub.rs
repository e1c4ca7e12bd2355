use super::*;

/// Core cluster stamp, centred on the base anchor.
///
/// ```text
///   r r r r r
///   r T L r r
///   r S H M r
///   r S O T r
///   r r r r r
/// ```
///
/// H = hub road (the filler stands here), S = spawn, O = storage,
/// M = terminal, L = link, T = tower, r = ring road.
///
/// The site's first spawn already exists, so the stamp only carries the
/// spawns unlocked at later tiers.
pub fn hub_stamp() -> Stamp {
    let mut placements = vec![
        sp(BuildingKind::Storage, 0, 1, 4),
        sp(BuildingKind::Terminal, 1, 0, 6),
        sp(BuildingKind::Link, 0, -1, 5),
        sp(BuildingKind::Spawn, -1, 0, 7),
        sp(BuildingKind::Spawn, -1, 1, 8),
        sp_auto(BuildingKind::Tower, 1, 1),
        sp_auto(BuildingKind::Tower, -1, -1),
        sp_auto(BuildingKind::Road, 0, 0),
        sp_opt_auto(BuildingKind::Road, 1, -1),
    ];

    // Ring roads are best-effort in constrained terrain.
    for d in -2..=2i8 {
        placements.push(sp_opt_auto(BuildingKind::Road, d, -2));
        placements.push(sp_opt_auto(BuildingKind::Road, d, 2));
    }
    for d in -1..=1i8 {
        placements.push(sp_opt_auto(BuildingKind::Road, -2, d));
        placements.push(sp_opt_auto(BuildingKind::Road, 2, d));
    }

    Stamp::new("hub", placements, 2)
}
