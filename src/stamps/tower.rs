use super::*;

/// Tower cluster: four towers around a service road.
///
/// ```text
/// T r T
/// r R r
/// T r T
/// ```
pub fn tower_cluster_stamp() -> Stamp {
    Stamp::new(
        "tower_cluster",
        vec![
            sp_auto(BuildingKind::Tower, -1, -1),
            sp_auto(BuildingKind::Tower, 1, -1),
            sp_auto(BuildingKind::Tower, -1, 1),
            sp_auto(BuildingKind::Tower, 1, 1),
            sp_auto(BuildingKind::Road, 0, 0),
            sp_opt_auto(BuildingKind::Road, 0, -1),
            sp_opt_auto(BuildingKind::Road, 0, 1),
            sp_opt_auto(BuildingKind::Road, -1, 0),
            sp_opt_auto(BuildingKind::Road, 1, 0),
        ],
        1,
    )
}
