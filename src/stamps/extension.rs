use super::*;

/// 4x4 extension field: 12 extensions + 4 corner roads + border roads.
///
/// ```text
///     r r
///   R E E R
/// r E A E E r
/// r E E E E r
///   R E E R
///     r r
/// ```
///
/// A = stamp anchor (an extension), R = corner road (required),
/// E = extension (required), r = border road (optional).
/// The shape is a 4x4 block with corners replaced by roads; creeps on
/// corner or border roads reach every extension diagonally.
pub fn extension_field_stamp() -> Stamp {
    let mut placements = vec![
        sp_auto(BuildingKind::Road, -1, -1),
        sp_auto(BuildingKind::Road, 2, -1),
        sp_auto(BuildingKind::Road, -1, 2),
        sp_auto(BuildingKind::Road, 2, 2),
    ];

    for dy in -1..=2i8 {
        for dx in -1..=2i8 {
            let corner = (dx == -1 || dx == 2) && (dy == -1 || dy == 2);
            if !corner {
                placements.push(sp_auto(BuildingKind::Extension, dx, dy));
            }
        }
    }

    placements.extend([
        sp_opt_auto(BuildingKind::Road, 0, -2),
        sp_opt_auto(BuildingKind::Road, 1, -2),
        sp_opt_auto(BuildingKind::Road, 0, 3),
        sp_opt_auto(BuildingKind::Road, 1, 3),
        sp_opt_auto(BuildingKind::Road, -2, 0),
        sp_opt_auto(BuildingKind::Road, -2, 1),
        sp_opt_auto(BuildingKind::Road, 3, 0),
        sp_opt_auto(BuildingKind::Road, 3, 1),
    ]);

    Stamp::new("extension_field", placements, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_holds_twelve_extensions() {
        let stamp = extension_field_stamp();
        let extensions = stamp
            .placements()
            .iter()
            .filter(|p| p.kind == BuildingKind::Extension)
            .count();
        assert_eq!(extensions, 12);
    }
}
