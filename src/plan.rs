use crate::location::*;
use crate::site_data::InventoryQuery;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Closed set of building kinds the planner can place.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildingKind {
    Spawn,
    Extension,
    Storage,
    Terminal,
    Link,
    Tower,
    Container,
    Road,
    Wall,
    Gate,
}

impl BuildingKind {
    #[inline]
    pub fn is_road(self) -> bool {
        self == BuildingKind::Road
    }
}

/// Explicit classification attached to a plan entry when its purpose is not
/// implied by its kind alone.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureRole {
    /// Container serving the resource node at this index of the site's node list.
    ResourceContainer { node: usize },
    ControllerContainer,
    /// Fortification produced by entrance sealing.
    EntranceSeal,
    /// Part of a peripheral cluster stamped at `anchor`.
    Cluster { anchor: Location },
}

/// A single structure placement in the site plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedStructure {
    #[serde(rename = "l")]
    pub location: Location,
    #[serde(rename = "k")]
    pub kind: BuildingKind,
    #[serde(rename = "t")]
    pub required_tier: u8,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StructureRole>,
}

impl PlannedStructure {
    pub fn new(location: Location, kind: BuildingKind, required_tier: u8) -> Self {
        PlannedStructure {
            location,
            kind,
            required_tier,
            role: None,
        }
    }

    pub fn with_role(mut self, role: StructureRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Result of offering an entry to the plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// The same kind is already planned on this tile.
    Duplicate,
    /// A different non-road kind is already planned on this tile.
    Conflict(BuildingKind),
}

/// The grow-only, ordered list of planned structures for one site.
///
/// Every tile holds at most one non-road entry and at most one road entry.
/// Entries are appended and never reordered.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PlannedStructure>", into = "Vec<PlannedStructure>")]
pub struct Plan {
    entries: Vec<PlannedStructure>,
    index: FnvHashMap<Location, Vec<usize>>,
}

impl From<Vec<PlannedStructure>> for Plan {
    fn from(entries: Vec<PlannedStructure>) -> Self {
        let mut plan = Plan::default();
        for entry in entries {
            plan.insert(entry);
        }
        plan
    }
}

impl From<Plan> for Vec<PlannedStructure> {
    fn from(plan: Plan) -> Self {
        plan.entries
    }
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PlannedStructure] {
        &self.entries
    }

    /// All entries planned on a tile, in insertion order.
    pub fn at(&self, loc: Location) -> impl Iterator<Item = &PlannedStructure> + '_ {
        self.index
            .get(&loc)
            .into_iter()
            .flatten()
            .map(move |&i| &self.entries[i])
    }

    pub fn has_any(&self, loc: Location) -> bool {
        self.index.contains_key(&loc)
    }

    pub fn has_road(&self, loc: Location) -> bool {
        self.at(loc).any(|e| e.kind.is_road())
    }

    /// The non-road kind planned on a tile, if any.
    pub fn non_road_at(&self, loc: Location) -> Option<BuildingKind> {
        self.at(loc).map(|e| e.kind).find(|k| !k.is_road())
    }

    pub fn contains(&self, loc: Location, kind: BuildingKind) -> bool {
        self.at(loc).any(|e| e.kind == kind)
    }

    pub fn count(&self, kind: BuildingKind) -> u32 {
        self.entries.iter().filter(|e| e.kind == kind).count() as u32
    }

    /// Get all locations of a specific building kind, in plan order.
    pub fn locations(&self, kind: BuildingKind) -> Vec<Location> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.location)
            .collect()
    }

    pub fn with_role(&self, role: StructureRole) -> Option<&PlannedStructure> {
        self.entries.iter().find(|e| e.role == Some(role))
    }

    /// Offer an entry, enforcing the per-tile invariants. Terrain and bounds are
    /// the caller's concern.
    pub fn check(&self, loc: Location, kind: BuildingKind) -> InsertOutcome {
        if self.contains(loc, kind) {
            return InsertOutcome::Duplicate;
        }
        if !kind.is_road() {
            if let Some(existing) = self.non_road_at(loc) {
                return InsertOutcome::Conflict(existing);
            }
        }
        InsertOutcome::Added
    }

    pub fn insert(&mut self, entry: PlannedStructure) -> InsertOutcome {
        let outcome = self.check(entry.location, entry.kind);
        if outcome == InsertOutcome::Added {
            self.index
                .entry(entry.location)
                .or_default()
                .push(self.entries.len());
            self.entries.push(entry);
        }
        outcome
    }

    /// Entries unlocked at `tier` that do not yet exist as a building or a
    /// construction marker, in plan order.
    pub fn pending<'a>(
        &'a self,
        tier: u8,
        inventory: &'a dyn InventoryQuery,
    ) -> impl Iterator<Item = &'a PlannedStructure> + 'a {
        self.entries.iter().filter(move |e| {
            e.required_tier <= tier
                && !inventory
                    .structures_at(e.location)
                    .iter()
                    .any(|s| s.kind == e.kind)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_data::{ExistingStructure, StaticInventory};

    fn loc(x: u8, y: u8) -> Location {
        Location::from_xy(x, y)
    }

    #[test]
    fn road_and_building_share_a_tile() {
        let mut plan = Plan::new();
        assert_eq!(
            plan.insert(PlannedStructure::new(loc(5, 5), BuildingKind::Road, 1)),
            InsertOutcome::Added
        );
        assert_eq!(
            plan.insert(PlannedStructure::new(loc(5, 5), BuildingKind::Extension, 2)),
            InsertOutcome::Added
        );
        assert_eq!(
            plan.insert(PlannedStructure::new(loc(5, 5), BuildingKind::Tower, 3)),
            InsertOutcome::Conflict(BuildingKind::Extension)
        );
        assert_eq!(plan.at(loc(5, 5)).count(), 2);
        assert_eq!(plan.non_road_at(loc(5, 5)), Some(BuildingKind::Extension));
    }

    #[test]
    fn same_kind_twice_is_a_duplicate() {
        let mut plan = Plan::new();
        plan.insert(PlannedStructure::new(loc(7, 8), BuildingKind::Road, 1));
        assert_eq!(
            plan.insert(PlannedStructure::new(loc(7, 8), BuildingKind::Road, 1)),
            InsertOutcome::Duplicate
        );
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn serialized_plan_keeps_order_and_index() {
        let mut plan = Plan::new();
        plan.insert(PlannedStructure::new(loc(3, 4), BuildingKind::Spawn, 1));
        plan.insert(
            PlannedStructure::new(loc(9, 9), BuildingKind::Container, 1)
                .with_role(StructureRole::ControllerContainer),
        );
        plan.insert(PlannedStructure::new(loc(3, 4), BuildingKind::Road, 1));

        let json = serde_json::to_string(&plan).unwrap();
        let restored: Plan = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.entries(), plan.entries());
        assert!(restored.has_road(loc(3, 4)));
        assert_eq!(
            restored
                .with_role(StructureRole::ControllerContainer)
                .map(|e| e.location),
            Some(loc(9, 9))
        );
    }

    #[test]
    fn pending_skips_locked_and_existing_entries() {
        let mut plan = Plan::new();
        plan.insert(PlannedStructure::new(loc(10, 10), BuildingKind::Spawn, 1));
        plan.insert(PlannedStructure::new(loc(11, 10), BuildingKind::Extension, 2));
        plan.insert(PlannedStructure::new(loc(12, 10), BuildingKind::Storage, 4));
        plan.insert(PlannedStructure::new(loc(13, 10), BuildingKind::Road, 1));

        let inventory = StaticInventory::new(vec![
            ExistingStructure::built(loc(10, 10), BuildingKind::Spawn),
            ExistingStructure::marker(loc(13, 10), BuildingKind::Road),
        ]);

        let pending: Vec<_> = plan.pending(2, &inventory).map(|e| e.kind).collect();
        assert_eq!(pending, vec![BuildingKind::Extension]);
    }
}
