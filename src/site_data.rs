use crate::location::*;
use crate::plan::BuildingKind;
use crate::terrain::*;
use fnv::FnvHashMap;

/// Trait for providing site data to the planner.
/// Implementations exist for both the live agent and offline tests.
pub trait SiteDataSource {
    fn get_terrain(&self) -> &SiteTerrain;
    fn get_controller(&self) -> Option<Location>;
    fn get_spawns(&self) -> &[Location];
    fn get_resource_nodes(&self) -> &[Location];

    /// Tiles nothing may be planned on or routed across: resource nodes and
    /// the controller.
    fn reserved_tiles(&self) -> Vec<Location> {
        self.get_resource_nodes()
            .iter()
            .copied()
            .chain(self.get_controller())
            .collect()
    }
}

/// A lightweight description of a building that already exists on the site,
/// or of a construction marker waiting to be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExistingStructure {
    pub location: Location,
    pub kind: BuildingKind,
    pub under_construction: bool,
}

impl ExistingStructure {
    pub fn built(location: Location, kind: BuildingKind) -> Self {
        ExistingStructure {
            location,
            kind,
            under_construction: false,
        }
    }

    pub fn marker(location: Location, kind: BuildingKind) -> Self {
        ExistingStructure {
            location,
            kind,
            under_construction: true,
        }
    }
}

/// Read-only view of what is already on the site.
pub trait InventoryQuery {
    fn structures(&self) -> &[ExistingStructure];

    fn structures_at(&self, loc: Location) -> Vec<&ExistingStructure> {
        self.structures()
            .iter()
            .filter(|s| s.location == loc)
            .collect()
    }
}

/// Site data held in memory, for offline use and tests.
#[derive(Clone)]
pub struct StaticSiteData {
    pub terrain: SiteTerrain,
    pub controller: Option<Location>,
    pub spawns: Vec<Location>,
    pub resource_nodes: Vec<Location>,
}

impl StaticSiteData {
    pub fn new(terrain: SiteTerrain) -> Self {
        StaticSiteData {
            terrain,
            controller: None,
            spawns: Vec::new(),
            resource_nodes: Vec::new(),
        }
    }

    pub fn with_controller(mut self, controller: Location) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_spawn(mut self, spawn: Location) -> Self {
        self.spawns.push(spawn);
        self
    }

    pub fn with_resource_node(mut self, node: Location) -> Self {
        self.resource_nodes.push(node);
        self
    }
}

impl SiteDataSource for StaticSiteData {
    fn get_terrain(&self) -> &SiteTerrain {
        &self.terrain
    }

    fn get_controller(&self) -> Option<Location> {
        self.controller
    }

    fn get_spawns(&self) -> &[Location] {
        &self.spawns
    }

    fn get_resource_nodes(&self) -> &[Location] {
        &self.resource_nodes
    }
}

/// Inventory snapshot with a per-tile index.
#[derive(Clone, Debug, Default)]
pub struct StaticInventory {
    structures: Vec<ExistingStructure>,
    by_location: FnvHashMap<Location, Vec<usize>>,
}

impl StaticInventory {
    pub fn new(structures: Vec<ExistingStructure>) -> Self {
        let mut by_location: FnvHashMap<Location, Vec<usize>> = FnvHashMap::default();
        for (i, s) in structures.iter().enumerate() {
            by_location.entry(s.location).or_default().push(i);
        }
        StaticInventory {
            structures,
            by_location,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl InventoryQuery for StaticInventory {
    fn structures(&self) -> &[ExistingStructure] {
        &self.structures
    }

    fn structures_at(&self, loc: Location) -> Vec<&ExistingStructure> {
        self.by_location
            .get(&loc)
            .map(|ids| ids.iter().map(|&i| &self.structures[i]).collect())
            .unwrap_or_default()
    }
}
