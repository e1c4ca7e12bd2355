pub mod config;
pub mod constants;
pub mod error;
pub mod layer;
pub mod layers;
pub mod location;
pub mod pathing;
pub mod placer;
pub mod plan;
pub mod planner;
pub mod site_data;
pub mod stamps;
pub mod store;
pub mod terrain;
pub mod throughput;

#[cfg(test)]
mod test_support;

pub use config::PlannerConfig;
pub use error::{PlanningWarning, TerrainError};
pub use location::Location;
pub use plan::{BuildingKind, Plan, PlannedStructure, StructureRole};
pub use planner::{PassSummary, PlannerBuilder, SitePlanner};
pub use site_data::{ExistingStructure, InventoryQuery, SiteDataSource};
pub use store::{MemoryPlanStore, PlanStore, SiteId};
pub use terrain::{SiteTerrain, TerrainKind};
pub use throughput::{PopulationTargets, ThroughputProfile, WorkerRole};
