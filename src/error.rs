use crate::layers::entrance::Edge;
use crate::location::Location;
use crate::throughput::WorkerRole;
use thiserror::Error;

/// Malformed terrain input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerrainError {
    #[error("terrain buffer has {actual} tiles, expected {expected}")]
    InvalidSize { expected: usize, actual: usize },
    #[error("terrain has {actual} rows, expected {expected}")]
    InvalidRowCount { expected: usize, actual: usize },
    #[error("terrain row {row} has {actual} tiles, expected {expected}")]
    InvalidRowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Non-fatal conditions raised while planning. None of these abort the agent;
/// only `NoAnchorFound` stops the remainder of a pass.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlanningWarning {
    #[error("no tile has wall distance >= {min_wall_distance}; planning deferred")]
    NoAnchorFound { min_wall_distance: u8 },
    #[error("site has no controller")]
    MissingController,
    #[error("site has no spawn")]
    MissingSpawn,
    #[error("no free container tile next to {target}")]
    NoContainerSite { target: Location },
    #[error("cluster {name} found no placeable anchor")]
    ClusterUnplaced { name: &'static str },
    #[error("no route from {from} to {to}")]
    PathUnreachable { from: Location, to: Location },
    #[error("entrance on {edge:?} edge cannot be fortified near {target}")]
    UnsealableEntrance { edge: Edge, target: Location },
    #[error("{role:?} body does not fit in {energy} energy")]
    InfeasibleBodyComposition { role: WorkerRole, energy: u32 },
}
