pub mod anchor;
pub mod cluster;
pub mod controller_infra;
pub mod entrance;
pub mod road_network;
pub mod source_infra;
pub mod stamp_layer;

pub use anchor::AnchorLayer;
pub use cluster::{extension_cluster_layer, tower_cluster_layer, ClusterLayer};
pub use controller_infra::ControllerInfraLayer;
pub use entrance::{EntranceSealLayer, EntranceSealer};
pub use road_network::RoadNetworkLayer;
pub use source_infra::SourceInfraLayer;
pub use stamp_layer::{hub_stamp_layer, StampLayer};

use crate::config::PlannerConfig;
use crate::layer::PlanningLayer;

/// Build the default layer stack.
///
/// 1. AnchorLayer -- distance transform and anchor, sets "anchor" landmark
/// 2. hub_stamp_layer -- core cluster at "anchor"
/// 3. SourceInfraLayer -- one tagged container per resource node
/// 4. ControllerInfraLayer -- tagged controller container
/// 5. extension_cluster_layer -- extension fields, ring search
/// 6. tower_cluster_layer -- tower clusters, ring search
/// 7. RoadNetworkLayer -- spawn to nodes, controller and clusters
/// 8. EntranceSealLayer -- border fortification
pub fn default_layers(config: &PlannerConfig) -> Vec<Box<dyn PlanningLayer>> {
    vec![
        Box::new(AnchorLayer),
        Box::new(hub_stamp_layer()),
        Box::new(SourceInfraLayer),
        Box::new(ControllerInfraLayer),
        Box::new(extension_cluster_layer(config.placement.extension_fields)),
        Box::new(tower_cluster_layer(config.placement.tower_clusters)),
        Box::new(RoadNetworkLayer),
        Box::new(EntranceSealLayer),
    ]
}
