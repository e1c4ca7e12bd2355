//! Core types for the planning pass.
//!
//! `PassContext` is the state threaded through one planning pass: the shared
//! plan, named landmarks, counters and warnings. `PlanningLayer` is the trait
//! each step of the pass implements.

use crate::config::PlannerConfig;
use crate::error::PlanningWarning;
use crate::location::*;
use crate::pathing::PathFinder;
use crate::placer::{PlacementReport, StampPlacer};
use crate::plan::Plan;
use crate::site_data::SiteDataSource;
use crate::terrain::*;
use fnv::FnvHashMap;
use log::*;

pub struct PassContext<'a> {
    pub site: &'a dyn SiteDataSource,
    pub config: &'a PlannerConfig,
    pub placer: StampPlacer<'a>,
    pub pathfinder: &'a dyn PathFinder,
    pub plan: &'a mut Plan,
    /// Distance matrix, available once the anchor layer has run.
    pub dist_transform: Option<SiteDataArray<u8>>,
    /// Named locations for cross-layer reference (e.g. "anchor").
    landmarks: FnvHashMap<&'static str, Location>,
    /// Named location sets (e.g. "clusters").
    landmark_sets: FnvHashMap<&'static str, Vec<Location>>,
    pub report: PlacementReport,
    pub warnings: Vec<PlanningWarning>,
}

impl<'a> PassContext<'a> {
    pub fn new(
        site: &'a dyn SiteDataSource,
        config: &'a PlannerConfig,
        placer: StampPlacer<'a>,
        pathfinder: &'a dyn PathFinder,
        plan: &'a mut Plan,
    ) -> Self {
        PassContext {
            site,
            config,
            placer,
            pathfinder,
            plan,
            dist_transform: None,
            landmarks: FnvHashMap::default(),
            landmark_sets: FnvHashMap::default(),
            report: PlacementReport::default(),
            warnings: Vec::new(),
        }
    }

    pub fn terrain(&self) -> &'a SiteTerrain {
        self.site.get_terrain()
    }

    /// Set a named landmark location.
    pub fn set_landmark(&mut self, name: &'static str, loc: Location) {
        self.landmarks.insert(name, loc);
    }

    /// Get a named landmark location.
    pub fn get_landmark(&self, name: &str) -> Option<Location> {
        self.landmarks.get(name).copied()
    }

    /// Add a location to a named landmark set.
    pub fn add_to_landmark_set(&mut self, name: &'static str, loc: Location) {
        self.landmark_sets.entry(name).or_default().push(loc);
    }

    /// Get a named landmark set.
    pub fn get_landmark_set(&self, name: &str) -> &[Location] {
        self.landmark_sets
            .get(name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn warn(&mut self, warning: PlanningWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Whether the pass may continue past a layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerOutcome {
    Continue,
    /// Skip every remaining layer that needs the anchor.
    Halt,
}

/// One step of the planning pass.
///
/// Layers are stateless -- all mutable state lives in `PassContext`.
pub trait PlanningLayer {
    /// Human-readable name for debugging/profiling.
    fn name(&self) -> &str;

    /// Layers that read the anchor are skipped once a layer halts.
    fn requires_anchor(&self, _config: &PlannerConfig) -> bool {
        true
    }

    fn apply(&self, context: &mut PassContext) -> LayerOutcome;
}
