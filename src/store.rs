//! Plan persistence seam. The host decides where plans live; the planner only
//! needs to read and append to one site's plan at a time.

use crate::plan::Plan;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Identifier of one independently planned site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub String);

impl From<&str> for SiteId {
    fn from(name: &str) -> Self {
        SiteId(name.to_string())
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait PlanStore {
    fn get(&self, site: &SiteId) -> Option<&Plan>;

    /// Mutable access to a site's plan, creating an empty one on first use.
    fn get_or_create(&mut self, site: &SiteId) -> &mut Plan;
}

/// Plans held in memory, keyed by site.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryPlanStore {
    plans: FnvHashMap<SiteId, Plan>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanStore for MemoryPlanStore {
    fn get(&self, site: &SiteId) -> Option<&Plan> {
        self.plans.get(site)
    }

    fn get_or_create(&mut self, site: &SiteId) -> &mut Plan {
        self.plans.entry(site.clone()).or_default()
    }
}
