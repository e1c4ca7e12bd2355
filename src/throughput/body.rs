//! Worker body composition.
//!
//! Each role repeats a fixed unit of parts. The number of units is sized
//! against the energy breakpoint of the current tier, and falls back to the
//! energy actually available when the tier target is out of reach.

use super::WorkerRole;
use crate::constants::*;
use crate::error::PlanningWarning;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartKind {
    Work,
    Carry,
    Move,
}

impl PartKind {
    pub fn cost(self) -> u32 {
        match self {
            PartKind::Work => WORK_PART_COST,
            PartKind::Carry => CARRY_PART_COST,
            PartKind::Move => MOVE_PART_COST,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Body {
    parts: Vec<PartKind>,
}

impl Body {
    pub fn new(parts: Vec<PartKind>) -> Self {
        Body { parts }
    }

    pub fn parts(&self) -> &[PartKind] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn cost(&self) -> u32 {
        self.parts.iter().map(|p| p.cost()).sum()
    }

    pub fn count(&self, kind: PartKind) -> u32 {
        self.parts.iter().filter(|p| **p == kind).count() as u32
    }
}

use PartKind::*;

const HARVESTER_UNIT: &[PartKind] = &[Work, Work, Move];
const HAULER_UNIT: &[PartKind] = &[Carry, Carry, Move];
const WORKER_UNIT: &[PartKind] = &[Work, Carry, Move];

const HARVESTER_MINIMUM: &[PartKind] = &[Work, Move];
const HAULER_MINIMUM: &[PartKind] = &[Carry, Move];

const MAX_UPGRADER_UNITS: usize = 16;
const MAX_BUILDER_UNITS: usize = 8;
const MAX_HAULER_UNITS: usize = 16;

pub fn role_unit(role: WorkerRole) -> &'static [PartKind] {
    match role {
        WorkerRole::Harvester => HARVESTER_UNIT,
        WorkerRole::Hauler => HAULER_UNIT,
        WorkerRole::Upgrader | WorkerRole::Builder => WORKER_UNIT,
    }
}

fn role_minimum(role: WorkerRole) -> Option<&'static [PartKind]> {
    match role {
        WorkerRole::Harvester => Some(HARVESTER_MINIMUM),
        WorkerRole::Hauler => Some(HAULER_MINIMUM),
        WorkerRole::Upgrader | WorkerRole::Builder => None,
    }
}

/// Upper bound on repeated units for a role.
///
/// `max_extraction_work` caps harvesters; `carry_parts` (when known) caps
/// haulers at the carry capacity a round trip needs.
pub fn max_units(role: WorkerRole, max_extraction_work: usize, carry_parts: Option<u32>) -> usize {
    match role {
        WorkerRole::Harvester => ((max_extraction_work + 1) / 2).max(1),
        WorkerRole::Hauler => match carry_parts {
            Some(carry) => ((carry as usize + 1) / 2).clamp(1, MAX_HAULER_UNITS),
            None => MAX_HAULER_UNITS,
        },
        WorkerRole::Upgrader => MAX_UPGRADER_UNITS,
        WorkerRole::Builder => MAX_BUILDER_UNITS,
    }
}

/// Largest repetition of `unit` that fits in `energy`, at most `max_units`
/// times and never more than `MAX_BODY_PARTS` parts.
pub fn compose(unit: &[PartKind], energy: u32, max_units: usize) -> Body {
    let unit_cost: u32 = unit.iter().map(|p| p.cost()).sum();
    if unit.is_empty() || unit_cost == 0 {
        return Body::default();
    }

    let affordable = (energy / unit_cost) as usize;
    let by_size = MAX_BODY_PARTS / unit.len();
    let units = affordable.min(by_size).min(max_units);

    Body::new(unit.iter().copied().cycle().take(units * unit.len()).collect())
}

/// Body for `role` at `tier`, never costing more than `energy`.
///
/// Returns an empty body and a warning when not even the smallest useful
/// body is affordable.
pub fn compose_for_role(
    role: WorkerRole,
    tier: u8,
    energy: u32,
    max_units: usize,
) -> (Body, Option<PlanningWarning>) {
    let unit = role_unit(role);

    let mut body = compose(unit, tier_energy_capacity(tier), max_units);
    if body.cost() > energy {
        body = compose(unit, energy, max_units);
    }

    if body.is_empty() {
        if let Some(minimum) = role_minimum(role) {
            let minimum = Body::new(minimum.to_vec());
            if minimum.cost() <= energy {
                body = minimum;
            }
        }
    }

    if body.is_empty() {
        debug!("No affordable {:?} body in {} energy", role, energy);
        return (body, Some(PlanningWarning::InfeasibleBodyComposition { role, energy }));
    }

    (body, None)
}

/// Bodies for every role, with the roles that could not be composed.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyPlan {
    bodies: Vec<(WorkerRole, Body)>,
    warnings: Vec<PlanningWarning>,
}

impl BodyPlan {
    pub fn compose(
        tier: u8,
        energy: u32,
        max_extraction_work: usize,
        carry_parts: Option<u32>,
    ) -> BodyPlan {
        let mut bodies = Vec::with_capacity(WorkerRole::ALL.len());
        let mut warnings = Vec::new();

        for role in WorkerRole::ALL {
            let limit = max_units(role, max_extraction_work, carry_parts);
            let (body, warning) = compose_for_role(role, tier, energy, limit);
            bodies.push((role, body));
            warnings.extend(warning);
        }

        BodyPlan { bodies, warnings }
    }

    pub fn get(&self, role: WorkerRole) -> &Body {
        // Every role is composed, so the lookup always succeeds.
        self.bodies
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, body)| body)
            .unwrap_or(&EMPTY_BODY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkerRole, &Body)> {
        self.bodies.iter().map(|(role, body)| (*role, body))
    }

    pub fn warnings(&self) -> &[PlanningWarning] {
        &self.warnings
    }
}

static EMPTY_BODY: Body = Body { parts: Vec::new() };
