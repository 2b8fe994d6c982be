//! A single stacking session: one pallet, one manifest, one plan.
//!
//! Sessions own all of their state, so independent sessions can run side by
//! side without sharing anything.

use crate::boundary::Pallet;
use crate::manifest::Manifest;
use crate::packer::LayerPacker;
use crate::replan::AdaptiveReplanner;
use crate::stability::{StabilityEvaluator, StabilityReport};
use ghoststack_core::geometry::Boundary;
use ghoststack_core::solver::Config;
use ghoststack_core::{
    PlacementPlan, PlanEntry, PlanSummary, PlanWarning, RejectedBox, Result,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A placement confirmation reported by the vision side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum PlacementEvent {
    /// The box landed where it was planned.
    Placed,
    /// The box landed off plan by `(dx, dz)` in the deck plane.
    SensedError {
        /// Error along the pallet width.
        dx: f64,
        /// Error along the pallet depth.
        dz: f64,
    },
}

impl PlacementEvent {
    /// Sensed error as `(dx, dz)`; zero for a bare confirmation.
    pub fn error(&self) -> (f64, f64) {
        match *self {
            Self::Placed => (0.0, 0.0),
            Self::SensedError { dx, dz } => (dx, dz),
        }
    }
}

/// Planning state for one pallet being stacked.
#[derive(Debug, Clone)]
pub struct PlanningSession {
    manifest: Manifest,
    pallet: Pallet,
    config: Config,
    plan: PlacementPlan,
    replanner: AdaptiveReplanner,
    evaluator: StabilityEvaluator,
    warnings: Vec<PlanWarning>,
}

impl PlanningSession {
    /// Validates the inputs and packs the whole manifest.
    pub fn new(manifest: Manifest, pallet: Pallet, config: Config) -> Result<Self> {
        pallet.validate()?;
        manifest.validate()?;
        let replanner = AdaptiveReplanner::new(&config)?;
        let evaluator = StabilityEvaluator::new(&config)?;

        let plan = LayerPacker::new().pack(manifest.boxes(), &pallet);
        log::debug!(
            "Session started: {} boxes on {} x {} pallet, correction {:?}",
            manifest.len(),
            pallet.width,
            pallet.depth,
            config.correction
        );

        Ok(Self {
            replanner,
            evaluator,
            manifest,
            pallet,
            config,
            plan,
            warnings: Vec::new(),
        })
    }

    /// The current plan.
    pub fn plan(&self) -> &PlacementPlan {
        &self.plan
    }

    /// The manifest snapshot this session was started with.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The pallet being stacked.
    pub fn pallet(&self) -> &Pallet {
        &self.pallet
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The entry the worker should place next.
    pub fn next_pending(&self) -> Option<(usize, &PlanEntry)> {
        let index = self.plan.next_pending()?;
        Some((index, &self.plan.entries[index]))
    }

    /// Confirms the next pending entry. Returns its index, or `None` when
    /// nothing is left to place.
    pub fn confirm_next(&mut self, event: PlacementEvent) -> Result<Option<usize>> {
        let Some(index) = self.plan.next_pending() else {
            return Ok(None);
        };
        self.confirm(index, event)?;
        Ok(Some(index))
    }

    /// Confirms entry `index` and runs one replanning pass.
    ///
    /// The actual position is the planned one shifted by the event's sensed
    /// error. Returns the warnings raised by this pass.
    pub fn confirm(&mut self, index: usize, event: PlacementEvent) -> Result<Vec<PlanWarning>> {
        let (dx, dz) = event.error();
        let entry = self.plan.entry_mut(index)?;
        let actual = entry
            .planned_position()
            .map(|p| p.offset(dx, 0.0, dz))
            .unwrap_or_default();
        entry.confirm(index, actual)?;

        let warnings =
            self.replanner
                .after_confirmation(&mut self.plan, &self.pallet, index, dx, dz);
        self.warnings.extend(warnings.iter().cloned());
        Ok(warnings)
    }

    /// Stability of the boxes confirmed so far.
    pub fn stability(&self) -> StabilityReport {
        self.evaluator
            .evaluate(&self.plan, self.manifest.boxes(), &self.pallet)
    }

    /// Boxes that could not be fit on the pallet.
    pub fn rejected(&self) -> Vec<RejectedBox> {
        self.plan.rejected()
    }

    /// Every warning raised during this session.
    pub fn warnings(&self) -> &[PlanWarning] {
        &self.warnings
    }

    /// Returns true when no entry is waiting to be placed.
    pub fn is_complete(&self) -> bool {
        self.plan.is_complete()
    }

    /// Summary of the current plan.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from(&self.plan)
    }

    /// Ends the session, consuming it and returning the plan as it stands.
    pub fn into_plan(self) -> PlacementPlan {
        self.plan
    }

    /// Abandons the session. Planned entries are discarded; placed and
    /// rejected entries are returned.
    pub fn abandon(self) -> Vec<PlanEntry> {
        let mut plan = self.plan;
        plan.retain_frozen();
        log::debug!("Session abandoned with {} frozen entries", plan.len());
        plan.entries
    }
}
