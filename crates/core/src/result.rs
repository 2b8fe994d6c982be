//! Placement plan representation.

use crate::geometry::BoxIndex;
use crate::placement::{PlacedBox, PlanEntry, PlanState, RejectReason};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics for one closed layer of the stack.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayerStats {
    /// Index of the layer (0-based, bottom first).
    pub layer_index: usize,
    /// Height of the layer's base above the deck.
    pub level: f64,
    /// Maximum occupied height (level + tallest box in the layer).
    pub top: f64,
    /// Plan entry indices packed into this layer, in packing order.
    pub entries: Vec<usize>,
    /// Total footprint area covered by the layer's boxes.
    pub covered_area: f64,
}

impl LayerStats {
    /// Number of boxes in the layer.
    pub fn box_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was packed into this layer.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A box the packer could not fit, for user-facing surfacing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RejectedBox {
    /// Plan entry index.
    pub entry: usize,
    /// Manifest index of the box.
    pub box_index: BoxIndex,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// Non-fatal conditions raised while replanning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlanWarning {
    /// A corrective shift would have pushed a box past the pallet bounds and was clamped.
    OutOfBoundsCorrection {
        /// Plan entry that was corrected.
        entry: usize,
        /// Shift the correction asked for.
        requested: f64,
        /// Shift actually applied.
        applied: f64,
    },
}

impl std::fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBoundsCorrection {
                entry,
                requested,
                applied,
            } => write!(
                f,
                "correction for entry {} clamped from {:.3} to {:.3}",
                entry, requested, applied
            ),
        }
    }
}

/// The ordered result of planning: one entry per manifest box.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlacementPlan {
    /// One entry per manifest box, in manifest order.
    pub entries: Vec<PlanEntry>,

    /// Layers produced by the packer, bottom first. The last one may be empty.
    pub layers: Vec<LayerStats>,

    /// Footprint utilization of the bottom layer (0.0 - 1.0).
    pub base_utilization: f64,

    /// Computation time of the packing pass in milliseconds.
    pub computation_time_ms: u64,
}

impl PlacementPlan {
    /// Creates a plan with every box pending.
    pub fn new(box_count: usize) -> Self {
        Self {
            entries: (0..box_count).map(PlanEntry::pending).collect(),
            ..Self::default()
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn entry(&self, index: usize) -> Result<&PlanEntry> {
        let len = self.entries.len();
        self.entries
            .get(index)
            .ok_or(Error::InvalidEntry { index, len })
    }

    /// Returns the entry at `index` mutably.
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut PlanEntry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(Error::InvalidEntry { index, len })
    }

    /// Index of the first entry still waiting to be placed.
    pub fn next_pending(&self) -> Option<usize> {
        self.entries.iter().position(PlanEntry::is_adjustable)
    }

    /// Number of entries in the given state.
    pub fn count(&self, state: PlanState) -> usize {
        self.entries.iter().filter(|e| e.state() == state).count()
    }

    /// Packer placements of every planned or placed entry, with their entry index.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &PlacedBox)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.placement().map(|p| (i, p)))
    }

    /// Boxes that could not be fit.
    pub fn rejected(&self) -> Vec<RejectedBox> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(entry, e)| {
                e.reject_reason().map(|reason| RejectedBox {
                    entry,
                    box_index: e.box_index(),
                    reason,
                })
            })
            .collect()
    }

    /// Returns true if every box has a planned or confirmed position.
    pub fn all_planned(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.state(), PlanState::Planned | PlanState::Placed))
    }

    /// Returns true when nothing is left to place.
    pub fn is_complete(&self) -> bool {
        self.next_pending().is_none() && self.count(PlanState::Pending) == 0
    }

    /// Height of the planned stack (top of the highest layer).
    pub fn stack_height(&self) -> f64 {
        self.layers.iter().map(|l| l.top).fold(0.0, f64::max)
    }

    /// Drops entries that are still adjustable, keeping confirmed and rejected ones.
    pub fn retain_frozen(&mut self) {
        self.entries.retain(PlanEntry::is_frozen);
    }
}

/// Summary statistics for a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanSummary {
    /// Boxes in the manifest.
    pub total_boxes: usize,
    /// Boxes waiting to be placed.
    pub planned: usize,
    /// Boxes confirmed on the pallet.
    pub placed: usize,
    /// Boxes that could not be fit.
    pub rejected: usize,
    /// Non-empty layers.
    pub layers: usize,
    /// Planned stack height.
    pub stack_height: f64,
    /// Bottom layer footprint utilization in percent.
    pub base_utilization_percent: f64,
    /// Packing time in milliseconds.
    pub time_ms: u64,
}

impl From<&PlacementPlan> for PlanSummary {
    fn from(plan: &PlacementPlan) -> Self {
        Self {
            total_boxes: plan.len(),
            planned: plan.count(PlanState::Planned),
            placed: plan.count(PlanState::Placed),
            rejected: plan.count(PlanState::Rejected),
            layers: plan.layers.iter().filter(|l| !l.is_empty()).count(),
            stack_height: plan.stack_height(),
            base_utilization_percent: plan.base_utilization * 100.0,
            time_ms: plan.computation_time_ms,
        }
    }
}
