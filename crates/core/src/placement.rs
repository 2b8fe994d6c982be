//! Plan entries and their placement state machine.

use crate::geometry::BoxIndex;
use crate::transform::{Extent, Footprint, Position};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a single manifest box within a plan.
///
/// `Pending → Planned → Placed` or `Pending → Rejected`. `Placed` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PlanState {
    /// Not yet visited by the packer.
    #[default]
    Pending,
    /// Has a planned position that replanning may still move.
    Planned,
    /// Physically confirmed.
    Placed,
    /// Could not be placed at all.
    Rejected,
}

impl PlanState {
    /// Returns true for the terminal states.
    pub fn is_frozen(&self) -> bool {
        matches!(self, Self::Placed | Self::Rejected)
    }
}

/// Why a box was rejected by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RejectReason {
    /// No orientation of the box fits within the pallet footprint.
    NoFittingOrientation,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFittingOrientation => write!(f, "no orientation fits the pallet footprint"),
        }
    }
}

/// A box as the packer laid it down: oriented extent, nominal position and layer.
///
/// Created once per box; never moved afterwards. Replanning moves the
/// entry's `planned` position instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlacedBox {
    /// Manifest index of the source box.
    pub box_index: BoxIndex,
    /// Oriented size.
    pub extent: Extent,
    /// Position assigned by the packer.
    pub position: Position,
    /// Index of the layer the box was packed into.
    pub layer: usize,
}

impl PlacedBox {
    /// Footprint at the nominal position.
    pub fn footprint(&self) -> Footprint {
        self.extent.footprint_at(&self.position)
    }

    /// Top of the box at the nominal position.
    pub fn top(&self) -> f64 {
        self.position.y + self.extent.height
    }
}

/// One manifest box's slot in a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanEntry {
    box_index: BoxIndex,
    state: PlanState,
    placement: Option<PlacedBox>,
    planned: Option<Position>,
    actual: Option<Position>,
    reject_reason: Option<RejectReason>,
}

impl PlanEntry {
    /// Creates a pending entry for the given manifest box.
    pub fn pending(box_index: BoxIndex) -> Self {
        Self {
            box_index,
            state: PlanState::Pending,
            placement: None,
            planned: None,
            actual: None,
            reject_reason: None,
        }
    }

    /// Creates a planned entry from a packer placement.
    pub fn planned(placement: PlacedBox) -> Self {
        Self {
            box_index: placement.box_index,
            state: PlanState::Planned,
            placement: Some(placement),
            planned: Some(placement.position),
            actual: None,
            reject_reason: None,
        }
    }

    /// Creates a rejected entry.
    pub fn rejected(box_index: BoxIndex, reason: RejectReason) -> Self {
        Self {
            box_index,
            state: PlanState::Rejected,
            placement: None,
            planned: None,
            actual: None,
            reject_reason: Some(reason),
        }
    }

    /// Manifest index of the source box.
    pub fn box_index(&self) -> BoxIndex {
        self.box_index
    }

    /// Current state.
    pub fn state(&self) -> PlanState {
        self.state
    }

    /// The packer's placement, if the box was planned.
    pub fn placement(&self) -> Option<&PlacedBox> {
        self.placement.as_ref()
    }

    /// Oriented extent, if the box was planned.
    pub fn extent(&self) -> Option<Extent> {
        self.placement.map(|p| p.extent)
    }

    /// Position originally assigned by the packer.
    pub fn nominal(&self) -> Option<Position> {
        self.placement.map(|p| p.position)
    }

    /// Current planned position.
    pub fn planned_position(&self) -> Option<Position> {
        self.planned
    }

    /// Confirmed position, once placed.
    pub fn actual(&self) -> Option<Position> {
        self.actual
    }

    /// Reason for rejection, if rejected.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        self.reject_reason
    }

    /// Returns true once the entry can no longer change.
    pub fn is_frozen(&self) -> bool {
        self.state.is_frozen()
    }

    /// Returns true while the planned position may still be rewritten.
    pub fn is_adjustable(&self) -> bool {
        self.state == PlanState::Planned
    }

    /// Rewrites the planned position. Frozen entries are left untouched.
    ///
    /// Returns `false` if the entry is not adjustable.
    pub fn replan(&mut self, position: Position) -> bool {
        if !self.is_adjustable() {
            return false;
        }
        self.planned = Some(position);
        true
    }

    /// Records the confirmed position and freezes the entry.
    pub fn confirm(&mut self, index: usize, actual: Position) -> Result<()> {
        match self.state {
            PlanState::Planned => {
                self.actual = Some(actual);
                self.state = PlanState::Placed;
                Ok(())
            }
            PlanState::Pending => Err(Error::EntryNotPlanned(index)),
            PlanState::Placed | PlanState::Rejected => Err(Error::EntryFrozen(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlanEntry {
        PlanEntry::planned(PlacedBox {
            box_index: 0,
            extent: Extent::new(20.0, 14.0, 10.0),
            position: Position::new(20.0, 0.0, 0.0),
            layer: 0,
        })
    }

    #[test]
    fn test_replan_while_planned() {
        let mut entry = sample();
        assert!(entry.replan(Position::new(21.0, 0.0, 0.5)));
        assert_eq!(entry.planned_position(), Some(Position::new(21.0, 0.0, 0.5)));
        assert_eq!(entry.nominal(), Some(Position::new(20.0, 0.0, 0.0)));
    }

    #[test]
    fn test_confirm_freezes_entry() {
        let mut entry = sample();
        entry.confirm(0, Position::new(20.5, 0.0, 0.0)).unwrap();
        assert_eq!(entry.state(), PlanState::Placed);
        assert!(entry.is_frozen());

        assert!(!entry.replan(Position::origin()));
        assert_eq!(entry.planned_position(), Some(Position::new(20.0, 0.0, 0.0)));

        let err = entry.confirm(0, Position::origin()).unwrap_err();
        assert!(matches!(err, Error::EntryFrozen(0)));
        assert_eq!(entry.actual(), Some(Position::new(20.5, 0.0, 0.0)));
    }

    #[test]
    fn test_rejected_entry_is_immutable() {
        let mut entry = PlanEntry::rejected(4, RejectReason::NoFittingOrientation);
        assert!(entry.is_frozen());
        assert!(!entry.replan(Position::origin()));
        assert!(matches!(
            entry.confirm(2, Position::origin()),
            Err(Error::EntryFrozen(2))
        ));
        assert_eq!(entry.reject_reason(), Some(RejectReason::NoFittingOrientation));
    }

    #[test]
    fn test_pending_entry_cannot_be_confirmed() {
        let mut entry = PlanEntry::pending(1);
        assert!(matches!(
            entry.confirm(1, Position::origin()),
            Err(Error::EntryNotPlanned(1))
        ));
    }
}
