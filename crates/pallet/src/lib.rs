//! # GhostStack Pallet
//!
//! Placement planning for stacking boxes on a shipping pallet.
//!
//! ## Features
//!
//! - Orientation enumeration with an upright constraint (2 or 6 candidates)
//! - Deterministic greedy layer packing across the pallet footprint
//! - Lean angle and center-of-mass drift from confirmed placements
//! - Adaptive replanning (error propagation or stability offset)
//! - Per-pallet planning sessions driven by placement confirmations
//!
//! ```rust
//! use ghoststack_pallet::{BoxSpec, Config, Pallet, PalletStandard, PlacementEvent, PlanningSession};
//!
//! let manifest = vec![BoxSpec::new(20.0, 14.0, 10.0); 3].into();
//! let mut session =
//!     PlanningSession::new(manifest, Pallet::standard(PalletStandard::Gma), Config::default())?;
//!
//! session.confirm_next(PlacementEvent::Placed)?;
//! assert_eq!(session.stability().confirmed, 1);
//! # Ok::<(), ghoststack_pallet::Error>(())
//! ```

pub mod boundary;
pub mod geometry;
mod layer;
pub mod manifest;
pub mod orientation;
pub mod packer;
pub mod replan;
pub mod session;
pub mod stability;

// Re-exports
pub use boundary::{Pallet, PalletStandard};
pub use geometry::BoxSpec;
pub use manifest::Manifest;
pub use orientation::{enumerate_orientations, Orientation};
pub use packer::{select_orientation, LayerPacker};
pub use replan::AdaptiveReplanner;
pub use session::{PlacementEvent, PlanningSession};
pub use stability::{Overload, StabilityEvaluator, StabilityReport};
pub use ghoststack_core::{
    Config, CorrectionStrategy, Error, PlacementPlan, PlanEntry, PlanState, PlanWarning, Planner,
    Result,
};
