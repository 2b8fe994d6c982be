//! # GhostStack
//!
//! Guided pallet stacking: a placement planner that turns a box manifest
//! into a layered stacking plan and keeps it on track as placements are
//! confirmed.
//!
//! This crate provides:
//! - **Planning**: orientation selection and greedy layer packing
//! - **Tracking**: lean angle and center-of-mass drift of the confirmed stack
//! - **Correction**: adaptive replanning of boxes not yet placed
//!
//! ## Quick Start
//!
//! ```rust
//! use ghoststack::pallet::{BoxSpec, Manifest, Pallet, PalletStandard, PlacementEvent};
//! use ghoststack::{Config, CorrectionStrategy, PlanningSession};
//!
//! let manifest = Manifest::new(vec![
//!     BoxSpec::new(16.0, 12.0, 12.0),
//!     BoxSpec::new(20.0, 14.0, 10.0).with_upright(true),
//! ]);
//! let config = Config::new().with_correction(CorrectionStrategy::ErrorPropagation);
//! let mut session =
//!     PlanningSession::new(manifest, Pallet::standard(PalletStandard::Gma), config)?;
//!
//! session.confirm_next(PlacementEvent::SensedError { dx: 0.5, dz: 0.0 })?;
//! let report = session.stability();
//! assert_eq!(report.confirmed, 1);
//! # Ok::<(), ghoststack::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support for manifests, plans and reports

/// Core data model, configuration and errors.
pub use ghoststack_core as core;

/// Pallet planning, stability and replanning.
pub use ghoststack_pallet as pallet;

// Re-export commonly used types at root level
pub use ghoststack_core::{
    Config, CorrectionStrategy, Error, PlacementPlan, PlanState, PlanWarning, Planner, Result,
};
pub use ghoststack_pallet::{LayerPacker, PlanningSession, StabilityReport};
