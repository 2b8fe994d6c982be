//! # GhostStack Core
//!
//! Core types shared by the GhostStack pallet placement planner.
//!
//! ## Core Components
//!
//! - **Geometry traits**: [`Geometry`], [`Boundary`]
//! - **Coordinates**: [`Position`], [`Extent`], [`Footprint`]
//! - **Plan model**: [`PlanEntry`] and its [`PlanState`] machine, [`PlacementPlan`]
//! - **Planner trait**: [`Planner`], configured by [`Config`]
//!
//! ## Configuration
//!
//! ```rust
//! use ghoststack_core::{Config, CorrectionStrategy};
//!
//! let config = Config::new()
//!     .with_correction(CorrectionStrategy::ErrorPropagation)
//!     .with_damping(0.5);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;
pub mod transform;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{Boundary, BoxIndex, Geometry};
pub use placement::{PlacedBox, PlanEntry, PlanState, RejectReason};
pub use result::{LayerStats, PlacementPlan, PlanSummary, PlanWarning, RejectedBox};
pub use solver::{Config, CorrectionStrategy, Planner};
pub use transform::{Extent, Footprint, Position};
