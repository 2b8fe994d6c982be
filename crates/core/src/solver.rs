//! Planner trait and configuration.

use crate::geometry::{Boundary, Geometry};
use crate::result::PlacementPlan;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How not-yet-placed entries are corrected after each confirmed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CorrectionStrategy {
    /// Leave the plan as packed.
    #[default]
    Disabled,
    /// Carry a damped share of each sensed placement error into every later entry.
    ErrorPropagation,
    /// Shift the next entry against the confirmed stack's center-of-mass drift.
    StabilityOffset,
}

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Config {
    /// Correction policy applied after each confirmation.
    pub correction: CorrectionStrategy,

    /// Share of a sensed error carried into later entries (0.0 - 1.0).
    pub damping: f64,

    /// Gain applied to the center-of-mass drift by the stability offset.
    pub stability_gain: f64,

    /// Largest stability shift as a fraction of pallet width.
    pub max_shift_ratio: f64,

    /// Floor on the height term of the lean angle.
    pub min_lean_height: f64,

    /// Lean angle, in degrees, above which the stack is reported as leaning.
    pub lean_warning_degrees: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            correction: CorrectionStrategy::default(),
            damping: 0.5,
            stability_gain: 0.4,
            max_shift_ratio: 0.15,
            min_lean_height: 0.1,
            lean_warning_degrees: 5.0,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the correction strategy.
    pub fn with_correction(mut self, correction: CorrectionStrategy) -> Self {
        self.correction = correction;
        self
    }

    /// Sets the error-propagation damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the stability-offset gain.
    pub fn with_stability_gain(mut self, gain: f64) -> Self {
        self.stability_gain = gain;
        self
    }

    /// Sets the maximum stability shift as a fraction of pallet width.
    pub fn with_max_shift_ratio(mut self, ratio: f64) -> Self {
        self.max_shift_ratio = ratio;
        self
    }

    /// Sets the height floor used as the lean angle denominator.
    pub fn with_min_lean_height(mut self, height: f64) -> Self {
        self.min_lean_height = height;
        self
    }

    /// Sets the lean warning threshold in degrees.
    pub fn with_lean_warning(mut self, degrees: f64) -> Self {
        self.lean_warning_degrees = degrees;
        self
    }

    /// Checks that every factor is finite and in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping.is_finite() && (0.0..=1.0).contains(&self.damping)) {
            return Err(Error::ConfigError(format!(
                "damping must be within [0, 1], got {}",
                self.damping
            )));
        }
        if !(self.stability_gain.is_finite() && self.stability_gain >= 0.0) {
            return Err(Error::ConfigError(format!(
                "stability gain must be non-negative, got {}",
                self.stability_gain
            )));
        }
        if !(self.max_shift_ratio.is_finite() && (0.0..=1.0).contains(&self.max_shift_ratio)) {
            return Err(Error::ConfigError(format!(
                "max shift ratio must be within [0, 1], got {}",
                self.max_shift_ratio
            )));
        }
        if !(self.min_lean_height.is_finite() && self.min_lean_height > 0.0) {
            return Err(Error::ConfigError(format!(
                "lean height floor must be positive, got {}",
                self.min_lean_height
            )));
        }
        if !(self.lean_warning_degrees.is_finite() && self.lean_warning_degrees >= 0.0) {
            return Err(Error::ConfigError(format!(
                "lean warning must be non-negative, got {}",
                self.lean_warning_degrees
            )));
        }
        Ok(())
    }
}

/// Trait for placement planners.
pub trait Planner {
    /// The item type this planner stacks.
    type Geometry: Geometry;
    /// The support surface this planner stacks onto.
    type Boundary: Boundary;

    /// Produces a plan covering every item, in input order.
    fn plan(&self, items: &[Self::Geometry], boundary: &Self::Boundary) -> Result<PlacementPlan>;
}
