//! Adaptive correction of not-yet-placed entries.
//!
//! Both policies only ever rewrite entries in the `Planned` state; confirmed
//! and rejected entries are left exactly as they are.

use crate::boundary::Pallet;
use crate::layer::EPSILON;
use crate::stability::StabilityEvaluator;
use ghoststack_core::solver::{Config, CorrectionStrategy};
use ghoststack_core::{PlacementPlan, PlanWarning, Position, Result};

/// Nudges remaining plan entries after each confirmed placement.
#[derive(Debug, Clone)]
pub struct AdaptiveReplanner {
    strategy: CorrectionStrategy,
    damping: f64,
    stability_gain: f64,
    max_shift_ratio: f64,
    evaluator: StabilityEvaluator,
}

impl AdaptiveReplanner {
    /// Creates a replanner from planner configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            strategy: config.correction,
            damping: config.damping,
            stability_gain: config.stability_gain,
            max_shift_ratio: config.max_shift_ratio,
            evaluator: StabilityEvaluator::new(config)?,
        })
    }

    /// The configured policy.
    pub fn strategy(&self) -> CorrectionStrategy {
        self.strategy
    }

    /// Runs the configured policy after entry `step` was confirmed with
    /// sensed error `(dx, dz)`.
    pub fn after_confirmation(
        &self,
        plan: &mut PlacementPlan,
        pallet: &Pallet,
        step: usize,
        dx: f64,
        dz: f64,
    ) -> Vec<PlanWarning> {
        match self.strategy {
            CorrectionStrategy::Disabled => Vec::new(),
            CorrectionStrategy::ErrorPropagation => {
                self.propagate_error(plan, step, dx, dz);
                Vec::new()
            }
            CorrectionStrategy::StabilityOffset => plan
                .next_pending()
                .and_then(|next| self.apply_stability_offset(plan, pallet, next))
                .into_iter()
                .collect(),
        }
    }

    /// Shifts every adjustable entry after `step` by a damped share of the
    /// sensed error: `x += dx·damping`, `z += dz·damping`.
    ///
    /// Returns the number of entries moved.
    pub fn propagate_error(&self, plan: &mut PlacementPlan, step: usize, dx: f64, dz: f64) -> usize {
        let (sx, sz) = (dx * self.damping, dz * self.damping);
        let mut moved = 0;
        for entry in plan.entries.iter_mut().skip(step.saturating_add(1)) {
            let Some(planned) = entry.planned_position() else {
                continue;
            };
            if entry.replan(planned.offset(sx, 0.0, sz)) {
                moved += 1;
            }
        }
        log::debug!(
            "Propagated error ({:.3}, {:.3}) from entry {} into {} entries",
            dx,
            dz,
            step,
            moved
        );
        moved
    }

    /// Offsets entry `target` against the confirmed stack's center-of-mass drift.
    ///
    /// The shift is `−drift·gain`, clamped to `±max_shift_ratio·pallet.width`,
    /// applied to the entry's nominal x and kept within
    /// `[0, pallet.width − width]`. Returns a warning if any clamp bit.
    pub fn apply_stability_offset(
        &self,
        plan: &mut PlacementPlan,
        pallet: &Pallet,
        target: usize,
    ) -> Option<PlanWarning> {
        let drift = self.evaluator.com_drift(plan, pallet);
        let entry = plan.entries.get_mut(target)?;
        if !entry.is_adjustable() {
            return None;
        }
        let (nominal, extent, planned) =
            (entry.nominal()?, entry.extent()?, entry.planned_position()?);

        let requested = -drift * self.stability_gain;
        // An unvalidated pallet width may be NaN, where `clamp` panics.
        let limit = (self.max_shift_ratio * pallet.width).abs();
        let max_x = (pallet.width - extent.width).max(0.0);
        let shift = requested.max(-limit).min(limit);
        let x = (nominal.x + shift).max(0.0).min(max_x);
        let applied = x - nominal.x;

        entry.replan(Position::new(x, planned.y, planned.z));

        if (applied - requested).abs() > EPSILON {
            log::warn!(
                "Stability shift for entry {} clamped from {:.3} to {:.3}",
                target,
                requested,
                applied
            );
            Some(PlanWarning::OutOfBoundsCorrection {
                entry: target,
                requested,
                applied,
            })
        } else {
            None
        }
    }
}

impl Default for AdaptiveReplanner {
    fn default() -> Self {
        let config = Config::default();
        Self {
            strategy: config.correction,
            damping: config.damping,
            stability_gain: config.stability_gain,
            max_shift_ratio: config.max_shift_ratio,
            evaluator: StabilityEvaluator::default(),
        }
    }
}
