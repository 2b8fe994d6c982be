//! Stability evaluation of the confirmed part of a stack.
//!
//! Only entries whose placement has been physically confirmed take part.
//! Two signals are derived from them:
//!
//! 1. **Lean angle**: `atan(Σ|actual.x − planned.x| / max height)`, the tilt
//!    implied by accumulated horizontal placement error over stack height.
//! 2. **Center-of-mass drift**: the volume-weighted mean of box centers along
//!    x, relative to the pallet center. Mass is approximated by volume
//!    (uniform density).
//!
//! A load check on the manifest's `maxLoad` values is reported alongside.

use crate::boundary::Pallet;
use crate::layer::EPSILON;
use ghoststack_core::geometry::Geometry;
use ghoststack_core::solver::Config;
use ghoststack_core::{Extent, PlacementPlan, Position, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A confirmed box that carries more weight than its `maxLoad`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Overload {
    /// Plan entry index.
    pub entry: usize,
    /// Manifest index of the box.
    pub box_index: usize,
    /// Weight resting on the box.
    pub load: f64,
    /// The box's declared limit.
    pub max_load: f64,
}

/// Stability of the confirmed stack.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StabilityReport {
    /// Number of confirmed boxes considered.
    pub confirmed: usize,
    /// Σ|actual.x − planned.x| over confirmed boxes.
    pub total_deviation: f64,
    /// Largest confirmed base height.
    pub max_height: f64,
    /// Lean angle in radians.
    pub lean_angle: f64,
    /// Volume-weighted center of mass along x, if anything is confirmed.
    pub center_of_mass_x: Option<f64>,
    /// Center of mass x minus pallet center (0 when nothing is confirmed).
    pub com_drift: f64,
    /// Total confirmed volume.
    pub total_volume: f64,
    /// Boxes loaded beyond their `maxLoad`.
    pub overloads: Vec<Overload>,
    /// Whether the lean angle exceeds the configured warning threshold.
    pub leaning: bool,
}

impl StabilityReport {
    /// Lean angle in degrees.
    pub fn lean_degrees(&self) -> f64 {
        self.lean_angle.to_degrees()
    }

    /// Returns true if the stack is neither leaning nor overloaded.
    pub fn is_stable(&self) -> bool {
        !self.leaning && self.overloads.is_empty()
    }
}

/// A confirmed entry, flattened for evaluation.
#[derive(Debug, Clone, Copy)]
struct ConfirmedBox {
    entry: usize,
    box_index: usize,
    extent: Extent,
    planned: Position,
    actual: Position,
}

impl ConfirmedBox {
    fn center(&self) -> Point3<f64> {
        self.extent.center_at(&self.actual)
    }
}

fn confirmed_boxes(plan: &PlacementPlan) -> Vec<ConfirmedBox> {
    plan.entries
        .iter()
        .enumerate()
        .filter_map(|(entry, e)| {
            Some(ConfirmedBox {
                entry,
                box_index: e.box_index(),
                extent: e.extent()?,
                planned: e.planned_position()?,
                actual: e.actual()?,
            })
        })
        .collect()
}

/// Derives lean and center-of-mass signals from confirmed placements.
#[derive(Debug, Clone)]
pub struct StabilityEvaluator {
    min_lean_height: f64,
    lean_warning: f64,
}

impl StabilityEvaluator {
    /// Creates an evaluator from planner configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: &Config) -> Self {
        Self {
            min_lean_height: config.min_lean_height,
            lean_warning: config.lean_warning_degrees.to_radians(),
        }
    }

    /// Lean angle in radians. Zero when nothing is confirmed.
    pub fn lean_angle(&self, plan: &PlacementPlan) -> f64 {
        let (deviation, max_height) = Self::deviation_and_height(&confirmed_boxes(plan));
        self.lean_from(deviation, max_height)
    }

    /// Volume-weighted center of mass of the confirmed boxes.
    pub fn center_of_mass(&self, plan: &PlacementPlan) -> Option<Point3<f64>> {
        Self::center_of_mass_of(&confirmed_boxes(plan))
    }

    /// Center of mass x minus pallet center x. Zero when nothing is confirmed.
    pub fn com_drift(&self, plan: &PlacementPlan, pallet: &Pallet) -> f64 {
        self.center_of_mass(plan)
            .map(|com| com.x - pallet.center_x())
            .unwrap_or(0.0)
    }

    /// Confirmed boxes whose `maxLoad` is exceeded by confirmed boxes resting above them.
    pub fn check_loads<G: Geometry>(&self, plan: &PlacementPlan, boxes: &[G]) -> Vec<Overload> {
        Self::overloads_of(&confirmed_boxes(plan), boxes)
    }

    /// Full report over the confirmed part of `plan`.
    pub fn evaluate<G: Geometry>(
        &self,
        plan: &PlacementPlan,
        boxes: &[G],
        pallet: &Pallet,
    ) -> StabilityReport {
        let confirmed = confirmed_boxes(plan);
        let (total_deviation, max_height) = Self::deviation_and_height(&confirmed);
        let lean_angle = self.lean_from(total_deviation, max_height);
        let com = Self::center_of_mass_of(&confirmed);
        let overloads = Self::overloads_of(&confirmed, boxes);
        let leaning = lean_angle > self.lean_warning;

        if leaning {
            log::warn!(
                "Stack leaning {:.1}° over {} confirmed boxes",
                lean_angle.to_degrees(),
                confirmed.len()
            );
        }
        for o in &overloads {
            log::warn!(
                "Box {} carries {:.1}, above its max load {:.1}",
                o.box_index,
                o.load,
                o.max_load
            );
        }

        StabilityReport {
            confirmed: confirmed.len(),
            total_deviation,
            max_height,
            lean_angle,
            center_of_mass_x: com.map(|c| c.x),
            com_drift: com.map(|c| c.x - pallet.center_x()).unwrap_or(0.0),
            total_volume: confirmed.iter().map(|b| b.extent.volume()).sum(),
            overloads,
            leaning,
        }
    }

    fn lean_from(&self, deviation: f64, max_height: f64) -> f64 {
        (deviation / max_height.max(self.min_lean_height)).atan()
    }

    fn deviation_and_height(confirmed: &[ConfirmedBox]) -> (f64, f64) {
        confirmed.iter().fold((0.0, 0.0), |(dev, height), b| {
            (
                dev + (b.actual.x - b.planned.x).abs(),
                f64::max(height, b.actual.y),
            )
        })
    }

    fn center_of_mass_of(confirmed: &[ConfirmedBox]) -> Option<Point3<f64>> {
        let mut weighted = Vector3::zeros();
        let mut total = 0.0;
        for b in confirmed {
            let volume = b.extent.volume();
            weighted += b.center().coords * volume;
            total += volume;
        }
        if total > 0.0 {
            Some(Point3::from(weighted / total))
        } else {
            None
        }
    }

    fn overloads_of<G: Geometry>(confirmed: &[ConfirmedBox], boxes: &[G]) -> Vec<Overload> {
        let mut overloads = Vec::new();
        for base in confirmed {
            let Some(max_load) = boxes.get(base.box_index).and_then(Geometry::max_stack_load) else {
                continue;
            };
            let base_top = base.actual.y + base.extent.height;
            let base_footprint = base.extent.footprint_at(&base.actual);

            let load: f64 = confirmed
                .iter()
                .filter(|above| above.entry != base.entry)
                .filter(|above| above.actual.y >= base_top - EPSILON)
                .filter(|above| {
                    base_footprint.overlaps(&above.extent.footprint_at(&above.actual))
                })
                .filter_map(|above| boxes.get(above.box_index).and_then(Geometry::mass))
                .sum();

            if load > max_load {
                overloads.push(Overload {
                    entry: base.entry,
                    box_index: base.box_index,
                    load,
                    max_load,
                });
            }
        }
        overloads
    }
}

impl Default for StabilityEvaluator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxSpec;
    use crate::packer::LayerPacker;
    use approx::assert_relative_eq;

    fn gma() -> Pallet {
        Pallet::new(48.0, 40.0)
    }

    fn cube(size: f64) -> BoxSpec {
        BoxSpec::new(size, size, size)
    }

    #[test]
    fn test_nothing_confirmed() {
        let boxes = vec![cube(10.0); 3];
        let plan = LayerPacker::new().pack(&boxes, &gma());
        let evaluator = StabilityEvaluator::default();

        let report = evaluator.evaluate(&plan, &boxes, &gma());
        assert_eq!(report.confirmed, 0);
        assert_eq!(report.lean_angle, 0.0);
        assert_eq!(report.com_drift, 0.0);
        assert!(report.center_of_mass_x.is_none());
        assert!(report.is_stable());
    }

    #[test]
    fn test_lean_uses_height_floor() {
        let boxes = vec![cube(10.0)];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[0].confirm(0, Position::new(0.1, 0.0, 0.0)).unwrap();

        let evaluator = StabilityEvaluator::default();
        // Nothing above the deck yet: the 0.1 floor stands in for height.
        assert_relative_eq!(evaluator.lean_angle(&plan), (0.1_f64 / 0.1).atan());
    }

    #[test]
    fn test_lean_over_stack_height() {
        // Two layers of one 40-wide box each on a 48 x 40 pallet.
        let boxes = vec![BoxSpec::new(40.0, 10.0, 40.0).with_upright(true); 2];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[0].confirm(0, Position::new(1.0, 0.0, 0.0)).unwrap();
        plan.entries[1].confirm(1, Position::new(-1.0, 10.0, 0.0)).unwrap();

        let evaluator = StabilityEvaluator::default();
        let report = evaluator.evaluate(&plan, &boxes, &gma());
        assert_relative_eq!(report.total_deviation, 2.0);
        assert_relative_eq!(report.max_height, 10.0);
        assert_relative_eq!(report.lean_angle, (0.2_f64).atan());
        assert!(report.leaning);
    }

    #[test]
    fn test_com_drift_is_volume_weighted() {
        let boxes = vec![cube(20.0), BoxSpec::new(10.0, 10.0, 10.0)];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[0].confirm(0, Position::new(0.0, 0.0, 0.0)).unwrap();
        plan.entries[1].confirm(1, Position::new(20.0, 0.0, 0.0)).unwrap();

        let evaluator = StabilityEvaluator::default();
        // Centers 10 and 25, volumes 8000 and 1000.
        let expected_com = (10.0 * 8000.0 + 25.0 * 1000.0) / 9000.0;
        let com = evaluator.center_of_mass(&plan).unwrap();
        assert_relative_eq!(com.x, expected_com, epsilon = 1e-9);
        assert_relative_eq!(
            evaluator.com_drift(&plan, &gma()),
            expected_com - 24.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_unconfirmed_entries_are_skipped() {
        let boxes = vec![cube(10.0); 2];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[1].replan(Position::new(30.0, 0.0, 0.0));

        let evaluator = StabilityEvaluator::default();
        assert_eq!(evaluator.lean_angle(&plan), 0.0);
        assert!(evaluator.center_of_mass(&plan).is_none());
    }

    #[test]
    fn test_overload_detected() {
        let boxes = vec![
            BoxSpec::new(40.0, 10.0, 40.0)
                .with_upright(true)
                .with_max_load(20.0),
            BoxSpec::new(40.0, 10.0, 40.0)
                .with_upright(true)
                .with_weight(30.0),
        ];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[0].confirm(0, Position::new(0.0, 0.0, 0.0)).unwrap();
        plan.entries[1].confirm(1, Position::new(0.0, 10.0, 0.0)).unwrap();

        let evaluator = StabilityEvaluator::default();
        let overloads = evaluator.check_loads(&plan, &boxes);
        assert_eq!(overloads.len(), 1);
        assert_eq!(overloads[0].box_index, 0);
        assert_relative_eq!(overloads[0].load, 30.0);

        let report = evaluator.evaluate(&plan, &boxes, &gma());
        assert!(!report.is_stable());
    }

    #[test]
    fn test_side_by_side_is_not_load() {
        let boxes = vec![
            cube(10.0).with_max_load(1.0),
            cube(10.0).with_weight(50.0),
        ];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[0].confirm(0, Position::new(0.0, 0.0, 0.0)).unwrap();
        plan.entries[1].confirm(1, Position::new(10.0, 0.0, 0.0)).unwrap();

        let evaluator = StabilityEvaluator::default();
        assert!(evaluator.check_loads(&plan, &boxes).is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(StabilityEvaluator::new(&Config::default()).is_ok());
        let err = StabilityEvaluator::new(&Config::new().with_min_lean_height(-1.0)).unwrap_err();
        assert!(matches!(err, ghoststack_core::Error::ConfigError(_)));
    }

    #[derive(Clone)]
    struct Sack {
        mass: f64,
        limit: Option<f64>,
    }

    impl Geometry for Sack {
        fn measure(&self) -> f64 {
            1000.0
        }

        fn mass(&self) -> Option<f64> {
            Some(self.mass)
        }

        fn max_stack_load(&self) -> Option<f64> {
            self.limit
        }

        fn validate(&self, _index: usize) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_loads_read_through_geometry() {
        let boxes = vec![cube(10.0); 2];
        let mut plan = LayerPacker::new().pack(&boxes, &gma());
        plan.entries[0].confirm(0, Position::new(0.0, 0.0, 0.0)).unwrap();
        plan.entries[1].confirm(1, Position::new(0.0, 10.0, 0.0)).unwrap();

        let sacks = vec![
            Sack {
                mass: 5.0,
                limit: Some(10.0),
            },
            Sack {
                mass: 12.0,
                limit: None,
            },
        ];
        let overloads = StabilityEvaluator::default().check_loads(&plan, &sacks);
        assert_eq!(overloads.len(), 1);
        assert_relative_eq!(overloads[0].load, 12.0);
        assert_relative_eq!(overloads[0].max_load, 10.0);
    }
}
