//! Greedy shelf packing across the pallet footprint.

use crate::boundary::Pallet;
use crate::geometry::BoxSpec;
use crate::layer::OpenLayer;
use crate::orientation::{enumerate_orientations, Orientation};
use ghoststack_core::geometry::{Boundary, Geometry};
use ghoststack_core::solver::Planner;
use ghoststack_core::{PlacedBox, PlacementPlan, PlanEntry, RejectReason, Result};

use std::time::Instant;

/// Picks the best-scoring orientation whose footprint fits the pallet.
///
/// Ties keep the first enumerated candidate, so the choice is reproducible.
pub fn select_orientation(spec: &BoxSpec, pallet: &Pallet) -> Option<Orientation> {
    let mut best: Option<Orientation> = None;
    for candidate in enumerate_orientations(spec) {
        if !pallet.fits_footprint(candidate.extent.width, candidate.extent.depth) {
            continue;
        }
        match best {
            Some(current) if candidate.score() <= current.score() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Single-pass layer packer.
///
/// Visits every box once, in manifest order, filling rows along the pallet
/// width, rows along the depth, then opening a new layer on top of the
/// tallest box of the layer just closed. No backtracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerPacker;

impl LayerPacker {
    /// Creates a new packer.
    pub fn new() -> Self {
        Self
    }

    /// Packs `boxes` onto `pallet`. Boxes are assumed validated.
    ///
    /// Every box gets an entry: `Planned` with a position, or `Rejected`
    /// when no orientation fits the footprint.
    pub fn pack(&self, boxes: &[BoxSpec], pallet: &Pallet) -> PlacementPlan {
        let start = Instant::now();
        let mut plan = PlacementPlan::new(boxes.len());
        let mut layers = Vec::new();
        let mut layer = OpenLayer::new(0, 0.0);

        for (i, spec) in boxes.iter().enumerate() {
            let Some(orientation) = select_orientation(spec, pallet) else {
                log::warn!(
                    "Box {} ({} x {} x {}) does not fit a {} x {} pallet in any orientation",
                    i,
                    spec.width,
                    spec.height,
                    spec.depth,
                    pallet.width,
                    pallet.depth
                );
                plan.entries[i] = PlanEntry::rejected(i, RejectReason::NoFittingOrientation);
                continue;
            };
            let extent = orientation.extent;

            layer.wrap_if_needed(&extent, pallet.width);

            if !layer.fits_depth(&extent, pallet.depth) {
                let next = OpenLayer::new(layer.index() + 1, layer.top());
                layers.push(std::mem::replace(&mut layer, next).close());
            }

            let position = layer.place(i, &extent);
            plan.entries[i] = PlanEntry::planned(PlacedBox {
                box_index: i,
                extent,
                position,
                layer: layer.index(),
            });
        }

        layers.push(layer.close());

        plan.base_utilization = layers
            .first()
            .map(|l| l.covered_area / pallet.measure())
            .unwrap_or(0.0);
        plan.layers = layers;
        plan.computation_time_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "Packed {} boxes into {} layers ({} rejected), stack height {:.2}",
            boxes.len(),
            plan.layers.len(),
            plan.rejected().len(),
            plan.stack_height()
        );

        plan
    }
}

impl Planner for LayerPacker {
    type Geometry = BoxSpec;
    type Boundary = Pallet;

    fn plan(&self, items: &[BoxSpec], boundary: &Pallet) -> Result<PlacementPlan> {
        boundary.validate()?;
        for (i, item) in items.iter().enumerate() {
            item.validate(i)?;
        }
        Ok(self.pack(items, boundary))
    }
}
