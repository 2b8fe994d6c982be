//! Core geometry traits.

use crate::Result;

/// Index of a box within the manifest it was read from.
pub type BoxIndex = usize;

/// An item that can be stacked on a pallet.
pub trait Geometry: Clone + Send + Sync {
    /// Returns the volume of this item.
    fn measure(&self) -> f64;

    /// Returns the mass of this item, if known.
    fn mass(&self) -> Option<f64> {
        None
    }

    /// Returns the maximum load this item can carry on top, if limited.
    fn max_stack_load(&self) -> Option<f64> {
        None
    }

    /// Returns true if only upright orientations are allowed.
    fn upright_required(&self) -> bool {
        false
    }

    /// Validates the item. `index` is its manifest position, used in errors.
    fn validate(&self, index: BoxIndex) -> Result<()>;
}

/// A support surface that bounds every layer of a stack.
pub trait Boundary: Clone + Send + Sync {
    /// Returns the usable footprint as (width, depth).
    fn footprint(&self) -> (f64, f64);

    /// Returns the footprint area.
    fn measure(&self) -> f64 {
        let (w, d) = self.footprint();
        w * d
    }

    /// Validates the boundary and returns an error if invalid.
    fn validate(&self) -> Result<()>;

    /// Checks if a rectangle of the given size fits on the footprint.
    fn fits_footprint(&self, width: f64, depth: f64) -> bool {
        let (w, d) = self.footprint();
        width <= w && depth <= d
    }
}
