//! Positions, oriented extents and footprint rectangles.
//!
//! Coordinates use the overlay convention: `x` runs along the pallet width,
//! `y` is height above the deck and `z` runs along the pallet depth.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum corner of a placed box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Offset along the pallet width.
    pub x: f64,
    /// Height above the pallet deck.
    pub y: f64,
    /// Offset along the pallet depth.
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The pallet origin.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Returns this position shifted by the given amounts.
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Converts to a nalgebra point.
    pub fn to_point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Size of a box after an orientation has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    /// Size along x.
    pub width: f64,
    /// Size along y (vertical).
    pub height: f64,
    /// Size along z.
    pub depth: f64,
}

impl Extent {
    /// Creates a new extent.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Volume of the extent.
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Area of the resting face.
    pub fn footprint_area(&self) -> f64 {
        self.width * self.depth
    }

    /// As a nalgebra vector (x, y, z).
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.depth)
    }

    /// Geometric center of a box of this extent placed at `position`.
    pub fn center_at(&self, position: &Position) -> Point3<f64> {
        position.to_point() + self.to_vector() / 2.0
    }

    /// Footprint rectangle of a box of this extent placed at `position`.
    pub fn footprint_at(&self, position: &Position) -> Footprint {
        Footprint::new(
            position.x,
            position.z,
            position.x + self.width,
            position.z + self.depth,
        )
    }
}

/// Axis-aligned rectangle in the deck plane (x, z).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    /// Minimum x coordinate.
    pub min_x: f64,
    /// Minimum z coordinate.
    pub min_z: f64,
    /// Maximum x coordinate.
    pub max_x: f64,
    /// Maximum z coordinate.
    pub max_z: f64,
}

impl Footprint {
    /// Creates a new footprint from min/max coordinates.
    pub fn new(min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// Area shared with another footprint (0 when disjoint or only touching).
    pub fn overlap_area(&self, other: &Self) -> f64 {
        let dx = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let dz = self.max_z.min(other.max_z) - self.min_z.max(other.min_z);
        if dx <= 0.0 || dz <= 0.0 {
            0.0
        } else {
            dx * dz
        }
    }

    /// Returns true if the interiors intersect. Shared edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlap_area(other) > 0.0
    }
}
