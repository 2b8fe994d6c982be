//! Box orientation enumeration.

use crate::geometry::BoxSpec;
use ghoststack_core::geometry::Geometry;
use ghoststack_core::Extent;

/// Source axis indices into `[width, height, depth]`.
const WIDTH: usize = 0;
const HEIGHT: usize = 1;
const DEPTH: usize = 2;

/// All six ways to rest a box, as (width_axis, height_axis, depth_axis).
const ALL_ORIENTATIONS: [(usize, usize, usize); 6] = [
    (WIDTH, HEIGHT, DEPTH), // Original
    (WIDTH, DEPTH, HEIGHT), // Tipped forward
    (HEIGHT, WIDTH, DEPTH), // On its side
    (HEIGHT, DEPTH, WIDTH), // On its side, yawed
    (DEPTH, WIDTH, HEIGHT), // On its end
    (DEPTH, HEIGHT, WIDTH), // Yawed 90° about the vertical
];

/// Height axis stays vertical: original and 90° yaw.
const UPRIGHT_ORIENTATIONS: [(usize, usize, usize); 2] =
    [(WIDTH, HEIGHT, DEPTH), (DEPTH, HEIGHT, WIDTH)];

/// Assignment of a box's three dimensions to the (width, height, depth) axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Source axis for each target axis, as (width, height, depth).
    pub axes: (usize, usize, usize),
    /// Resulting oriented size.
    pub extent: Extent,
}

impl Orientation {
    fn from_axes(dims: [f64; 3], axes: (usize, usize, usize)) -> Self {
        let (w, h, d) = axes;
        Self {
            axes,
            extent: Extent::new(dims[w], dims[h], dims[d]),
        }
    }

    /// Returns true if the box's original height axis stays vertical.
    pub fn is_upright(&self) -> bool {
        self.axes.1 == HEIGHT
    }

    /// Packing preference: resting-face area over height. Higher is flatter.
    pub fn score(&self) -> f64 {
        self.extent.footprint_area() / self.extent.height
    }
}

/// Enumerates the candidate orientations for a box, in a fixed order.
///
/// Upright boxes yield exactly two candidates; others yield all six.
/// Never empty. Dimensions are assumed validated.
pub fn enumerate_orientations(spec: &BoxSpec) -> Vec<Orientation> {
    let dims = spec.dimensions();
    let axes: &[(usize, usize, usize)] = if spec.upright_required() {
        &UPRIGHT_ORIENTATIONS
    } else {
        &ALL_ORIENTATIONS
    };
    axes.iter()
        .map(|&a| Orientation::from_axes(dims, a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_any_has_six() {
        let b = BoxSpec::new(10.0, 20.0, 30.0);
        let orientations = enumerate_orientations(&b);
        assert_eq!(orientations.len(), 6);
        assert_eq!(orientations[0].extent, Extent::new(10.0, 20.0, 30.0));

        let mut volumes: Vec<f64> = orientations.iter().map(|o| o.extent.volume()).collect();
        volumes.dedup();
        assert_eq!(volumes, vec![6000.0]);
    }

    #[test]
    fn test_upright_keeps_height_vertical() {
        let b = BoxSpec::new(10.0, 20.0, 30.0).with_upright(true);
        let orientations = enumerate_orientations(&b);
        assert_eq!(orientations.len(), 2);
        for o in &orientations {
            assert!(o.is_upright());
            assert_eq!(o.extent.height, 20.0);
        }
        assert_eq!(orientations[0].extent, Extent::new(10.0, 20.0, 30.0));
        assert_eq!(orientations[1].extent, Extent::new(30.0, 20.0, 10.0));
    }

    #[test]
    fn test_score() {
        let b = BoxSpec::new(16.0, 12.0, 12.0);
        let orientations = enumerate_orientations(&b);
        assert_relative_eq!(orientations[0].score(), 16.0);

        let best = orientations
            .iter()
            .map(Orientation::score)
            .fold(f64::MIN, f64::max);
        assert_relative_eq!(best, 16.0);
    }
}
