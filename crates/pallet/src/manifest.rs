//! Ordered manifest of boxes to stack.

use crate::geometry::BoxSpec;
use ghoststack_core::geometry::Geometry;
use ghoststack_core::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The boxes of one shipment, in the order they will arrive.
///
/// Serializes as a bare array of box records.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Manifest {
    boxes: Vec<BoxSpec>,
}

impl Manifest {
    /// Creates a manifest from boxes in arrival order.
    pub fn new(boxes: Vec<BoxSpec>) -> Self {
        Self { boxes }
    }

    /// Appends a box.
    pub fn push(&mut self, spec: BoxSpec) {
        self.boxes.push(spec);
    }

    /// The boxes in arrival order.
    pub fn boxes(&self) -> &[BoxSpec] {
        &self.boxes
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if the manifest lists no boxes.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Total volume of all boxes.
    pub fn total_volume(&self) -> f64 {
        self.boxes.iter().map(Geometry::measure).sum()
    }

    /// Validates every box; the first invalid one is reported.
    pub fn validate(&self) -> Result<()> {
        self.boxes
            .iter()
            .enumerate()
            .try_for_each(|(i, b)| b.validate(i))
    }
}

impl From<Vec<BoxSpec>> for Manifest {
    fn from(boxes: Vec<BoxSpec>) -> Self {
        Self::new(boxes)
    }
}

impl FromIterator<BoxSpec> for Manifest {
    fn from_iter<I: IntoIterator<Item = BoxSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghoststack_core::Error;

    #[test]
    fn test_validate_reports_first_bad_box() {
        let manifest: Manifest = vec![
            BoxSpec::new(16.0, 12.0, 12.0),
            BoxSpec::new(16.0, 0.0, 12.0),
            BoxSpec::new(-1.0, 12.0, 12.0),
        ]
        .into();

        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidBoxDimension { index: 1, .. }));
    }

    #[test]
    fn test_total_volume() {
        let mut manifest = Manifest::default();
        assert!(manifest.is_empty());
        manifest.push(BoxSpec::new(2.0, 3.0, 4.0));
        manifest.push(BoxSpec::new(1.0, 1.0, 1.0));
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.total_volume(), 25.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_manifest_is_a_json_array() {
        let json = r#"[
            {"width": 16, "height": 12, "depth": 12, "uprightRequired": false},
            {"width": 20, "height": 14, "depth": 10, "weight": 8.5, "uprightRequired": true}
        ]"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.boxes()[1].weight, Some(8.5));
        assert!(manifest.validate().is_ok());
    }
}
