//! Manifest box geometry.

use ghoststack_core::geometry::{BoxIndex, Geometry};
use ghoststack_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box as read from the shipping manifest.
///
/// Serialized field names (`width`, `height`, `depth`, `weight`, `maxLoad`,
/// `uprightRequired`) match persisted manifests and must not change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoxSpec {
    /// Size along the width axis.
    pub width: f64,

    /// Size along the vertical axis when resting on its base.
    pub height: f64,

    /// Size along the depth axis.
    pub depth: f64,

    /// Weight of the box, if known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub weight: Option<f64>,

    /// Maximum weight that may rest on top of the box.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max_load: Option<f64>,

    /// Whether the box must keep its height axis vertical.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upright_required: bool,
}

impl BoxSpec {
    /// Creates a new box with the given dimensions.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            weight: None,
            max_load: None,
            upright_required: false,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the maximum load on top.
    pub fn with_max_load(mut self, max_load: f64) -> Self {
        self.max_load = Some(max_load);
        self
    }

    /// Sets the upright constraint.
    pub fn with_upright(mut self, upright: bool) -> Self {
        self.upright_required = upright;
        self
    }

    /// Returns the dimensions as `[width, height, depth]`.
    pub fn dimensions(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }
}

impl Geometry for BoxSpec {
    fn measure(&self) -> f64 {
        self.width * self.height * self.depth
    }

    fn mass(&self) -> Option<f64> {
        self.weight
    }

    fn max_stack_load(&self) -> Option<f64> {
        self.max_load
    }

    fn upright_required(&self) -> bool {
        self.upright_required
    }

    fn validate(&self, index: BoxIndex) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidBoxDimension {
                    index,
                    message: format!("{} must be positive and finite, got {}", name, value),
                });
            }
        }

        for (name, value) in [("weight", self.weight), ("maxLoad", self.max_load)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::InvalidBoxDimension {
                        index,
                        message: format!("{} cannot be negative, got {}", name, v),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_volume() {
        let b = BoxSpec::new(10.0, 20.0, 30.0);
        assert_relative_eq!(b.measure(), 6000.0, epsilon = 0.001);
    }

    #[test]
    fn test_validation() {
        assert!(BoxSpec::new(16.0, 12.0, 12.0).validate(0).is_ok());

        let err = BoxSpec::new(-10.0, 20.0, 30.0).validate(2).unwrap_err();
        assert!(matches!(err, Error::InvalidBoxDimension { index: 2, .. }));

        assert!(BoxSpec::new(10.0, 0.0, 30.0).validate(0).is_err());
        assert!(BoxSpec::new(10.0, 20.0, f64::INFINITY).validate(0).is_err());
        assert!(BoxSpec::new(10.0, 20.0, f64::NAN).validate(0).is_err());
        assert!(BoxSpec::new(10.0, 20.0, 30.0)
            .with_weight(-1.0)
            .validate(0)
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_manifest_field_names() {
        let json = r#"{"width":16,"height":12,"depth":12,"maxLoad":40,"uprightRequired":true}"#;
        let b: BoxSpec = serde_json::from_str(json).unwrap();
        assert_eq!(b.max_load, Some(40.0));
        assert!(b.upright_required);
        assert_eq!(b.weight, None);

        let out = serde_json::to_string(&b).unwrap();
        assert!(out.contains("\"maxLoad\""));
        assert!(out.contains("\"uprightRequired\""));
        assert!(!out.contains("weight"));
    }
}
