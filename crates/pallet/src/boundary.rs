//! Pallet footprints.

use ghoststack_core::geometry::Boundary;
use ghoststack_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard pallet sizes, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PalletStandard {
    /// North American GMA, 48 × 40.
    Gma,
    /// EUR / EPAL, 47.2 × 31.5.
    Euro,
    /// Japanese JIS, 43.3 × 43.3.
    Jis,
    /// Australian, 45.9 × 45.9.
    Au,
}

impl PalletStandard {
    /// All standard sizes.
    pub const ALL: [PalletStandard; 4] = [Self::Gma, Self::Euro, Self::Jis, Self::Au];

    /// Footprint as (width, depth) in inches.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            Self::Gma => (48.0, 40.0),
            Self::Euro => (47.2, 31.5),
            Self::Jis => (43.3, 43.3),
            Self::Au => (45.9, 45.9),
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gma => "GMA",
            Self::Euro => "Euro",
            Self::Jis => "JIS",
            Self::Au => "AU",
        }
    }
}

/// The footprint every layer of the stack is bounded by.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pallet {
    /// Size along x.
    pub width: f64,
    /// Size along z.
    pub depth: f64,
}

impl Pallet {
    /// Creates a custom pallet.
    pub fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }

    /// Creates a pallet of a standard size.
    pub fn standard(standard: PalletStandard) -> Self {
        let (width, depth) = standard.dimensions();
        Self::new(width, depth)
    }

    /// Center of the footprint along x.
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

impl From<PalletStandard> for Pallet {
    fn from(standard: PalletStandard) -> Self {
        Self::standard(standard)
    }
}

impl Default for Pallet {
    fn default() -> Self {
        Self::standard(PalletStandard::Gma)
    }
}

impl Boundary for Pallet {
    fn footprint(&self) -> (f64, f64) {
        (self.width, self.depth)
    }

    fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.depth.is_finite() && self.depth > 0.0)
        {
            return Err(Error::InvalidPallet(format!(
                "footprint must be positive and finite, got {} x {}",
                self.width, self.depth
            )));
        }
        Ok(())
    }
}
