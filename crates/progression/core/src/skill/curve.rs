//! Growth curves - points required per level.
//!
//! A [`GrowthCurve`] is a pure function from a target level to the
//! cumulative points required to reach it. Nothing here is stored or
//! cached: callers recompute on demand, and every arithmetic step
//! saturates at [`POINT_MAX`] instead of wrapping.

use crate::arith::{POINT_MAX, integer_sqrt, saturating_pow};

/// The shape of the points-required growth curve.
///
/// `L` is the target level, `x`/`y`/`z` the curve's tuning factors:
///
/// | Formula     | Definition                                      |
/// |-------------|-------------------------------------------------|
/// | Linear      | `x*y + z*L`                                     |
/// | Logarithmic | `x * floor(log2(y*L + z))`; 0 if `y*L + z = 0`  |
/// | Exponential | `x` if `L <= z+1`, else `x * y^(L-(z+1))`       |
/// | Quadratic   | `x*L^2 + y*L + z`                               |
/// | Cubic       | `x*L^3`                                         |
/// | Step        | `x * floor((L+z) / y)`; saturates if `y = 0`    |
/// | Root        | `x * floor(sqrt(L+y)) + z`                      |
/// | Inverse     | `x / (y+L) + z`; saturates if `y+L = 0`         |
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GrowthFormula {
    Linear,
    Logarithmic,
    #[default]
    Exponential,
    Quadratic,
    Cubic,
    Step,
    Root,
    Inverse,
}

/// A growth formula together with its tuning factors.
///
/// Factors are deliberately narrow (`u16`): curve parameters come from
/// game data, and narrow inputs keep the saturating `u64` math honest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthCurve {
    formula: GrowthFormula,
    factor_x: u16,
    factor_y: u16,
    factor_z: u16,
}

impl GrowthCurve {
    /// Create a curve from a formula and its three factors.
    pub const fn new(formula: GrowthFormula, x: u16, y: u16, z: u16) -> Self {
        Self {
            formula,
            factor_x: x,
            factor_y: y,
            factor_z: z,
        }
    }

    /// The formula this curve evaluates.
    pub const fn formula(&self) -> GrowthFormula {
        self.formula
    }

    /// Tuning factors `(x, y, z)`.
    pub const fn factors(&self) -> (u16, u16, u16) {
        (self.factor_x, self.factor_y, self.factor_z)
    }

    /// Cumulative points required to reach `target_level`.
    ///
    /// Pure and total: never traps, never wraps. Any step that would
    /// overflow returns [`POINT_MAX`] instead.
    pub fn points_required(&self, target_level: u64) -> u64 {
        match self.formula {
            GrowthFormula::Linear => self.linear(target_level),
            GrowthFormula::Logarithmic => self.logarithmic(target_level),
            GrowthFormula::Exponential => self.exponential(target_level),
            GrowthFormula::Quadratic => self.quadratic(target_level),
            GrowthFormula::Cubic => self.cubic(target_level),
            GrowthFormula::Step => self.step(target_level),
            GrowthFormula::Root => self.root(target_level),
            GrowthFormula::Inverse => self.inverse(target_level),
        }
    }

    fn x(&self) -> u64 {
        u64::from(self.factor_x)
    }

    fn y(&self) -> u64 {
        u64::from(self.factor_y)
    }

    fn z(&self) -> u64 {
        u64::from(self.factor_z)
    }

    /// `x*y + z*L`
    fn linear(&self, level: u64) -> u64 {
        self.x()
            .saturating_mul(self.y())
            .saturating_add(self.z().saturating_mul(level))
    }

    /// `x * floor(log2(y*L + z))`, 0 when the log argument is 0.
    fn logarithmic(&self, level: u64) -> u64 {
        let sum = self.y().saturating_mul(level).saturating_add(self.z());
        if sum == 0 {
            return 0;
        }
        self.x().saturating_mul(u64::from(sum.ilog2()))
    }

    /// `x` up to level `z+1`, then `x * y^(L-(z+1))`.
    fn exponential(&self, level: u64) -> u64 {
        let threshold = self.z() + 1;
        if level <= threshold {
            return self.x();
        }
        self.x().saturating_mul(saturating_pow(self.y(), level - threshold))
    }

    /// `x*L^2 + y*L + z`
    fn quadratic(&self, level: u64) -> u64 {
        let squared = level.saturating_mul(level);
        self.x()
            .saturating_mul(squared)
            .saturating_add(self.y().saturating_mul(level))
            .saturating_add(self.z())
    }

    /// `x*L^3`
    fn cubic(&self, level: u64) -> u64 {
        let cubed = level.saturating_mul(level).saturating_mul(level);
        self.x().saturating_mul(cubed)
    }

    /// `x * floor((L+z) / y)`, saturating when `y = 0`.
    fn step(&self, level: u64) -> u64 {
        let Some(quotient) = level.saturating_add(self.z()).checked_div(self.y()) else {
            return POINT_MAX;
        };
        self.x().saturating_mul(quotient)
    }

    /// `x * floor(sqrt(L+y)) + z`
    fn root(&self, level: u64) -> u64 {
        let root = integer_sqrt(level.saturating_add(self.y()));
        self.x().saturating_mul(root).saturating_add(self.z())
    }

    /// `x / (y+L) + z`, saturating when the denominator is 0.
    fn inverse(&self, level: u64) -> u64 {
        let Some(quotient) = self.x().checked_div(self.y().saturating_add(level)) else {
            return POINT_MAX;
        };
        quotient.saturating_add(self.z())
    }
}

impl Default for GrowthCurve {
    /// Exponential curve with all factors at 1.
    fn default() -> Self {
        Self::new(GrowthFormula::default(), 1, 1, 1)
    }
}
