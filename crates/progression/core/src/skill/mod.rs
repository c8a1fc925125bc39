//! Skill leveling - the growth curve engine.
//!
//! A [`Skill`] owns a level/points pair and a [`GrowthCurve`]. Points are
//! spent greedily against the curve's per-level requirements; all mutation
//! is reversible (add/remove points, add/remove levels) and total: no-op
//! inputs return `false`, everything else returns `true` even when an
//! operation saturates at a boundary.
//!
//! # Invariants
//!
//! - `current_level >= 1` after every public call.
//! - `current_points` stays below the next level's requirement under
//!   normal mutation; at the level cap it freezes at the terminal
//!   requirement (see [`Skill::points`]).
//! - The bonus overlay only changes the *reported* level, never the
//!   stored one.

mod curve;

pub use curve::{GrowthCurve, GrowthFormula};

use crate::arith::POINT_MAX;

/// Hard ceiling for skill levels.
pub const LEVEL_MAX: u16 = u16::MAX;

/// A leveling track: growth curve, level cap, and current progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    curve: GrowthCurve,
    /// Maximum allowed level; 0 means uncapped (ceiling is [`LEVEL_MAX`]).
    max_level: u16,
    current_level: u16,
    current_points: u64,
    /// Additive overlay on the reported level; never persisted into
    /// `current_level` and may be negative.
    bonus_level: i16,
}

impl Skill {
    /// Create a skill at level 1 with no points banked.
    ///
    /// `max_level` of 0 means uncapped.
    pub const fn new(curve: GrowthCurve, max_level: u16) -> Self {
        Self {
            curve,
            max_level,
            current_level: 1,
            current_points: 0,
            bonus_level: 0,
        }
    }

    /// The growth curve driving this skill's requirements.
    pub const fn curve(&self) -> &GrowthCurve {
        &self.curve
    }

    /// Configured level cap (0 = uncapped).
    pub const fn max_level(&self) -> u16 {
        self.max_level
    }

    /// Current bonus overlay.
    pub const fn bonus_level(&self) -> i16 {
        self.bonus_level
    }

    /// Points banked toward the next level.
    ///
    /// Once a nonzero `max_level` is reached, progress freezes at the
    /// terminal requirement: this returns `points_required(max_level)`
    /// rather than whatever was last banked.
    pub fn points(&self) -> u64 {
        if self.max_level > 0 && self.current_level >= self.max_level {
            return self.curve.points_required(u64::from(self.max_level));
        }
        self.current_points
    }

    /// Reported level, optionally including the bonus overlay.
    ///
    /// The combined total is clamped to `[1, LEVEL_MAX]`: maxing both the
    /// stored level and the bonus still reports at most [`LEVEL_MAX`], and
    /// a large negative bonus floors at 1 rather than wrapping.
    pub fn level(&self, count_bonus: bool) -> u16 {
        if !count_bonus || self.bonus_level == 0 {
            return self.current_level;
        }
        let total = i32::from(self.current_level) + i32::from(self.bonus_level);
        total.clamp(1, i32::from(LEVEL_MAX)) as u16
    }

    /// Overwrite the bonus overlay unconditionally.
    pub fn set_bonus(&mut self, level: i16) {
        self.bonus_level = level;
    }

    /// Integer percentage of progress toward the next level.
    ///
    /// Nominally 0-100; points banked past the next requirement (possible
    /// after `add_levels(save_progress)` across a shrinking curve) can
    /// push it above 100, saturating at `u8::MAX`. Returns 0 when either
    /// the banked points or the next requirement is 0.
    pub fn percent(&self) -> u8 {
        let required = self.curve.points_required(u64::from(self.current_level) + 1);
        if self.current_points == 0 || required == 0 {
            return 0;
        }
        let raw = u128::from(self.current_points) * 100 / u128::from(required);
        u8::try_from(raw).unwrap_or(u8::MAX)
    }

    /// Add points, leveling up greedily while requirements are met.
    ///
    /// Walks level by level: a requirement of 0 or [`POINT_MAX`] is an
    /// absorbing tier that banks the remainder as-is, and reaching the
    /// level cap discards whatever is left. Returns `false` only for a
    /// zero-point no-op.
    pub fn add_points(&mut self, points: u64) -> bool {
        if points == 0 {
            return false;
        }

        let cap = self.effective_cap();
        let mut remaining = points;
        let mut level = self.current_level;
        let mut banked = self.current_points;

        loop {
            if level >= cap {
                banked = 0;
                break;
            }

            let required = self.curve.points_required(u64::from(level) + 1);
            if required == 0 || required == POINT_MAX {
                banked = banked.saturating_add(remaining);
                break;
            }

            // Banked progress normally sits below the requirement; the
            // saturating_sub covers points carried across a shrinking curve.
            let deficit = required.saturating_sub(banked);
            if remaining >= deficit {
                remaining -= deficit;
                level += 1;
                banked = 0;
            } else {
                banked += remaining;
                break;
            }
        }

        self.current_level = level;
        self.current_points = banked;
        true
    }

    /// Remove points, de-leveling one level at a time as needed.
    ///
    /// Drains banked points first; any remainder de-levels, consuming the
    /// requirement of each level descended. A removal that lands inside a
    /// level's band drops that level and banks the unconsumed part of its
    /// requirement, so a matching [`Skill::add_points`] restores the exact
    /// prior state (absent saturation). Level floors at 1 and points floor
    /// at 0 once level 1 is reached. Returns `false` only for a zero-point
    /// no-op.
    pub fn remove_points(&mut self, points: u64) -> bool {
        if points == 0 {
            return false;
        }

        let mut remaining = points;
        let mut level = self.current_level;
        let mut banked = self.current_points;

        if remaining >= banked {
            remaining -= banked;
            banked = 0;
        } else {
            banked -= remaining;
            remaining = 0;
        }

        while remaining > 0 && level > 1 {
            let required = self.curve.points_required(u64::from(level));
            if remaining >= required {
                remaining -= required;
                level -= 1;
            } else {
                banked = required - remaining;
                level -= 1;
                remaining = 0;
            }
        }

        self.current_level = level;
        self.current_points = banked;
        true
    }

    /// Raise the level directly, optionally preserving partial progress.
    ///
    /// With `save_progress`, the fraction `current_points /
    /// points_required(current_level)` is carried over and re-derived
    /// against the new level's requirement; otherwise points reset to 0.
    /// The result is capped at `max_level` (or [`LEVEL_MAX`] when
    /// uncapped). Returns `false` only for a zero-level no-op.
    pub fn add_levels(&mut self, levels: u16, save_progress: bool) -> bool {
        if levels == 0 {
            return false;
        }

        let cap = self.effective_cap();
        let target = u32::from(self.current_level) + u32::from(levels);
        let new_level = if target >= u32::from(cap) {
            cap
        } else {
            target as u16
        };
        self.rebase_level(new_level, save_progress);
        true
    }

    /// Lower the level directly, flooring at 1.
    ///
    /// Progress handling mirrors [`Skill::add_levels`]. Returns `false`
    /// only for a zero-level no-op.
    pub fn remove_levels(&mut self, levels: u16, save_progress: bool) -> bool {
        if levels == 0 {
            return false;
        }

        let new_level = self.current_level.saturating_sub(levels).max(1);
        self.rebase_level(new_level, save_progress);
        true
    }

    /// The level at which point gain stops.
    fn effective_cap(&self) -> u16 {
        if self.max_level == 0 {
            LEVEL_MAX
        } else {
            self.max_level
        }
    }

    /// Move to `new_level`, rescaling banked points by the progress
    /// fraction when requested.
    ///
    /// The fraction's denominator is the *current* level's requirement
    /// and its numerator the banked points; the new points are that
    /// fraction of the new level's requirement, computed in widening
    /// integer math (no floats, deterministic rounding toward zero).
    fn rebase_level(&mut self, new_level: u16, save_progress: bool) {
        let old_required = self.curve.points_required(u64::from(self.current_level));
        let points = self.current_points;
        self.current_level = new_level;
        self.current_points = if save_progress && points > 0 && old_required > 0 {
            let new_required = self.curve.points_required(u64::from(new_level));
            let scaled = u128::from(points) * u128::from(new_required) / u128::from(old_required);
            u64::try_from(scaled).unwrap_or(u64::MAX)
        } else {
            0
        };
    }
}

impl Default for Skill {
    /// Uncapped skill on the default (flat exponential) curve.
    fn default() -> Self {
        Self::new(GrowthCurve::default(), 0)
    }
}
