//! Deterministic numeric engines for game progression mechanics.
//!
//! `progression-core` defines two independent, pure value types that a
//! character system or simulation runtime composes as it sees fit:
//!
//! - [`skill::Skill`]: a leveling engine that converts accumulated
//!   experience points into a level via one of eight growth formulas.
//! - [`meter::Meter`]: a bounded resource (current/max) whose maximum is
//!   reshaped by an ordered stack of composable [`meter::Modifier`]s.
//!
//! All arithmetic is saturating or checked; neither engine can overflow,
//! wrap, or reach an invalid state through its public API. Persistence and
//! display are the caller's concern; both engines expose only in-memory
//! shapes (optionally serde-derived behind the `serde` feature).
pub mod arith;
pub mod error;
pub mod meter;
pub mod skill;

pub use arith::POINT_MAX;
pub use error::MeterError;
pub use meter::{Meter, MeterNumber, Modifier, ModifierId, ModifierKind};
pub use skill::{GrowthCurve, GrowthFormula, LEVEL_MAX, Skill};
