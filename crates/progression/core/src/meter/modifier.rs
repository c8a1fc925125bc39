//! Modifiers - composable transformations of a meter's maximum.
//!
//! A modifier is an immutable value object: kind, operand, and whether
//! changing it should proportionally rescale the meter's current value.
//! Once accepted into a meter's stack the modifier is owned exclusively
//! by that stack; callers keep a [`ModifierId`] handle for removal.

use core::fmt;

use super::number::MeterNumber;

/// The operation a modifier applies to the running maximum.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    Multiply,
    Divide,
    Add,
    Subtract,
}

/// A single max-reshaping modifier.
///
/// Construction normalizes a zero operand for [`ModifierKind::Multiply`]
/// and [`ModifierKind::Divide`] to 1: a zero multiplier or divisor is
/// meaningless and coerces to identity. Zero stays as-is for Add and
/// Subtract; a no-op modifier is intentionally permitted there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier<T: MeterNumber> {
    kind: ModifierKind,
    value: T,
    proportional_scaling: bool,
}

impl<T: MeterNumber> Modifier<T> {
    /// Create a modifier, normalizing zero multipliers/divisors to 1.
    pub fn new(kind: ModifierKind, value: T, proportional_scaling: bool) -> Self {
        let value = match kind {
            ModifierKind::Multiply | ModifierKind::Divide if value == T::ZERO => T::ONE,
            _ => value,
        };
        Self {
            kind,
            value,
            proportional_scaling,
        }
    }

    /// The operation this modifier applies.
    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    /// The operand, post-normalization.
    pub fn value(&self) -> T {
        self.value
    }

    /// Whether adding/removing this modifier rescales `current` by the
    /// old-max/new-max ratio.
    pub fn proportional_scaling(&self) -> bool {
        self.proportional_scaling
    }
}

/// Non-owning handle to a modifier accepted into a meter's stack.
///
/// Handles are issued by [`super::Meter::add_modifier`] and identify the
/// modifier for removal. Identity, not value: two modifiers constructed
/// with identical parameters get distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierId(pub(super) u64);

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
