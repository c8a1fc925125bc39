//! Bounded resource meters - the stat engine.
//!
//! A [`Meter`] tracks a current value inside `[0, max]`, where `max` is
//! derived by folding an ordered stack of [`Modifier`]s over an immutable
//! base. Folding is sequential and order-sensitive: each step's output is
//! the next step's input, so removal recomputes the max from the base
//! instead of trying to invert one step (integer division loses
//! information; the fold steps are not independently invertible).
//!
//! The meter never fails after construction. Invalid inputs are absorbed
//! by policy: zero-amount mutations signal a no-op via `false`, modifiers
//! whose fold would overflow or zero the max are silently rejected, and
//! point arithmetic clamps at the bounds.

mod modifier;
mod number;

pub use modifier::{Modifier, ModifierId, ModifierKind};
pub use number::MeterNumber;

use crate::error::MeterError;

/// A modifier accepted into the stack, tagged with its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct ModifierEntry<T: MeterNumber> {
    id: ModifierId,
    modifier: Modifier<T>,
}

/// A bounded numeric resource with a modifier-reshaped maximum.
///
/// Generic over any [`MeterNumber`] (unsigned, at least 16 bits wide).
///
/// # Invariants
///
/// - `base_max > 0` and `max > 0` always.
/// - `0 <= current` always; `current <= max` except through the one
///   documented permissive path (a non-proportional modifier shrinking
///   the max below an existing `current`, see [`Meter::add_modifier`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter<T: MeterNumber> {
    current: T,
    base_max: T,
    max: T,
    modifiers: Vec<ModifierEntry<T>>,
    next_id: u64,
}

impl<T: MeterNumber> Meter<T> {
    /// Create a meter with the given starting value and maximum.
    ///
    /// The only hard failure in the crate: a zero `max` is rejected. An
    /// `initial` above `max` is silently clamped to `max`.
    pub fn new(initial: T, max: T) -> Result<Self, MeterError> {
        if max == T::ZERO {
            return Err(MeterError::InvalidMaximum);
        }
        Ok(Self {
            current: initial.min(max),
            base_max: max,
            max,
            modifiers: Vec::new(),
            next_id: 0,
        })
    }

    /// Current value.
    pub fn current(&self) -> T {
        self.current
    }

    /// Alias for [`Meter::current`].
    pub fn value(&self) -> T {
        self.current
    }

    /// Effective maximum after all modifiers.
    pub fn max(&self) -> T {
        self.max
    }

    /// The immutable maximum the modifier stack folds over.
    pub fn base_max(&self) -> T {
        self.base_max
    }

    /// Number of modifiers currently in the stack.
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// True when at least one modifier is applied.
    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// Add points, clamped at the effective maximum.
    ///
    /// Returns `true` when the full amount was applied; `false` when the
    /// addition overflowed or exceeded `max` (current clamps to `max`).
    pub fn add(&mut self, points: T) -> bool {
        match self.current.checked_add(points) {
            Some(value) if value <= self.max => {
                self.current = value;
                true
            }
            _ => {
                self.current = self.max;
                false
            }
        }
    }

    /// Remove points, clamped at zero.
    ///
    /// Returns `true` when the full amount was applied; `false` when the
    /// amount exceeded `current` (current clamps to 0).
    pub fn remove(&mut self, points: T) -> bool {
        match self.current.checked_sub(points) {
            Some(value) => {
                self.current = value;
                true
            }
            None => {
                self.current = T::ZERO;
                false
            }
        }
    }

    /// Apply a modifier to the effective maximum and push it onto the
    /// stack.
    ///
    /// The candidate max is the modifier folded over the *current*
    /// effective max, not the base. A rejected fold (see
    /// [`fold rules`](Meter::remove_modifier)) discards the modifier
    /// entirely and returns `None`. On acceptance the returned
    /// [`ModifierId`] is the caller's removal handle.
    ///
    /// When the modifier requests proportional scaling, `current` is
    /// rescaled by `new_max / old_max`, floored at 1 so rounding never
    /// collapses a nonzero value to 0. Without the flag `current` is left
    /// alone, deliberately even when the new max dips below it; callers
    /// that want re-clamping express it through the proportional flag.
    pub fn add_modifier(&mut self, modifier: Modifier<T>) -> Option<ModifierId> {
        let old_max = self.max;
        let new_max = apply_modifier(old_max, &modifier)?;

        self.max = new_max;
        if modifier.proportional_scaling() {
            self.current = rescale(self.current, old_max, new_max);
        }

        let id = ModifierId(self.next_id);
        self.next_id += 1;
        self.modifiers.push(ModifierEntry { id, modifier });
        Some(id)
    }

    /// Remove a modifier by handle; `false` if it is not in the stack.
    ///
    /// The effective max is recomputed by folding all remaining
    /// modifiers, in original insertion order, over `base_max` from
    /// scratch. Fold rules per kind (running max `m`, operand `v`):
    ///
    /// | Kind     | New value | Rejected when                         |
    /// |----------|-----------|---------------------------------------|
    /// | Multiply | `m * v`   | overflow                              |
    /// | Subtract | `m - v`   | `v >= m` (zero or underflow)          |
    /// | Add      | `m + v`   | overflow                              |
    /// | Divide   | `m / v`   | `v == 0` or result 0                  |
    ///
    /// A rejected step is skipped and the fold continues; this mirrors
    /// the step having been rejected at `add_modifier` time.
    ///
    /// If the removed modifier had proportional scaling, `current` is
    /// rescaled by the max's before/after ratio, floored at 1.
    pub fn remove_modifier(&mut self, id: ModifierId) -> bool {
        let Some(index) = self.modifiers.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let entry = self.modifiers.remove(index);

        let old_max = self.max;
        self.recalculate_max();

        if entry.modifier.proportional_scaling() {
            self.current = rescale(self.current, old_max, self.max);
        }
        true
    }

    /// Drop every modifier and reset the max to the base.
    ///
    /// Returns `false` when the stack is already empty. `current` is
    /// rescaled by the `current/max` ratio captured before the reset and
    /// clamped to the restored base max (no floor of 1 here: a fully
    /// drained meter stays drained).
    pub fn clear_modifiers(&mut self) -> bool {
        if self.modifiers.is_empty() {
            return false;
        }

        let old_max = self.max;
        self.modifiers.clear();
        self.max = self.base_max;

        let scaled = self.current.to_u128() * self.max.to_u128() / old_max.to_u128();
        self.current = T::from_u128_saturating(scaled).min(self.max);
        true
    }

    /// Builder-style [`Meter::add_modifier`] for chained construction.
    ///
    /// Rejected modifiers are dropped silently, as in `add_modifier`;
    /// use `add_modifier` directly when the handle or the rejection
    /// signal matters.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier<T>) -> Self {
        let _ = self.add_modifier(modifier);
        self
    }

    /// Refold the whole stack over the base max.
    fn recalculate_max(&mut self) {
        let mut max = self.base_max;
        for entry in &self.modifiers {
            if let Some(next) = apply_modifier(max, &entry.modifier) {
                max = next;
            }
        }
        self.max = max;
    }
}

/// One fold step: the modifier applied to the running max.
///
/// `None` means the step is rejected: overflow, underflow, or a result
/// of 0, which would break the positive-max invariant.
fn apply_modifier<T: MeterNumber>(max: T, modifier: &Modifier<T>) -> Option<T> {
    match modifier.kind() {
        ModifierKind::Multiply => max.checked_mul(modifier.value()),
        ModifierKind::Divide => max
            .checked_div(modifier.value())
            .filter(|result| *result > T::ZERO),
        ModifierKind::Add => max.checked_add(modifier.value()),
        ModifierKind::Subtract => max
            .checked_sub(modifier.value())
            .filter(|result| *result > T::ZERO),
    }
}

/// Rescale `current` by `new_max / old_max` in widening integer math.
///
/// Floored at 1 for a nonzero input so rounding never zeroes a meter
/// that had something left in it.
fn rescale<T: MeterNumber>(current: T, old_max: T, new_max: T) -> T {
    if old_max == T::ZERO {
        return current;
    }
    let scaled = current.to_u128() * new_max.to_u128() / old_max.to_u128();
    let result = T::from_u128_saturating(scaled);
    if result == T::ZERO && current > T::ZERO {
        T::ONE
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(initial: u32, max: u32) -> Meter<u32> {
        Meter::new(initial, max).expect("valid meter")
    }

    #[test]
    fn construction_rejects_zero_max() {
        assert_eq!(Meter::<u32>::new(10, 0), Err(MeterError::InvalidMaximum));
    }

    #[test]
    fn construction_clamps_initial_to_max() {
        let m = meter(500, 100);
        assert_eq!(m.current(), 100);
        assert_eq!(m.max(), 100);
        assert_eq!(m.base_max(), 100);
    }

    #[test]
    fn add_clamps_and_reports_partial_application() {
        // {initial=50, max=100}: add(60) clamps at 100 and reports false.
        let mut m = meter(50, 100);
        assert!(!m.add(60));
        assert_eq!(m.current(), 100);

        let mut m = meter(50, 100);
        assert!(m.add(50));
        assert_eq!(m.current(), 100);
    }

    #[test]
    fn add_handles_numeric_overflow() {
        let mut m = Meter::<u16>::new(u16::MAX - 1, u16::MAX).expect("valid meter");
        assert!(!m.add(u16::MAX));
        assert_eq!(m.current(), u16::MAX);
    }

    #[test]
    fn remove_clamps_at_zero() {
        let mut m = meter(100, 100);
        assert!(!m.remove(150));
        assert_eq!(m.current(), 0);

        let mut m = meter(100, 100);
        assert!(m.remove(40));
        assert_eq!(m.current(), 60);
    }

    #[test]
    fn multiply_modifier_scales_max_and_current() {
        let mut m = meter(100, 100);
        let id = m.add_modifier(Modifier::new(ModifierKind::Multiply, 2, true));
        assert!(id.is_some());
        assert_eq!(m.max(), 200);
        assert_eq!(m.current(), 200);
        assert_eq!(m.base_max(), 100);
    }

    #[test]
    fn non_proportional_shrink_leaves_current_above_max() {
        // x2 proportional then -30 non-proportional leaves
        // current at 200 over a max of 170. The permissiveness is
        // deliberate; only the proportional flag re-touches current.
        let mut m = meter(100, 100);
        m.add_modifier(Modifier::new(ModifierKind::Multiply, 2, true));
        m.add_modifier(Modifier::new(ModifierKind::Subtract, 30, false));
        assert_eq!(m.max(), 170);
        assert_eq!(m.current(), 200);
    }

    #[test]
    fn rejected_modifiers_leave_state_untouched() {
        let mut m = Meter::<u16>::new(100, 40_000).expect("valid meter");
        // 40_000 * 2 overflows u16
        assert!(m.add_modifier(Modifier::new(ModifierKind::Multiply, 2, true)).is_none());
        // subtracting the whole max would zero it
        assert!(
            m.add_modifier(Modifier::new(ModifierKind::Subtract, 40_000, false))
                .is_none()
        );
        // dividing far enough to floor to 0 is rejected too
        assert!(
            m.add_modifier(Modifier::new(ModifierKind::Divide, 50_000, false))
                .is_none()
        );
        assert_eq!(m.max(), 40_000);
        assert_eq!(m.current(), 100);
        assert!(!m.has_modifiers());
    }

    #[test]
    fn divide_folds_on_current_max_not_base() {
        let mut m = meter(100, 100);
        m.add_modifier(Modifier::new(ModifierKind::Multiply, 3, false));
        m.add_modifier(Modifier::new(ModifierKind::Divide, 2, false));
        // (100 * 3) / 2, not 100 / 2
        assert_eq!(m.max(), 150);
    }

    #[test]
    fn proportional_scaling_floors_at_one() {
        let mut m = meter(1, 1000);
        m.add_modifier(Modifier::new(ModifierKind::Divide, 100, true));
        assert_eq!(m.max(), 10);
        // 1 * 10 / 1000 rounds to 0; the floor keeps it alive at 1
        assert_eq!(m.current(), 1);
    }

    #[test]
    fn remove_modifier_refolds_from_base_in_order() {
        let mut m = meter(100, 100);
        let mul = m
            .add_modifier(Modifier::new(ModifierKind::Multiply, 2, false))
            .expect("accepted");
        let add = m
            .add_modifier(Modifier::new(ModifierKind::Add, 50, false))
            .expect("accepted");
        assert_eq!(m.max(), 250);

        // Removing the multiply leaves only the add: 100 + 50
        assert!(m.remove_modifier(mul));
        assert_eq!(m.max(), 150);
        assert_eq!(m.modifier_count(), 1);

        assert!(m.remove_modifier(add));
        assert_eq!(m.max(), 100);
        assert!(!m.has_modifiers());
    }

    #[test]
    fn remove_modifier_rescales_proportionally() {
        let mut m = meter(100, 100);
        let id = m
            .add_modifier(Modifier::new(ModifierKind::Multiply, 2, true))
            .expect("accepted");
        assert_eq!(m.current(), 200);

        assert!(m.remove_modifier(id));
        assert_eq!(m.max(), 100);
        assert_eq!(m.current(), 100);
    }

    #[test]
    fn remove_unknown_modifier_is_a_noop() {
        let mut m = meter(50, 100);
        let id = m
            .add_modifier(Modifier::new(ModifierKind::Add, 10, false))
            .expect("accepted");
        assert!(m.remove_modifier(id));
        // the handle is dead now
        assert!(!m.remove_modifier(id));
        assert_eq!(m.max(), 100);
        assert_eq!(m.current(), 50);
    }

    #[test]
    fn removal_skips_steps_that_no_longer_fold() {
        let mut m = Meter::<u16>::new(10, 20_000).expect("valid meter");
        let div = m
            .add_modifier(Modifier::new(ModifierKind::Divide, 2, false))
            .expect("accepted");
        // accepted against max 10_000; against the base 20_000 it overflows
        let mul = m
            .add_modifier(Modifier::new(ModifierKind::Multiply, 4, false))
            .expect("accepted");
        assert_eq!(m.max(), 40_000);

        // Refolding without the divide: the x4 step overflows u16 and is
        // skipped, so the max falls back to the bare base.
        assert!(m.remove_modifier(div));
        assert_eq!(m.max(), 20_000);
        let _ = mul;
    }

    #[test]
    fn clear_modifiers_restores_base_and_keeps_fullness() {
        let mut m = meter(100, 100);
        m.add_modifier(Modifier::new(ModifierKind::Multiply, 4, true));
        m.remove(200); // current 200 of max 400
        assert!(m.clear_modifiers());
        assert_eq!(m.max(), 100);
        assert_eq!(m.current(), 50);
        assert!(!m.has_modifiers());

        // empty stack reports a no-op
        assert!(!m.clear_modifiers());
    }

    #[test]
    fn clear_modifiers_clamps_to_base_max() {
        // Leave current above max through the permissive path, then clear:
        // the ratio rescale is clamped so current cannot exceed the base.
        let mut m = meter(100, 100);
        m.add_modifier(Modifier::new(ModifierKind::Multiply, 2, true));
        m.add_modifier(Modifier::new(ModifierKind::Subtract, 30, false));
        assert_eq!(m.current(), 200);
        assert!(m.clear_modifiers());
        // 200 * 100 / 170 = 117, clamped to 100
        assert_eq!(m.current(), 100);
        assert_eq!(m.max(), 100);
    }

    #[test]
    fn with_modifier_chains() {
        let m = meter(100, 100)
            .with_modifier(Modifier::new(ModifierKind::Multiply, 2, false))
            .with_modifier(Modifier::new(ModifierKind::Add, 25, false));
        assert_eq!(m.max(), 225);
        assert_eq!(m.modifier_count(), 2);
    }

    #[test]
    fn handles_stay_unique_across_removals() {
        let mut m = meter(50, 100);
        let first = m
            .add_modifier(Modifier::new(ModifierKind::Add, 10, false))
            .expect("accepted");
        assert!(m.remove_modifier(first));
        let second = m
            .add_modifier(Modifier::new(ModifierKind::Add, 10, false))
            .expect("accepted");
        assert_ne!(first, second);
        assert!(!m.remove_modifier(first));
        assert!(m.remove_modifier(second));
    }

    #[test]
    fn works_across_value_widths() {
        let mut wide = Meter::<u64>::new(1 << 50, 1 << 60).expect("valid meter");
        wide.add_modifier(Modifier::new(ModifierKind::Multiply, 2, true));
        assert_eq!(wide.max(), 1 << 61);
        assert_eq!(wide.current(), 1 << 51);

        let mut narrow = Meter::<u16>::new(10, 100).expect("valid meter");
        assert!(narrow.add(5));
        assert_eq!(narrow.current(), 15);
    }
}
