//! Error types for progression-core.
//!
//! The crate deliberately has a single hard failure: constructing a
//! [`crate::meter::Meter`] with a zero maximum. Every other invalid or
//! boundary input is handled by policy instead (boolean no-op signals,
//! saturation sentinels, silent normalization) so that state is always
//! valid after a public call (see the crate docs).

/// Errors from [`crate::meter::Meter`] construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeterError {
    /// The maximum passed to [`crate::meter::Meter::new`] was zero.
    ///
    /// A meter with no capacity cannot hold the `0 <= current <= max`
    /// invariant in any useful way, so this is rejected up front rather
    /// than patched over.
    #[error("meter maximum must be greater than zero")]
    InvalidMaximum,
}
