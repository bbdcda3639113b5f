//! Error types for multiway.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in multiway.
///
/// Ordinary outcomes such as a missing key or a duplicate insert are not
/// errors; they are reported through `bool` / `Option` return values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The minimum degree cannot produce a valid node shape.
    ///
    /// With `t < 2` a non-root node would be allowed zero keys, so splits
    /// and merges have nothing to work with. Above `usize::MAX / 2` the
    /// node capacity `2t` no longer fits in a `usize`.
    #[error(
        "invalid minimum degree {min_degree}: must be between {} and {}",
        crate::common::config::MIN_DEGREE,
        crate::common::config::MAX_DEGREE
    )]
    InvalidMinDegree { min_degree: usize },

    /// A structural invariant does not hold.
    ///
    /// Only produced by [`BTree::check_invariants`](crate::BTree::check_invariants).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
