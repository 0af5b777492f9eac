///! Error taxonomy for the factorization engine.
///!
///! Every error is fatal to the operation that raised it; none are retried
///! internally. Operations either complete fully or leave the object in its
///! pre-call state, with the single documented exception of `refactor`
///! leaving the factors in an indeterminate state after `Singular`.

use thiserror::Error;

/// Errors raised by symbolic analysis, numeric factorization, solves, and
/// updates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LdlError {
    /// The matrix is not square, `iperm` is not a permutation, or an update
    /// was given a dimension-mismatched argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A stored entry violates the upper-triangular invariant (`rowval >
    /// col` after triangulation), or the elimination tree found `i > j`.
    #[error("matrix is not upper-triangular")]
    NotUpperTriangular,

    /// A column has no diagonal entry as its last stored entry.
    #[error("column {0} has no diagonal entry")]
    MissingDiagonal(usize),

    /// A column has zero stored entries.
    #[error("column {0} is empty")]
    EmptyColumn(usize),

    /// A pivot evaluated to exactly zero during numeric factorization.
    #[error("pivot {0} is exactly singular")]
    Singular(usize),

    /// `solve` was called on a logical-only factorization.
    #[error("cannot solve against a logical-only factorization")]
    LogicalOnly,

    /// `solve` was called on a factorization that has never succeeded, or
    /// that was left indeterminate by a prior `Singular` error or a value
    /// update that has not yet been followed by `refactor`.
    #[error("factorization is not in a valid, solvable state")]
    NotFactored,
}

pub type Result<T> = std::result::Result<T, LdlError>;
