///! Compressed sparse column substrate.
///!
///! This crate provides the small set of data structures a direct sparse
///! factorization needs and nothing else: a compressed sparse column (CSC)
///! matrix (owned and borrowed), a permutation that can be applied to dense
///! vectors, and an elimination forest (a parent array over `0..n`, as built
///! by elimination-tree algorithms).
///!
///! It deliberately does not provide triplet construction, dense conversion,
///! CSR support, or any of the broader sparse linear algebra a general
///! purpose sparse matrix crate would offer — those are out of scope for the
///! factorization engine built on top of this crate.

mod csc;
mod forest;
mod perm;

pub use csc::{triu, CscMat, CscMatView};
pub use forest::{EliminationForest, ROOT};
pub use perm::Permutation;
