///! Elimination tree construction and per-column `L` nonzero counting.
///!
///! Directly grounded on `sprs-ldl::ldl_symbolic`'s column loop (a `flag`
///! array ensuring each ancestor is charged at most once per column, and
///! the `uproot`/`l_nz[i] += 1` pattern), generalized to operate on any
///! matrix already satisfying the upper-triangular, diagonal-last invariant
///! and to return errors instead of panicking on a malformed input.

use qd_sparse::{CscMatView, EliminationForest};

use crate::error::{LdlError, Result};

/// Compute the elimination tree of `a` and the per-column strict
/// sub-diagonal nonzero count of `L`.
///
/// `a` must satisfy the upper-triangular invariant: every stored entry
/// `(i, j)` has `i <= j`, and the diagonal entry is the last stored entry
/// of its column.
pub fn compute_etree<N>(a: CscMatView<N>) -> Result<(EliminationForest, Vec<usize>)> {
    let n = a.cols();
    let mut forest = EliminationForest::new(n);
    let mut lnz = vec![0usize; n];
    let mut work = vec![usize::MAX; n];

    for j in 0..n {
        let (rows, _) = a.outer_view(j);
        if rows.is_empty() {
            return Err(LdlError::EmptyColumn(j));
        }
        if *rows.last().unwrap() != j {
            return Err(LdlError::MissingDiagonal(j));
        }
        if rows.iter().any(|&i| i > j) {
            return Err(LdlError::NotUpperTriangular);
        }

        work[j] = j;
        for &row in &rows[..rows.len() - 1] {
            let mut i = row;
            while work[i] != j {
                forest.set_parent_if_root(i, j);
                lnz[i] += 1;
                work[i] = j;
                i = forest
                    .parent(i)
                    .expect("i was just re-parented, or already had a parent");
            }
        }
    }

    Ok((forest, lnz))
}
