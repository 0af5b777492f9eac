///! Symmetric permutation of an upper-triangular CSC matrix.
///!
///! Given the inverse `iperm` of an externally chosen fill-reducing
///! ordering, builds `P` such that `P` is the upper-triangular part of
///! `(perm)·A·(perm)ᵀ`, together with the bijection `AtoPAPt` from `A`'s
///! stored-entry indices to `P`'s stored-entry indices. This is the
///! two-pass count/prefix-sum/fill algorithm of Davis, *Direct Methods for
///! Sparse Linear Systems*, applied to a symmetric upper triangle instead of
///! a general triplet-to-CSC conversion.

use qd_sparse::{CscMat, CscMatView};

use crate::error::{LdlError, Result};

fn is_permutation(p: &[usize]) -> bool {
    let n = p.len();
    let mut seen = vec![false; n];
    for &x in p {
        if x >= n || seen[x] {
            return false;
        }
        seen[x] = true;
    }
    true
}

/// Build `P = (perm)·A·(perm)ᵀ` restricted to its upper triangle, and the
/// entry map from `A`'s stored entries to `P`'s.
///
/// `a` must already satisfy the upper-triangular invariant (diagonal last
/// in every non-empty column); `iperm` must be a permutation of `0..n`.
pub fn perm_symmetric<N: Clone>(
    a: CscMatView<N>,
    iperm: &[usize],
) -> Result<(CscMat<N>, Vec<usize>)> {
    let n = a.cols();
    if a.rows() != n {
        return Err(LdlError::InvalidArgument("matrix must be square"));
    }
    if iperm.len() != n || !is_permutation(iperm) {
        return Err(LdlError::InvalidArgument("iperm is not a permutation of 0..n"));
    }

    let nnz = a.nnz();
    let colptr = a.colptr();
    let rowind = a.rowind();
    let values = a.values();

    // Count pass: how many entries land in each destination column.
    let mut num_entries = vec![0usize; n];
    for col_a in 0..n {
        for &row_a in &rowind[colptr[col_a]..colptr[col_a + 1]] {
            let row_p = iperm[row_a];
            let col_p = iperm[col_a];
            let c = row_p.max(col_p);
            num_entries[c] += 1;
        }
    }

    // Column pointer pass: prefix-sum into Pc, reuse counts as row_starts.
    let mut pc = vec![0usize; n + 1];
    for c in 0..n {
        pc[c + 1] = pc[c] + num_entries[c];
    }
    let mut row_starts = pc[..n].to_vec();

    // Fill pass: revisit entries in the same order.
    let mut pr = vec![0usize; nnz];
    let mut pv: Vec<N> = Vec::with_capacity(nnz);
    // Safety net: fill with a throwaway clone so we can index-assign below
    // without requiring `N: Default`.
    for _ in 0..nnz {
        pv.push(values[0].clone());
    }
    let mut a_to_papt = vec![0usize; nnz];
    for col_a in 0..n {
        let start = colptr[col_a];
        let stop = colptr[col_a + 1];
        for idx in start..stop {
            let row_a = rowind[idx];
            let row_p = iperm[row_a];
            let col_p = iperm[col_a];
            let c = row_p.max(col_p);
            let r = row_p.min(col_p);
            let k = row_starts[c];
            row_starts[c] += 1;
            pr[k] = r;
            pv[k] = values[idx].clone();
            a_to_papt[idx] = k;
        }
    }

    Ok((CscMat::new_csc(n, n, pc, pr, pv), a_to_papt))
}
