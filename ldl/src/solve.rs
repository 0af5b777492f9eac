///! Triangular solves against the stored factors.
///!
///! Directly grounded on `ldl_lsolve`/`ldl_ltsolve` in the teacher, with the
///! permuted bracketing (`P·b`, ..., `Pᵀ·x`) generalized from
///! `LdlNumeric::solve`'s `&self.symbolic.perm * &rhs[..]` / `&pinv * &x` to
///! reuse a caller-supplied scratch vector instead of allocating, per the
///! "no allocation after construction" rule (spec §5).

use num_traits::Num;
use qd_sparse::{CscMatView, Permutation};

/// `(L+I) y = b`, in place: `for i in 0..n, for (row, val) in column i of L:
/// y[row] -= val * y[i]`.
pub fn lsolve<N: Copy + Num>(l: CscMatView<N>, y: &mut [N]) {
    for (col, rows, vals) in l.outer_iterator() {
        let y_col = y[col];
        for (&row, &val) in rows.iter().zip(vals.iter()) {
            y[row] = y[row] - val * y_col;
        }
    }
}

/// `(L+I)ᵀ y = b`, in place, visiting columns from `n-1` down to `0`.
pub fn ltsolve<N: Copy + Num>(l: CscMatView<N>, y: &mut [N]) {
    for (col, rows, vals) in l.outer_iterator().rev() {
        let mut y_col = y[col];
        for (&row, &val) in rows.iter().zip(vals.iter()) {
            y_col = y_col - val * y[row];
        }
        y[col] = y_col;
    }
}

/// `y .*= Dinv`, in place.
pub fn diag_solve<N: Copy + Num>(dinv: &[N], y: &mut [N]) {
    for (yi, &di) in y.iter_mut().zip(dinv.iter()) {
        *yi = *yi * di;
    }
}

/// Solve `A x = b` against the stored factors, in place: `b` is permuted
/// into `scratch`, the three triangular/diagonal stages run, and the
/// result is un-permuted back into `b`. `scratch` must have length `n`.
///
/// With no permutation, runs directly on `b` and `scratch` is unused.
pub fn solve_in_place<N: Copy + Num>(
    perm: Option<&Permutation>,
    l: CscMatView<N>,
    dinv: &[N],
    b: &mut [N],
    scratch: &mut [N],
) {
    match perm {
        Some(p) => {
            p.apply(b, scratch);
            lsolve(l, scratch);
            diag_solve(dinv, scratch);
            ltsolve(l, scratch);
            p.apply_inv(scratch, b);
        }
        None => {
            lsolve(l, b);
            diag_solve(dinv, b);
            ltsolve(l, b);
        }
    }
}

#[cfg(test)]
mod test {
    use super::{diag_solve, lsolve, ltsolve};
    use qd_sparse::CscMat;

    #[test]
    fn lsolve_ltsolve_roundtrip_identity_factor() {
        // L = [[1, 0], [2, 1]] stored unit-diagonal-implicit: strict lower
        // part is a single entry (1, 0) = 2.
        let l = CscMat::new_csc(2, 2, vec![0, 1, 1], vec![1], vec![2.0]);
        let mut y = vec![5.0, 1.0];
        lsolve(l.view(), &mut y);
        // y0 = 5; y1 = 1 - 2*5 = -9
        assert_eq!(y, vec![5.0, -9.0]);

        let d = vec![2.0, 4.0];
        diag_solve(&d, &mut y);
        assert_eq!(y, vec![10.0, -36.0]);

        ltsolve(l.view(), &mut y);
        // col 1 first: y1 -= 0 (no entries touching col1 in strict lower
        // of transpose other than row1 itself); col 0: y0 -= 2*y1
        assert_eq!(y, vec![10.0 - 2.0 * -36.0, -36.0]);
    }
}
