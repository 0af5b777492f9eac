use approx::assert_relative_eq;
use qd_sparse::{CscMat, CscMatView};
use qd_sparse_ldl::{QdldlNumeric, QdldlSymbolic};

fn diag3(values: [f64; 3]) -> CscMat<f64> {
    CscMat::new_csc(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], values.to_vec())
}

#[test]
fn s2_no_regularization_triggered() {
    let a = diag3([2.0, -3.0, 5.0]);
    let dsigns = vec![1.0, -1.0, 1.0];
    let numeric = QdldlNumeric::new(a.view(), None, Some(dsigns), 1e-12, 1e-7, false).unwrap();

    assert_eq!(numeric.d(), &[2.0, -3.0, 5.0]);
    assert_eq!(numeric.positive_inertia(), 2);
    assert_eq!(numeric.regularized_entries(), 0);
}

#[test]
fn dsigns_follow_the_permutation_not_the_original_column_order() {
    // Original column 0 carries the tiny pivot that needs regularizing, with
    // a `+1` sign prescription in original-column order. Under `iperm`,
    // original column 0 is stored at permuted column 2, so a `dsigns` that
    // is naively applied in storage order (without the §9 permutation)
    // would check the wrong sign against the wrong pivot and miss the
    // regularization event entirely.
    let a = diag3([1e-15, -1.0, 1.0]);
    let dsigns = vec![1.0, -1.0, 1.0];
    let iperm = vec![2, 0, 1];
    let numeric =
        QdldlNumeric::new(a.view(), Some(iperm), Some(dsigns), 1e-12, 1e-7, false).unwrap();

    assert_eq!(numeric.regularized_entries(), 1);
    assert_eq!(numeric.positive_inertia(), 2);
}

#[test]
fn s4_arrowhead_fill_pattern_is_dense_last_column() {
    // |2       1|
    // |  2     1|
    // |    2   1|
    // |      2 1|
    // |1 1 1 1 2|
    let a = CscMat::new_csc(
        5,
        5,
        vec![0, 2, 4, 6, 8, 9],
        vec![0, 4, 1, 4, 2, 4, 3, 4, 4],
        vec![2., 1., 2., 1., 2., 1., 2., 1., 2.],
    );
    let numeric = QdldlNumeric::new(a.view(), None, None, 1e-12, 1e-7, false).unwrap();

    // Every off-diagonal column (0..3) contributes exactly one entry to L,
    // landing in the dense last column; the last column itself is empty.
    let lp = numeric.symbolic().lp();
    for col in 0..4 {
        assert_eq!(lp[col + 1] - lp[col], 1);
        let row = numeric.li()[lp[col]];
        assert_eq!(row, 4);
    }
    assert_eq!(lp[5] - lp[4], 0);
}

#[test]
fn s5_update_diagonal_then_refactor_matches_fresh_factorization() {
    let a = CscMat::new_csc(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![4., 1., 3.]);
    let mut numeric = QdldlNumeric::new(a.view(), None, None, 1e-12, 1e-7, false).unwrap();

    numeric.update_diagonal(&[0, 1], &[10.0, 10.0]).unwrap();
    numeric.refactor().unwrap();
    let updated = numeric.solve(&[1.0, 2.0]).unwrap();

    let fresh_a = CscMat::new_csc(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![10., 1., 10.]);
    let mut fresh = QdldlNumeric::new(fresh_a.view(), None, None, 1e-12, 1e-7, false).unwrap();
    let fresh_solution = fresh.solve(&[1.0, 2.0]).unwrap();

    assert_relative_eq!(updated[0], fresh_solution[0], epsilon = 1e-12);
    assert_relative_eq!(updated[1], fresh_solution[1], epsilon = 1e-12);
}

#[test]
fn update_values_scale_values_offset_values_then_refactor_matches_fresh_factorization_under_permutation() {
    // Same 3x3 quasidefinite matrix as s6/inertia_is_invariant_under_permutation,
    // factored under a non-identity `iperm` so that the entry-map indices
    // exercised below (`a_to_papt`) are a nontrivial permutation of storage
    // order rather than the identity map.
    //
    // Stored entries of `a`, in original (pre-permutation) index order:
    //   0: (0,0)=4   1: (0,1)=1   2: (1,1)=3
    //   3: (0,2)=1   4: (1,2)=1   5: (2,2)=5
    let a = CscMat::new_csc(
        3,
        3,
        vec![0, 1, 3, 6],
        vec![0, 0, 1, 0, 1, 2],
        vec![4., 1., 3., 1., 1., 5.],
    );
    let iperm = vec![2, 0, 1];
    let b = vec![1.0, 2.0, 3.0];

    let mut numeric =
        QdldlNumeric::new(a.view(), Some(iperm.clone()), None, 1e-12, 1e-7, false).unwrap();

    // update_values: (0,1) 1 -> 2, (0,2) 1 -> 0.5
    numeric.update_values(&[1, 3], &[2.0, 0.5]).unwrap();
    // scale_values: (1,2) 1 -> 1 * 3 = 3
    numeric.scale_values(&[4], 3.0).unwrap();
    // offset_values: (0,0) 4 -> 4 + 1 = 5, (1,1) 3 -> 3 - 1 = 2
    numeric.offset_values(&[0, 2], 1.0, &[1, -1]).unwrap();
    numeric.refactor().unwrap();
    let updated = numeric.solve(&b).unwrap();

    let fresh_a = CscMat::new_csc(
        3,
        3,
        vec![0, 1, 3, 6],
        vec![0, 0, 1, 0, 1, 2],
        vec![5., 2., 2., 0.5, 3., 5.],
    );
    let mut fresh = QdldlNumeric::new(fresh_a.view(), Some(iperm), None, 1e-12, 1e-7, false).unwrap();
    let fresh_solution = fresh.solve(&b).unwrap();

    for i in 0..3 {
        assert_relative_eq!(updated[i], fresh_solution[i], epsilon = 1e-12);
    }
}

#[test]
fn s6_explicit_permutation_matches_unpermuted_solve() {
    // A 3x3 quasidefinite matrix, upper triangle only.
    let a = CscMat::new_csc(
        3,
        3,
        vec![0, 1, 3, 6],
        vec![0, 0, 1, 0, 1, 2],
        vec![4., 1., 3., 1., 1., 5.],
    );
    let b = vec![1.0, 2.0, 3.0];

    let mut unpermuted = QdldlNumeric::new(a.view(), None, None, 1e-12, 1e-7, false).unwrap();
    let x_unpermuted = unpermuted.solve(&b).unwrap();

    let iperm = vec![2, 0, 1];
    let mut permuted =
        QdldlNumeric::new(a.view(), Some(iperm), None, 1e-12, 1e-7, false).unwrap();
    let x_permuted = permuted.solve(&b).unwrap();

    for i in 0..3 {
        assert_relative_eq!(x_unpermuted[i], x_permuted[i], epsilon = 1e-9);
    }
}

#[test]
fn inertia_is_invariant_under_permutation() {
    let a = CscMat::new_csc(
        3,
        3,
        vec![0, 1, 3, 6],
        vec![0, 0, 1, 0, 1, 2],
        vec![4., 1., 3., 1., 1., 5.],
    );
    let unpermuted = QdldlNumeric::new(a.view(), None, None, 1e-12, 1e-7, false).unwrap();
    let permuted =
        QdldlNumeric::new(a.view(), Some(vec![2, 0, 1]), None, 1e-12, 1e-7, false).unwrap();
    assert_eq!(unpermuted.positive_inertia(), permuted.positive_inertia());
}

#[test]
fn residual_bound_holds_for_a_random_looking_quasidefinite_matrix() {
    let a = CscMat::new_csc(
        3,
        3,
        vec![0, 1, 3, 6],
        vec![0, 0, 1, 0, 1, 2],
        vec![4., 1., -3., 1., 1., 5.],
    );
    let b = vec![0.3, -1.2, 2.5];
    let mut numeric = QdldlNumeric::new(a.view(), None, None, 1e-12, 1e-7, false).unwrap();
    let x = numeric.solve(&b).unwrap();

    // Reconstruct A x densely from the upper-triangular storage and compare
    // against b.
    let mut residual = [0.0; 3];
    let view: CscMatView<f64> = a.view();
    for (col, rows, vals) in view.outer_iterator() {
        for (&row, &val) in rows.iter().zip(vals.iter()) {
            residual[row] += val * x[col];
            if row != col {
                residual[col] += val * x[row];
            }
        }
    }
    for i in 0..3 {
        assert_relative_eq!(residual[i], b[i], epsilon = 1e-9);
    }
}
