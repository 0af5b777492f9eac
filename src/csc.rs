///! Compressed sparse column (CSC) matrix storage.
///!
///! Column pointers are `n+1` long with `colptr[0] == 0`; row indices and
///! values are parallel arrays of length `colptr[n]`. Indices are 0-based.
///! Row indices within a column are not required to be sorted.

use num_traits::Num;

/// A CSC matrix that owns its backing storage.
#[derive(Clone, Debug, PartialEq)]
pub struct CscMat<N> {
    nrows: usize,
    ncols: usize,
    colptr: Vec<usize>,
    rowind: Vec<usize>,
    values: Vec<N>,
}

/// A borrowed view into CSC matrix storage.
#[derive(Clone, Copy, Debug)]
pub struct CscMatView<'a, N> {
    nrows: usize,
    ncols: usize,
    colptr: &'a [usize],
    rowind: &'a [usize],
    values: &'a [N],
}

impl<N> CscMat<N> {
    /// Build a CSC matrix from its raw components.
    ///
    /// # Panics
    ///
    /// * if `colptr` is not of length `ncols + 1`
    /// * if `colptr` does not start at 0 or is not non-decreasing
    /// * if `rowind` and `values` do not both have length `colptr[ncols]`
    pub fn new_csc(
        nrows: usize,
        ncols: usize,
        colptr: Vec<usize>,
        rowind: Vec<usize>,
        values: Vec<N>,
    ) -> Self {
        assert_eq!(colptr.len(), ncols + 1, "colptr should have length ncols + 1");
        assert_eq!(colptr[0], 0, "colptr should start at 0");
        assert!(
            colptr.windows(2).all(|w| w[0] <= w[1]),
            "colptr should be non-decreasing"
        );
        let nnz = colptr[ncols];
        assert_eq!(rowind.len(), nnz, "rowind should have length colptr[ncols]");
        assert_eq!(values.len(), nnz, "values should have length colptr[ncols]");
        CscMat {
            nrows,
            ncols,
            colptr,
            rowind,
            values,
        }
    }

    /// The number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.nrows
    }

    /// The number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.ncols
    }

    /// The number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.colptr[self.ncols]
    }

    /// The column pointer array, length `cols() + 1`.
    #[inline]
    pub fn colptr(&self) -> &[usize] {
        &self.colptr
    }

    /// The row indices, parallel to `values()`.
    #[inline]
    pub fn rowind(&self) -> &[usize] {
        &self.rowind
    }

    /// The stored values, parallel to `rowind()`.
    #[inline]
    pub fn values(&self) -> &[N] {
        &self.values
    }

    /// A mutable view of the stored values; shape is frozen.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [N] {
        &mut self.values
    }

    /// Split borrow of the column pointers, row indices, and mutable values,
    /// for callers that need to read the pattern while writing values.
    #[inline]
    pub fn pattern_and_values_mut(&mut self) -> (&[usize], &[usize], &mut [N]) {
        (&self.colptr, &self.rowind, &mut self.values)
    }

    /// Borrow this matrix as a view.
    pub fn view(&self) -> CscMatView<N> {
        CscMatView {
            nrows: self.nrows,
            ncols: self.ncols,
            colptr: &self.colptr,
            rowind: &self.rowind,
            values: &self.values,
        }
    }
}

impl<'a, N> CscMatView<'a, N> {
    /// Wrap raw CSC arrays as a view without copying.
    pub fn new(
        nrows: usize,
        ncols: usize,
        colptr: &'a [usize],
        rowind: &'a [usize],
        values: &'a [N],
    ) -> Self {
        assert_eq!(colptr.len(), ncols + 1, "colptr should have length ncols + 1");
        CscMatView {
            nrows,
            ncols,
            colptr,
            rowind,
            values,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.colptr[self.ncols]
    }

    #[inline]
    pub fn colptr(&self) -> &'a [usize] {
        self.colptr
    }

    #[inline]
    pub fn rowind(&self) -> &'a [usize] {
        self.rowind
    }

    #[inline]
    pub fn values(&self) -> &'a [N] {
        self.values
    }

    /// Row indices and values stored in column `col`.
    #[inline]
    pub fn outer_view(&self, col: usize) -> (&'a [usize], &'a [N]) {
        let start = self.colptr[col];
        let stop = self.colptr[col + 1];
        (&self.rowind[start..stop], &self.values[start..stop])
    }

    /// Iterate over the columns as `(col, row_indices, values)` triples.
    pub fn outer_iterator(&self) -> impl DoubleEndedIterator<Item = (usize, &'a [usize], &'a [N])> {
        let colptr = self.colptr;
        let rowind = self.rowind;
        let values = self.values;
        (0..self.ncols).map(move |c| {
            let start = colptr[c];
            let stop = colptr[c + 1];
            (c, &rowind[start..stop], &values[start..stop])
        })
    }

    /// Whether every stored entry `(rowval, col)` satisfies `rowval <= col`,
    /// and, for every non-empty column, whether its last stored entry is the
    /// diagonal.
    pub fn is_triu_diag_last(&self) -> bool {
        if self.nrows != self.ncols {
            return false;
        }
        for (col, rows, _) in self.outer_iterator() {
            if rows.is_empty() {
                continue;
            }
            if rows.iter().any(|&r| r > col) {
                return false;
            }
            if *rows.last().unwrap() != col {
                return false;
            }
        }
        true
    }
}

/// Project a square CSC matrix onto its upper triangle, moving the diagonal
/// entry of each column (if stored) to the end of the column so that it
/// becomes the last stored entry, per the upper-triangular invariant used
/// throughout this crate's consumers.
///
/// Entries with `rowval > col` are dropped; relative order of the remaining
/// entries within a column is otherwise preserved.
pub fn triu<N: Clone + Num>(mat: CscMatView<N>) -> CscMat<N> {
    let n = mat.cols();
    let mut colptr = vec![0usize; n + 1];
    let mut rowind = Vec::with_capacity(mat.nnz());
    let mut values = Vec::with_capacity(mat.nnz());
    for (col, rows, vals) in mat.outer_iterator() {
        let mut diag: Option<(usize, N)> = None;
        for (&r, v) in rows.iter().zip(vals.iter()) {
            if r > col {
                continue;
            }
            if r == col {
                diag = Some((r, v.clone()));
            } else {
                rowind.push(r);
                values.push(v.clone());
            }
        }
        if let Some((r, v)) = diag {
            rowind.push(r);
            values.push(v);
        }
        colptr[col + 1] = rowind.len();
    }
    CscMat::new_csc(mat.rows(), n, colptr, rowind, values)
}
