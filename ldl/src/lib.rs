///! Direct `LDLᵀ` factorization of sparse quasidefinite symmetric matrices.
///!
///! Ties together, in the teacher's `LdlSymbolic`/`LdlNumeric` two-phase
///! shape, the five algorithmic pieces built up in this crate's other
///! modules: symmetric permutation ([`perm`]), elimination tree construction
///! ([`etree`]), row-wise numeric factorization with dynamic regularization
///! ([`numeric`]), triangular solves ([`solve`]), and indexed partial updates
///! ([`update`]).
///!
///! [`QdldlSymbolic::new`] accepts the upper triangle of a symmetric matrix
///! (triangulating it internally if it is not already in that form) and an
///! optional fill-reducing ordering, and produces the elimination tree and
///! per-column nonzero counts of `L`. [`QdldlSymbolic::factor`] consumes it
///! and runs the first numeric factorization, producing a [`QdldlNumeric`]
///! that owns the factors and can be `solve`d against, `refactor`ed after an
///! update, or updated in place through [`update`].

// The elimination tree, numeric factorization, and triangular solves in this
// crate are adapted from the LDL library by Tim Davis:
//
// LDL Copyright (c) 2005 by Timothy A. Davis.  All Rights Reserved.
//
// LDL License:
//
//     Your use or distribution of LDL or any modified version of
//     LDL implies that you agree to this License.
//
//     This library is free software; you can redistribute it and/or
//     modify it under the terms of the GNU Lesser General Public
//     License as published by the Free Software Foundation; either
//     version 2.1 of the License, or (at your option) any later version.
//
//     This library is distributed in the hope that it will be useful,
//     but WITHOUT ANY WARRANTY; without even the implied warranty of
//     MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
//     Lesser General Public License for more details.
//
//     You should have received a copy of the GNU Lesser General Public
//     License along with this library; if not, write to the Free Software
//     Foundation, Inc., 51 Franklin St, Fifth Floor, Boston, MA  02110-1301
//     USA
//
//     Permission is hereby granted to use or copy this program under the
//     terms of the GNU LGPL, provided that the Copyright, this License,
//     and the Availability of the original version is retained on all copies.
//     User documentation of any code that uses this code or any modified
//     version of this code must cite the Copyright, this License, the
//     Availability note, and "Used by permission." Permission to modify
//     the code and to distribute modified code is granted, provided the
//     Copyright, this License, and the Availability note are retained,
//     and a notice that the code was modified is included.

mod error;
mod etree;
mod numeric;
mod perm;
mod solve;
mod update;
mod workspace;

pub use error::{LdlError, Result};

use num_traits::Num;
use qd_sparse::{CscMat, CscMatView, EliminationForest, Permutation};

use workspace::Workspace;

/// The symbolic analysis of a matrix's sparsity pattern: the permuted upper
/// triangle, the entry map back to it, the elimination tree, and the
/// resulting column pointers of `L`. Independent of the matrix's numeric
/// values; reusable across any number of numeric factorizations that share
/// this pattern.
pub struct QdldlSymbolic<N> {
    n: usize,
    triu_a: CscMat<N>,
    a_to_papt: Vec<usize>,
    perm: Option<Permutation>,
    forest: EliminationForest,
    lp: Vec<usize>,
}

impl<N: Clone + Num> QdldlSymbolic<N> {
    /// Analyze `a`'s sparsity pattern.
    ///
    /// `a` is triangulated internally via [`qd_sparse::triu`] if it is not
    /// already upper-triangular with the diagonal last in every column.
    /// `iperm`, if given, is the inverse of a fill-reducing ordering chosen
    /// externally (`iperm[original] = permuted`); entries of the original
    /// matrix's upper triangle at row/column `i`/`j` land at
    /// `max(iperm[i], iperm[j])`/`min(iperm[i], iperm[j])` in the stored,
    /// permuted matrix.
    pub fn new(a: CscMatView<N>, iperm: Option<Vec<usize>>) -> Result<Self> {
        if a.rows() != a.cols() {
            return Err(LdlError::InvalidArgument("matrix must be square"));
        }
        let n = a.cols();

        let triangulated = if a.is_triu_diag_last() {
            CscMat::new_csc(
                a.rows(),
                a.cols(),
                a.colptr().to_vec(),
                a.rowind().to_vec(),
                a.values().to_vec(),
            )
        } else {
            qd_sparse::triu(a)
        };

        let perm = match iperm {
            Some(ref p) => Some(
                Permutation::from_iperm(p.clone())
                    .ok_or(LdlError::InvalidArgument("iperm is not a permutation of 0..n"))?,
            ),
            None => None,
        };
        let effective_iperm: Vec<usize> = iperm.unwrap_or_else(|| (0..n).collect());

        let (triu_a, a_to_papt) = perm::perm_symmetric(triangulated.view(), &effective_iperm)?;
        let (forest, lnz) = etree::compute_etree(triu_a.view())?;

        let mut lp = vec![0usize; n + 1];
        for i in 0..n {
            lp[i + 1] = lp[i] + lnz[i];
        }

        Ok(QdldlSymbolic {
            n,
            triu_a,
            a_to_papt,
            perm,
            forest,
            lp,
        })
    }

    /// The number of rows/columns of the matrix.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The number of stored entries `L` will have, `Lp[n]`.
    #[inline]
    pub fn nnz_l(&self) -> usize {
        self.lp[self.n]
    }

    /// The column pointers of `L`, length `n + 1`.
    #[inline]
    pub fn lp(&self) -> &[usize] {
        &self.lp
    }
}

impl<N: Copy + Num + PartialOrd> QdldlSymbolic<N> {
    /// Run the first numeric factorization against this symbolic skeleton.
    ///
    /// `dsigns`, if given, is a length-`n` array of expected pivot signs
    /// (`+1`/`-1`), indexed by *original* column (pre-permutation), used to
    /// regularize sign-violating pivots: whenever `dsigns[k] * D[k] <
    /// regularize_eps`, `D[k]` is reset to `regularize_delta * dsigns[k]`
    /// and the count of regularized entries is incremented. When a
    /// permutation is in effect, `dsigns` is permuted to match it before
    /// being stored (spec §9 "Sign-prescription permutation":
    /// `dsigns_internal[i] = dsigns_user[perm[i]]`), so regularization
    /// decisions reference the permuted signs. With `logical == true`, only
    /// the pattern of `L` is produced; `Lx`, `D`, and `Dinv` are left at a
    /// `1` placeholder and no regularization is applied.
    pub fn factor(
        self,
        dsigns: Option<Vec<N>>,
        regularize_eps: N,
        regularize_delta: N,
        logical: bool,
    ) -> Result<QdldlNumeric<N>> {
        let n = self.n;
        let nnz_l = self.nnz_l();
        let dsigns = dsigns.map(|user_signs| match &self.perm {
            Some(perm) => {
                let mut permuted = vec![N::zero(); n];
                perm.apply(&user_signs, &mut permuted);
                permuted
            }
            None => user_signs,
        });
        let mut numeric = QdldlNumeric {
            symbolic: self,
            li: vec![0usize; nnz_l],
            lx: vec![N::zero(); nnz_l],
            d: vec![N::zero(); n],
            dinv: vec![N::zero(); n],
            ws: Workspace::new(n),
            logical,
            dsigns,
            regularize_eps,
            regularize_delta,
            positive_inertia: 0,
            regularized_entries: 0,
            valid: false,
        };
        numeric.refactor()?;
        Ok(numeric)
    }
}

impl<N: Copy + Num + PartialOrd> QdldlNumeric<N> {
    /// Analyze and factor `a` in one step; a convenience wrapper around
    /// [`QdldlSymbolic::new`] followed by [`QdldlSymbolic::factor`] for
    /// callers who will only ever run a single numeric factorization against
    /// this sparsity pattern.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: CscMatView<N>,
        iperm: Option<Vec<usize>>,
        dsigns: Option<Vec<N>>,
        regularize_eps: N,
        regularize_delta: N,
        logical: bool,
    ) -> Result<Self> {
        QdldlSymbolic::new(a, iperm)?.factor(dsigns, regularize_eps, regularize_delta, logical)
    }
}

/// A completed (or, after `Singular`, indeterminate) numeric factorization,
/// owning the symbolic skeleton it was built from and `L`/`D`/`Dinv`.
pub struct QdldlNumeric<N> {
    symbolic: QdldlSymbolic<N>,
    li: Vec<usize>,
    lx: Vec<N>,
    d: Vec<N>,
    dinv: Vec<N>,
    ws: Workspace<N>,
    logical: bool,
    dsigns: Option<Vec<N>>,
    regularize_eps: N,
    regularize_delta: N,
    positive_inertia: usize,
    regularized_entries: usize,
    /// `false` after a `Singular` error, or after a value update until the
    /// next successful `refactor`.
    valid: bool,
}

impl<N: Copy + Num + PartialOrd> QdldlNumeric<N> {
    /// Re-run the numeric factorization against the symbolic skeleton's
    /// current values, overwriting `L`, `D`, and `Dinv` in place.
    ///
    /// On `Singular`, the factors are left in an indeterminate state and
    /// this object must not be used for `solve` until a further call to
    /// `refactor` succeeds.
    pub fn refactor(&mut self) -> Result<()> {
        self.valid = false;
        let (pos, reg) = numeric::factorize(
            self.symbolic.triu_a.view(),
            &self.symbolic.lp,
            &self.symbolic.forest,
            self.dsigns.as_deref(),
            self.regularize_eps,
            self.regularize_delta,
            self.logical,
            &mut self.li,
            &mut self.lx,
            &mut self.d,
            &mut self.dinv,
            &mut self.ws,
        )?;
        self.positive_inertia = pos;
        self.regularized_entries = reg;
        self.valid = true;
        Ok(())
    }

    /// Solve `A x = b`, returning a freshly allocated `x`.
    pub fn solve(&mut self, b: &[N]) -> Result<Vec<N>> {
        let mut x = b.to_vec();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Solve `A x = b` in place, overwriting `b` with `x`.
    pub fn solve_in_place(&mut self, b: &mut [N]) -> Result<()> {
        if self.logical {
            return Err(LdlError::LogicalOnly);
        }
        if !self.valid {
            return Err(LdlError::NotFactored);
        }
        solve::solve_in_place(
            self.symbolic.perm.as_ref(),
            CscMatView::new(
                self.symbolic.n,
                self.symbolic.n,
                &self.symbolic.lp,
                &self.li,
                &self.lx,
            ),
            &self.dinv,
            b,
            &mut self.ws.solve_scratch,
        );
        Ok(())
    }

    /// Overwrite the stored values at `indices` (positions in the matrix as
    /// originally supplied to [`QdldlSymbolic::new`]) with `values`.
    /// Invalidates this factorization until the next successful `refactor`.
    pub fn update_values(&mut self, indices: &[usize], values: &[N]) -> Result<()> {
        self.valid = false;
        update::update_values(
            &self.symbolic.a_to_papt,
            self.symbolic.triu_a.values_mut(),
            indices,
            values,
        )
    }

    /// Multiply the stored values at `indices` by `scale`, in place.
    /// Invalidates this factorization until the next successful `refactor`.
    pub fn scale_values(&mut self, indices: &[usize], scale: N) -> Result<()> {
        self.valid = false;
        update::scale_values(
            &self.symbolic.a_to_papt,
            self.symbolic.triu_a.values_mut(),
            indices,
            scale,
        )
    }

    /// Add `offset * sign` to the stored values at `indices`.
    /// Invalidates this factorization until the next successful `refactor`.
    pub fn offset_values(&mut self, indices: &[usize], offset: N, signs: &[i8]) -> Result<()> {
        self.valid = false;
        update::offset_values(
            &self.symbolic.a_to_papt,
            self.symbolic.triu_a.values_mut(),
            indices,
            offset,
            signs,
        )
    }

    /// Overwrite the diagonal entries of `indices` (original, pre-permutation
    /// column indices) with `values`. Invalidates this factorization until
    /// the next successful `refactor`.
    pub fn update_diagonal(&mut self, indices: &[usize], values: &[N]) -> Result<()> {
        self.valid = false;
        let perm = self.symbolic.perm.as_ref().map(Permutation::iperm);
        let (colptr, rowind, values_mut) = self.symbolic.triu_a.pattern_and_values_mut();
        update::update_diagonal(perm, colptr, rowind, values_mut, indices, values)
    }

    /// The number of strictly positive entries of `D`.
    #[inline]
    pub fn positive_inertia(&self) -> usize {
        self.positive_inertia
    }

    /// The number of pivots regularized during the last factorization.
    #[inline]
    pub fn regularized_entries(&self) -> usize {
        self.regularized_entries
    }

    /// Whether the factorization is currently in a solvable state.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid && !self.logical
    }

    /// The symbolic skeleton this factorization was built from.
    #[inline]
    pub fn symbolic(&self) -> &QdldlSymbolic<N> {
        &self.symbolic
    }

    /// The stored row indices of `L`, parallel to `lx()`.
    #[inline]
    pub fn li(&self) -> &[usize] {
        &self.li
    }

    /// The stored values of `L`, parallel to `li()`.
    #[inline]
    pub fn lx(&self) -> &[N] {
        &self.lx
    }

    /// The diagonal `D`.
    #[inline]
    pub fn d(&self) -> &[N] {
        &self.d
    }

    /// The diagonal inverse `Dinv`.
    #[inline]
    pub fn dinv(&self) -> &[N] {
        &self.dinv
    }
}
