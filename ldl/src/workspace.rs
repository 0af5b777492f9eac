///! Scratch buffers owned by a numeric factorization, sized once to `n`
///! and `nnz(L)` and reused across every call to `factor`/`refactor`.
///!
///! Grounded on `LdlNumeric`'s field layout in the teacher
///! (`l_indices, l_data, diag, y_workspace, pattern_workspace`), split out
///! into its own type and extended with the pieces this spec's algorithm
///! needs that the teacher's single-pass permuting iterator did not:
///! `l_next_space_in_col` (the next free slot in each column of `L`, reset
///! to `Lp` at the start of every factorization) and `solve_scratch` (the
///! permutation scratch vector reused by every `solve` call, per the
///! "no allocation after construction" rule).

use num_traits::Num;

pub struct Workspace<N> {
    /// `flag[i] == k` once column `i` has been visited while assembling
    /// row `k`; used to charge each ancestor at most once per column.
    pub flag: Vec<usize>,
    /// Dense accumulator for the values of row `k` of `L` as it is built.
    pub y_vals: Vec<N>,
    /// Per-entry scratch: nodes discovered while walking the elimination
    /// tree from one off-diagonal entry of column `k`, in walking order.
    pub elim_buffer: Vec<usize>,
    /// The nonzero pattern of row `k` of `L`, in increasing column order,
    /// rebuilt fresh for every `k`.
    pub y_idx: Vec<usize>,
    /// The next unused slot in column `c` of `L`; starts at `Lp[c]` and
    /// counts up to `Lp[c + 1]` as column `c` is filled in by later rows.
    pub l_next_space_in_col: Vec<usize>,
    /// Scratch vector for the permuted solve (`P·b` and `Pᵀ·x`).
    pub solve_scratch: Vec<N>,
}

impl<N: Copy + Num> Workspace<N> {
    pub fn new(n: usize) -> Self {
        Workspace {
            flag: vec![usize::MAX; n],
            y_vals: vec![N::zero(); n],
            elim_buffer: Vec::with_capacity(n),
            y_idx: Vec::with_capacity(n),
            l_next_space_in_col: vec![0; n],
            solve_scratch: vec![N::zero(); n],
        }
    }
}
