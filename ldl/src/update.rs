///! In-place updates to the stored upper-triangular matrix that leave its
///! sparsity pattern untouched, so a changed numeric factorization can be
///! recomputed by [`crate::numeric::factorize`] without rebuilding the
///! symbolic skeleton.
///!
///! The teacher's `LdlNumeric::update` takes a whole replacement matrix with
///! an identical pattern and re-runs `ldl_numeric` over it; this module is
///! new code layered in front of that idea, grounded on the `AtoPAPt` entry
///! map built in [`crate::perm::perm_symmetric`] so that callers can address
///! entries by their position in the matrix *as originally supplied* (before
///! permutation), rather than having to know the permuted storage order.

use num_traits::Num;

use crate::error::{LdlError, Result};

/// Translate an original-matrix entry index through the entry map, bounds
/// checking both the index itself and its destination.
fn resolve(a_to_papt: &[usize], stored_len: usize, index: usize) -> Result<usize> {
    let dest = *a_to_papt
        .get(index)
        .ok_or(LdlError::InvalidArgument("update index out of range"))?;
    if dest >= stored_len {
        return Err(LdlError::InvalidArgument("entry map destination out of range"));
    }
    Ok(dest)
}

/// Overwrite the stored values at `indices` (positions in the matrix as
/// originally supplied to the constructor) with `values`.
///
/// Every index is resolved through the entry map before any value is
/// written, so a single out-of-range index leaves `stored` completely
/// untouched rather than partially updated (spec.md §7: "operations either
/// complete fully or the object is left in its pre-call state").
pub fn update_values<N: Copy>(
    a_to_papt: &[usize],
    stored: &mut [N],
    indices: &[usize],
    values: &[N],
) -> Result<()> {
    if indices.len() != values.len() {
        return Err(LdlError::InvalidArgument(
            "indices and values must have the same length",
        ));
    }
    let mut dests = Vec::with_capacity(indices.len());
    for &index in indices {
        dests.push(resolve(a_to_papt, stored.len(), index)?);
    }
    for (dest, &value) in dests.into_iter().zip(values.iter()) {
        stored[dest] = value;
    }
    Ok(())
}

/// Multiply the stored values at `indices` by `scale`, in place.
///
/// Every index is resolved before any value is scaled; see [`update_values`].
pub fn scale_values<N: Copy + Num>(
    a_to_papt: &[usize],
    stored: &mut [N],
    indices: &[usize],
    scale: N,
) -> Result<()> {
    let mut dests = Vec::with_capacity(indices.len());
    for &index in indices {
        dests.push(resolve(a_to_papt, stored.len(), index)?);
    }
    for dest in dests {
        stored[dest] = stored[dest] * scale;
    }
    Ok(())
}

/// Add `offset * sign` to the stored values at `indices`, where `signs` is a
/// parallel array of `+1`/`-1` multipliers (the dynamic-regularization
/// bookkeeping this supports needs to push paired diagonal blocks in
/// opposite directions in a single call).
///
/// Every index is resolved before any value is offset; see [`update_values`].
pub fn offset_values<N: Copy + Num>(
    a_to_papt: &[usize],
    stored: &mut [N],
    indices: &[usize],
    offset: N,
    signs: &[i8],
) -> Result<()> {
    if indices.len() != signs.len() {
        return Err(LdlError::InvalidArgument(
            "indices and signs must have the same length",
        ));
    }
    let mut dests = Vec::with_capacity(indices.len());
    for &index in indices {
        dests.push(resolve(a_to_papt, stored.len(), index)?);
    }
    for (dest, &sign) in dests.into_iter().zip(signs.iter()) {
        let signed_offset = if sign < 0 { N::zero() - offset } else { offset };
        stored[dest] = stored[dest] + signed_offset;
    }
    Ok(())
}

/// Overwrite the diagonal entries of `indices` (original, pre-permutation
/// column indices `0..n`) with `values`.
///
/// Unlike [`update_values`], this addresses entries by column rather than by
/// stored-entry position: the diagonal of column `i` of the original matrix
/// lives at column `perm[i]` of the stored, possibly-permuted matrix (or
/// column `i` itself if no permutation was supplied), and is always the last
/// entry of that column by the upper-triangular invariant.
///
/// Every column's diagonal-last invariant is checked before any value is
/// written; see [`update_values`].
pub fn update_diagonal<N: Copy>(
    perm: Option<&[usize]>,
    colptr: &[usize],
    rowind: &[usize],
    stored: &mut [N],
    indices: &[usize],
    values: &[N],
) -> Result<()> {
    if indices.len() != values.len() {
        return Err(LdlError::InvalidArgument(
            "indices and values must have the same length",
        ));
    }
    let n = colptr.len().saturating_sub(1);
    let mut dests = Vec::with_capacity(indices.len());
    for &i in indices {
        if i >= n {
            return Err(LdlError::InvalidArgument("column index out of range"));
        }
        let col = perm.map_or(i, |p| p[i]);
        let start = colptr[col];
        let stop = colptr[col + 1];
        if start == stop {
            return Err(LdlError::EmptyColumn(col));
        }
        let last = stop - 1;
        if rowind[last] != col {
            return Err(LdlError::MissingDiagonal(col));
        }
        dests.push(last);
    }
    for (dest, &value) in dests.into_iter().zip(values.iter()) {
        stored[dest] = value;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{offset_values, scale_values, update_diagonal, update_values};

    #[test]
    fn update_values_goes_through_entry_map() {
        let a_to_papt = vec![2, 0, 1];
        let mut stored = vec![10.0, 20.0, 30.0];
        update_values(&a_to_papt, &mut stored, &[0, 1], &[1.0, 2.0]).unwrap();
        // index 0 -> papt 2, index 1 -> papt 0
        assert_eq!(stored, vec![2.0, 20.0, 1.0]);
    }

    #[test]
    fn scale_values_multiplies_in_place() {
        let a_to_papt = vec![0, 1, 2];
        let mut stored = vec![2.0, 3.0, 4.0];
        scale_values(&a_to_papt, &mut stored, &[1, 2], 10.0).unwrap();
        assert_eq!(stored, vec![2.0, 30.0, 40.0]);
    }

    #[test]
    fn offset_values_respects_sign() {
        let a_to_papt = vec![0, 1];
        let mut stored = vec![5.0, 5.0];
        offset_values(&a_to_papt, &mut stored, &[0, 1], 1.0, &[1, -1]).unwrap();
        assert_eq!(stored, vec![6.0, 4.0]);
    }

    #[test]
    fn update_diagonal_finds_last_entry_of_permuted_column() {
        // Column 0: rows [0]; column 1: rows [0, 1].
        let colptr = vec![0, 1, 3];
        let rowind = vec![0, 0, 1];
        let mut stored = vec![1.0, 2.0, 3.0];
        // perm maps original column 1 to stored column 1 (identity here).
        let perm = vec![0, 1];
        update_diagonal(Some(&perm), &colptr, &rowind, &mut stored, &[1], &[9.0]).unwrap();
        assert_eq!(stored, vec![1.0, 2.0, 9.0]);
    }

    #[test]
    fn update_values_leaves_stored_untouched_on_out_of_range_index() {
        let a_to_papt = vec![2, 0, 1];
        let mut stored = vec![10.0, 20.0, 30.0];
        let before = stored.clone();
        let err = update_values(&a_to_papt, &mut stored, &[0, 99_999], &[5.0, 6.0]);
        assert!(err.is_err());
        assert_eq!(stored, before, "index 0 must not be written before index 1 is validated");
    }

    #[test]
    fn scale_values_leaves_stored_untouched_on_out_of_range_index() {
        let a_to_papt = vec![0, 1, 2];
        let mut stored = vec![2.0, 3.0, 4.0];
        let before = stored.clone();
        assert!(scale_values(&a_to_papt, &mut stored, &[1, 99_999], 10.0).is_err());
        assert_eq!(stored, before);
    }

    #[test]
    fn offset_values_leaves_stored_untouched_on_out_of_range_index() {
        let a_to_papt = vec![0, 1];
        let mut stored = vec![5.0, 5.0];
        let before = stored.clone();
        assert!(offset_values(&a_to_papt, &mut stored, &[0, 99_999], 1.0, &[1, -1]).is_err());
        assert_eq!(stored, before);
    }

    #[test]
    fn update_diagonal_leaves_stored_untouched_when_a_later_column_is_missing_its_diagonal() {
        // Column 0: rows [0] (valid diagonal); column 1: rows [0] only, no
        // diagonal entry at (1, 1).
        let colptr = vec![0, 1, 2];
        let rowind = vec![0, 0];
        let mut stored = vec![1.0, 2.0];
        let before = stored.clone();
        assert!(update_diagonal(None, &colptr, &rowind, &mut stored, &[0, 1], &[9.0, 9.0]).is_err());
        assert_eq!(stored, before, "column 0's diagonal must not be written before column 1 is validated");
    }

    #[test]
    fn update_diagonal_rejects_column_without_diagonal() {
        let colptr = vec![0, 1, 1];
        let rowind = vec![0];
        let mut stored = vec![1.0];
        assert!(update_diagonal(None, &colptr, &rowind, &mut stored, &[1], &[9.0]).is_err());
    }
}
