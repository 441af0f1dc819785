//! Hermite normal form of integer matrices.
//!
//! The row-style form `H = U·A` is in row echelon form: the first nonzero
//! entry (pivot) of each nonzero row is positive, lies strictly to the right
//! of the pivot of the row above, every entry below a pivot is zero and every
//! entry above a pivot lies in `[0, pivot)`. Zero rows come last. The unimodular
//! `U` is tracked alongside.
//!
//! The column-style form `H = A·U` is the transpose of that statement.

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::arith::{bezout_pair, floor_div};
use crate::error::{Result, ensure_non_empty};
use crate::matrix::IntegerMatrix;
use crate::rings::{OrderedRing as _, Z};

/// Which side the unimodular transform acts on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HnfStyle {
    /// `U·A = H`, row operations.
    Row,
    /// `A·U = H`, column operations.
    Column,
}

/// The Hermite normal form of a matrix together with its transform.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalForm {
    pub h: IntegerMatrix,
    pub u: IntegerMatrix,
    pub style: HnfStyle,
}

impl NormalForm {
    /// The rank of the input matrix, i.e. the number of nonzero rows (or
    /// columns for [`HnfStyle::Column`]) of `h`.
    pub fn rank(&self) -> usize {
        match self.style {
            HnfStyle::Row => self.h.rows().filter(|r| r.iter().any(|e| !e.is_zero())).count(),
            HnfStyle::Column => (0..self.h.num_cols())
                .filter(|&c| self.h.col(c).any(|e| !e.is_zero()))
                .count(),
        }
    }

    /// Returns `(h, u)`.
    pub fn destruct(self) -> (IntegerMatrix, IntegerMatrix) {
        (self.h, self.u)
    }
}

/// Computes the Hermite normal form of `a` in the given style.
///
/// Matrices without rows or columns are accepted here; their forms are
/// trivial.
pub fn hermite_normal_form(a: &IntegerMatrix, style: HnfStyle) -> NormalForm {
    debug!("start hnf: {:?}, style: {:?}.", a.shape(), style);
    trace!("\n{}", a);

    let nf = match style {
        HnfStyle::Row => {
            let mut h = a.clone();
            let u = row_reduce_in_place(&mut h);
            NormalForm { h, u, style }
        }
        HnfStyle::Column => {
            let mut h = a.transposed();
            let u = row_reduce_in_place(&mut h);
            NormalForm { h: h.transposed(), u: u.transposed(), style }
        }
    };

    debug_assert!(nf.u.is_unimodular(), "hnf transform is not unimodular");
    debug_assert!(match style {
        HnfStyle::Row => nf.u.mul(a, &Z) == nf.h,
        HnfStyle::Column => a.mul(&nf.u, &Z) == nf.h,
    });

    debug!("hnf done, rank: {}.", nf.rank());
    trace!("\n{}", nf.h);
    nf
}

/// Row-style HNF: returns `(H, U)` with `U·A = H`.
pub fn row_style_hermite_normal_form(
    a: &IntegerMatrix,
) -> Result<(IntegerMatrix, IntegerMatrix)> {
    ensure_non_empty(a.num_rows(), a.num_cols())?;
    Ok(hermite_normal_form(a, HnfStyle::Row).destruct())
}

/// Column-style HNF: returns `(H, U)` with `A·U = H`.
pub fn column_style_hermite_normal_form(
    a: &IntegerMatrix,
) -> Result<(IntegerMatrix, IntegerMatrix)> {
    ensure_non_empty(a.num_rows(), a.num_cols())?;
    Ok(hermite_normal_form(a, HnfStyle::Column).destruct())
}

/// Computes the row-style Hermite normal form of a matrix in place and
/// returns the transformation matrix.
pub(crate) fn row_reduce_in_place(a: &mut IntegerMatrix) -> IntegerMatrix {
    // The transformation matrix.
    let mut u = IntegerMatrix::identity(a.num_rows());

    let mut r = 0;
    let mut c = 0;
    while r < a.num_rows() && c < a.num_cols() {
        // Rows with a nonzero entry in this column, smallest first.
        let mut nonzero: Vec<usize> =
            (r..a.num_rows()).filter(|&i| !a[(i, c)].is_zero()).collect();

        if nonzero.is_empty() {
            // The column is 0, continue with the next one.
            c += 1;
            continue;
        }

        nonzero.sort_by(|&i, &j| Z.cmp_abs(&a[(i, c)], &a[(j, c)]));

        // Fold every other row into the smallest one. Afterwards the
        // smallest row holds the gcd of the column and the others are 0.
        let p = nonzero[0];
        for &k in &nonzero[1..] {
            combine_rows(a, &mut u, p, k, c);
        }

        // Move the pivot to the current row.
        a.swap_rows(r, p);
        u.swap_rows(r, p);

        // Flip sign if necessary.
        if a[(r, c)].is_negative() {
            a.negate_row(r, &Z);
            u.negate_row(r, &Z);
        }

        // Reduce the elements above the pivot into [0, pivot).
        let pivot = a[(r, c)].clone();
        for k in 0..r {
            let m = -floor_div(&a[(k, c)], &pivot);
            if !m.is_zero() {
                a.row_multiply_add(k, r, &m, &Z);
                u.row_multiply_add(k, r, &m, &Z);
            }
        }

        trace!("pivot {pivot} at ({r}, {c}).");

        // Continue with the bottom right part of the matrix that remains.
        c += 1;
        r += 1;
    }

    u
}

/// Replaces rows `p` and `k` by the combination that leaves
/// `gcd(a[p][c], a[k][c])` in row `p` and zero in row `k`.
fn combine_rows(a: &mut IntegerMatrix, u: &mut IntegerMatrix, p: usize, k: usize, c: usize) {
    let x = &a[(p, c)];
    let y = &a[(k, c)];

    // [ s    t  ][x] = [g]
    // [-y/g x/g][y]   [0]
    let (g, s, t) = bezout_pair(x, y);
    let (x, y): (BigInt, BigInt) = (x / &g, -(y / &g));

    let comps = [&s, &t, &y, &x];
    a.left_elementary(comps, p, k, &Z);
    u.left_elementary(comps, p, k, &Z);

    trace!("left-elem: [{s}, {t}; {y}, {x}] for rows ({p}, {k}).");
}

/// Is `h` in row-style Hermite normal form?
pub fn is_row_hermite_normal_form(h: &IntegerMatrix) -> bool {
    let mut last_pivot: Option<usize> = None;
    let mut seen_zero_row = false;
    for (i, row) in h.rows().enumerate() {
        let Some(c) = row.iter().position(|e| !e.is_zero()) else {
            seen_zero_row = true;
            continue;
        };

        if seen_zero_row || last_pivot.is_some_and(|l| c <= l) || !row[c].is_positive() {
            return false;
        }

        // Everything above the pivot lies in [0, pivot).
        let pivot = &row[c];
        if !(0..i).all(|k| !h[(k, c)].is_negative() && h[(k, c)] < *pivot) {
            return false;
        }

        last_pivot = Some(c);
    }
    true
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng as _, distr::{Distribution as _, Uniform}, rngs::StdRng};

    use super::*;
    use crate::error::Error;

    fn random_matrix(rows: usize, cols: usize, rng: &mut StdRng) -> IntegerMatrix {
        let dist = Uniform::new_inclusive(-20i64, 20).unwrap();
        IntegerMatrix::from_iter(rows, cols, (0..rows * cols).map(|_| dist.sample(rng).into()))
    }

    #[test]
    fn small_square() {
        let a = IntegerMatrix::from_rows(&[[3, 1], [2, 2]]);
        let (h, u) = row_style_hermite_normal_form(&a).unwrap();
        assert_eq!(h, [[1, 3], [0, 4]]);
        assert_eq!(u.mul(&a, &Z), h);
        assert!(u.is_unimodular());
    }

    #[test]
    fn reference_matrices() {
        let cases: [(IntegerMatrix, IntegerMatrix); 4] = [
            (
                IntegerMatrix::from_rows(&[[2, 4, 4], [-6, 6, 12], [10, -4, -16]]),
                IntegerMatrix::from_rows(&[[2, 4, 4], [0, 6, 12], [0, 0, 12]]),
            ),
            (
                IntegerMatrix::from_rows(&[[2, 0], [1, 4]]),
                IntegerMatrix::from_rows(&[[1, 4], [0, 8]]),
            ),
            (
                IntegerMatrix::from_rows(&[[3, -1, -1], [-1, 3, -1], [-1, -1, 3]]),
                IntegerMatrix::from_rows(&[[1, 1, 1], [0, 4, 0], [0, 0, 4]]),
            ),
            (
                IntegerMatrix::from_rows(&[[8, 4, 8], [4, 8, 4]]),
                IntegerMatrix::from_rows(&[[4, 8, 4], [0, 12, 0]]),
            ),
        ];

        for (a, expected) in cases {
            let (h, u) = row_style_hermite_normal_form(&a).unwrap();
            assert_eq!(h, expected, "a: {a:?}");
            assert_eq!(u.mul(&a, &Z), h);
            assert!(u.is_unimodular());
        }
    }

    #[test]
    fn wide_matrix() {
        let a = IntegerMatrix::from_rows(&[
            [-6, 111, -36, 6],
            [5, -672, 210, 74],
            [0, -255, 81, 24],
        ]);
        let (h, u) = row_style_hermite_normal_form(&a).unwrap();
        assert_eq!(h, [[1, 0, 420, -2522], [0, 3, 1809, -10860], [0, 0, 2079, -12474]]);
        assert_eq!(u.mul(&a, &Z), h);
    }

    #[test]
    fn zero_columns_are_skipped() {
        let a = IntegerMatrix::from_rows(&[[0, 2, 3], [0, 4, 5], [0, 0, 0]]);
        let nf = hermite_normal_form(&a, HnfStyle::Row);
        assert_eq!(nf.h, [[0, 2, 0], [0, 0, 1], [0, 0, 0]]);
        assert_eq!(nf.rank(), 2);
    }

    #[test]
    fn column_style() {
        let a = IntegerMatrix::from_rows(&[[2, 4, 4], [-6, 6, 12], [10, -4, -16]]);
        let (h, u) = column_style_hermite_normal_form(&a).unwrap();
        assert_eq!(a.mul(&u, &Z), h);
        assert!(u.is_unimodular());
        assert!(is_row_hermite_normal_form(&h.transposed()));
        let nf = hermite_normal_form(&a, HnfStyle::Column);
        assert_eq!(nf.rank(), 3);

        let (again, v) = column_style_hermite_normal_form(&h).unwrap();
        assert_eq!(again, h);
        assert_eq!(v, IntegerMatrix::identity(3));
    }

    #[test]
    fn random_matrices() {
        let rng = &mut StdRng::seed_from_u64(0);
        let dims = Uniform::new_inclusive(1usize, 6).unwrap();
        for _ in 0..200 {
            let a = random_matrix(dims.sample(rng), dims.sample(rng), rng);
            let nf = hermite_normal_form(&a, HnfStyle::Row);
            assert!(is_row_hermite_normal_form(&nf.h), "a: {a:?}, h: {:?}", nf.h);
            assert_eq!(nf.u.mul(&a, &Z), nf.h);
            assert!(nf.u.is_unimodular());

            // Reducing again changes nothing.
            let again = hermite_normal_form(&nf.h, HnfStyle::Row);
            assert_eq!(again.h, nf.h);
            assert_eq!(again.u, IntegerMatrix::identity(a.num_rows()));

            let col = hermite_normal_form(&a, HnfStyle::Column);
            assert_eq!(a.mul(&col.u, &Z), col.h);
            let again = hermite_normal_form(&col.h, HnfStyle::Column);
            assert_eq!(again.h, col.h);
            assert_eq!(again.u, IntegerMatrix::identity(a.num_cols()));
        }
    }

    #[test]
    fn rank_deficient() {
        let a = IntegerMatrix::from_rows(&[[1, 2, 3], [2, 4, 6], [-1, -2, -3]]);
        let nf = hermite_normal_form(&a, HnfStyle::Row);
        assert_eq!(nf.h, [[1, 2, 3], [0, 0, 0], [0, 0, 0]]);
        assert_eq!(nf.rank(), 1);
        assert!(nf.u.is_unimodular());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            row_style_hermite_normal_form(&IntegerMatrix::zero(0, 3)),
            Err(Error::DegenerateInput(_))
        ));
        assert!(matches!(
            column_style_hermite_normal_form(&IntegerMatrix::zero(2, 0)),
            Err(Error::DegenerateInput(_))
        ));
    }
}
