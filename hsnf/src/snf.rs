//! Smith normal form of integer matrices.
//!
//! For an `m x n` matrix `A` this computes unimodular `L` (`m x m`) and `R`
//! (`n x n`) such that `L·A·R = D` is diagonal with nonnegative entries
//! `d_1 | d_2 | ... | d_r` followed by zeros.

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::arith::{bezout_pair, divides, extended_gcd};
use crate::error::{Result, ensure_non_empty};
use crate::hnf::row_reduce_in_place;
use crate::matrix::IntegerMatrix;
use crate::rings::{OrderedRing as _, Z};

#[derive(Clone, Debug, PartialEq)]
pub struct SmithResult {
    /// The diagonal form.
    pub d: IntegerMatrix,
    /// Left transform.
    pub l: IntegerMatrix,
    /// Right transform.
    pub r: IntegerMatrix,
}

impl SmithResult {
    /// Number of nonzero diagonal entries.
    pub fn rank(&self) -> usize {
        self.d.diagonal_entries().take_while(|e| !e.is_zero()).count()
    }

    /// The nonzero diagonal entries, in order.
    pub fn invariant_factors(&self) -> Vec<&BigInt> {
        self.d.diagonal_entries().filter(|e| !e.is_zero()).collect()
    }

    pub fn destruct(self) -> (IntegerMatrix, IntegerMatrix, IntegerMatrix) {
        (self.d, self.l, self.r)
    }
}

/// Computes the Smith normal form of `a`.
///
/// Accepts matrices without rows or columns.
pub fn smith_form(a: &IntegerMatrix) -> SmithResult {
    debug!("start snf: {:?}.", a.shape());
    trace!("\n{}", a);

    let mut calc = SmithCalc::new(a.clone());
    calc.process();

    debug!("snf done.");
    trace!("\n{}", calc.target);

    let res = calc.result();
    debug_assert!(res.l.is_unimodular() && res.r.is_unimodular());
    debug_assert_eq!(res.l.mul(a, &Z).mul(&res.r, &Z), res.d);
    res
}

/// Returns `(D, L, R)` with `L·A·R = D`.
pub fn smith_normal_form(
    a: &IntegerMatrix,
) -> Result<(IntegerMatrix, IntegerMatrix, IntegerMatrix)> {
    ensure_non_empty(a.num_rows(), a.num_cols())?;
    Ok(smith_form(a).destruct())
}

struct SmithCalc {
    target: IntegerMatrix,
    l: IntegerMatrix,
    r: IntegerMatrix,
}

impl SmithCalc {
    fn new(target: IntegerMatrix) -> Self {
        let (m, n) = target.shape();
        Self { target, l: IntegerMatrix::identity(m), r: IntegerMatrix::identity(n) }
    }

    fn result(self) -> SmithResult {
        SmithResult { d: self.target, l: self.l, r: self.r }
    }

    fn process(&mut self) {
        if self.target.is_zero() {
            return;
        }

        self.preprocess();
        self.eliminate_all();
        self.diag_normalize();
    }

    /// Bring the matrix into Hermite normal form first. Its entries are
    /// reduced and it is already upper triangular.
    fn preprocess(&mut self) {
        self.l = row_reduce_in_place(&mut self.target);
        trace!("preprocessed by hnf:\n{}", self.target);
    }

    fn eliminate_all(&mut self) {
        let (m, n) = self.target.shape();
        let mut i = 0;

        for j in 0..n {
            if i >= m {
                break;
            }
            if self.eliminate_step(i, j) {
                i += 1;
            }
        }
    }

    fn eliminate_step(&mut self, i: usize, j: usize) -> bool {
        let Some(i_p) = self.select_pivot(i, j) else {
            return false;
        };

        trace!("select-pivot: ({i_p}, {j})");

        if i_p > i {
            self.swap_rows(i, i_p);
        }

        if j > i {
            self.swap_cols(i, j);
        }

        self.eliminate_at(i);
        true
    }

    fn row_nz(&self, i: usize) -> usize {
        self.target.row(i).iter().filter(|a| !a.is_zero()).count()
    }

    fn col_nz(&self, j: usize) -> usize {
        self.target.col(j).filter(|a| !a.is_zero()).count()
    }

    /// The row at or below `below_i` with a nonzero in column `j` and the
    /// fewest nonzeros overall. Ties go to the smaller entry.
    fn select_pivot(&self, below_i: usize, j: usize) -> Option<usize> {
        (below_i..self.target.num_rows())
            .filter(|&i| !self.target[(i, j)].is_zero())
            .min_by(|&i1, &i2| {
                self.row_nz(i1)
                    .cmp(&self.row_nz(i2))
                    .then_with(|| Z.cmp_abs(&self.target[(i1, j)], &self.target[(i2, j)]))
            })
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        self.target.swap_rows(i, j);
        self.l.swap_rows(i, j);
        trace!("swap-rows: ({i}, {j})");
    }

    fn swap_cols(&mut self, i: usize, j: usize) {
        self.target.swap_columns(i, j);
        self.r.swap_columns(i, j);
        trace!("swap-cols: ({i}, {j})");
    }

    // Multiply [a, b; c, d] from left, assuming det = 1.
    fn left_elementary(&mut self, comps: [&BigInt; 4], i: usize, j: usize) {
        let [a, b, c, d] = comps;
        debug_assert!((a * d - b * c) == BigInt::from(1));

        self.target.left_elementary(comps, i, j, &Z);
        self.l.left_elementary(comps, i, j, &Z);

        trace!("left-elem: [{a}, {b}; {c}, {d}] for rows ({i}, {j}).");
    }

    // Multiply [a, c; b, d] from right, assuming det = 1.
    fn right_elementary(&mut self, comps: [&BigInt; 4], i: usize, j: usize) {
        let [a, b, c, d] = comps;
        debug_assert!((a * d - b * c) == BigInt::from(1));

        self.target.right_elementary(comps, i, j, &Z);
        self.r.right_elementary(comps, i, j, &Z);

        trace!("right-elem: [{a}, {c}; {b}, {d}] for cols ({i}, {j}).");
    }

    /// Clears row and column `i` except for the diagonal entry.
    ///
    /// Every pass that leaves entries behind strictly decreases the absolute
    /// value of the pivot, so this terminates.
    fn eliminate_at(&mut self, i: usize) {
        debug_assert!(!self.target[(i, i)].is_zero());

        while self.row_nz(i) > 1 || self.col_nz(i) > 1 {
            self.eliminate_col(i);
            self.eliminate_row(i);
        }
    }

    fn eliminate_col(&mut self, i: usize) {
        for i1 in 0..self.target.num_rows() {
            if i == i1 || self.target[(i1, i)].is_zero() {
                continue;
            }

            // d = sx + ty,
            // a = x/d,
            // b = y/d.

            // [ s t][x] < i  = [d]
            // [-b a][y] < i1   [0]

            let x = &self.target[(i, i)];
            let y = &self.target[(i1, i)];

            let (d, s, t) = bezout_pair(x, y);
            let (a, b) = (x / &d, -(y / &d));

            self.left_elementary([&s, &t, &b, &a], i, i1);
        }
    }

    fn eliminate_row(&mut self, i: usize) {
        for j1 in 0..self.target.num_cols() {
            if i == j1 || self.target[(i, j1)].is_zero() {
                continue;
            }

            // [x y][s -b] = [d 0]
            //      [t  a]

            let x = &self.target[(i, i)];
            let y = &self.target[(i, j1)];

            let (d, s, t) = bezout_pair(x, y);
            let (a, b) = (x / &d, -(y / &d));

            self.right_elementary([&s, &t, &b, &a], i, j1);
        }
    }

    /// Makes the diagonal a divisibility chain and its entries positive.
    ///
    /// After `i` was processed against every `j > i`, `d_i` divides all later
    /// entries and later merges only replace entries by multiples of `d_i`,
    /// so one pass over the pairs suffices.
    fn diag_normalize(&mut self) {
        debug_assert!(self.target.is_diagonal());

        let n = self.target.min_dim();
        let r = (0..n).find(|&i| self.target[(i, i)].is_zero()).unwrap_or(n);

        for i in 0..r {
            for j in i + 1..r {
                self.diag_normalize_step(i, j);
            }
        }

        for i in 0..r {
            if self.target[(i, i)].is_negative() {
                self.target.negate_row(i, &Z);
                self.l.negate_row(i, &Z);
                trace!("negate-row: {i}");
            }
        }
    }

    fn diag_normalize_step(&mut self, i: usize, j: usize) {
        let x = &self.target[(i, i)];
        let y = &self.target[(j, j)];

        if divides(x, y) {
            return;
        }

        if divides(y, x) {
            self.swap_rows(i, j);
            self.swap_cols(i, j);
            return;
        }

        // d = sx + ty,
        // a = x/d,
        // b = y/d.

        // [1   1][x  ][s -b] = [d    ]
        // [-tb sa][  y][t  a]   [  xy/d]

        let (d, s, t) = extended_gcd(x, y);
        let (a, b) = (x / &d, y / &d);

        let mtb = -(&t * &b);
        let sa = &s * &a;
        let one = BigInt::from(1);
        let mb = -b;
        self.left_elementary([&one, &one, &mtb, &sa], i, j);
        self.right_elementary([&s, &t, &mb, &a], i, j);

        debug_assert!(self.target.is_diagonal());
    }
}
