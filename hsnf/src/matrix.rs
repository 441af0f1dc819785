//! Matrices.
//! Like [`crate::vector::Vector`], a [`Matrix`] is generic over the ring.
//!
//! Matrices are stored densely in row-major order. They are plain values:
//! every reduction in this crate clones its input and works on the copy.

use std::fmt::{Debug, Display};
use std::ops::{Index, IndexMut, Range};

use itertools::iproduct;
use num_bigint::BigInt;

use crate::rings::{Field, Q, Ring, RingElement, Z};
use crate::vector::{Vector, dot};

/// A dense, owned matrix over the ring `R`.
pub struct Matrix<R: Ring> {
    entries: Vec<R::Element>,
    rows: usize,
    cols: usize,
}

/// A matrix of arbitrary precision integers.
pub type IntegerMatrix = Matrix<Z>;

/// A matrix of arbitrary precision rationals.
pub type RationalMatrix = Matrix<Q>;

impl<R: Ring> Matrix<R> {
    /// Return an empty (0x0) matrix.
    pub fn empty() -> Self {
        Self { entries: Vec::new(), rows: 0, cols: 0 }
    }

    /// Returns an `r` by `c` zero matrix.
    pub fn zero(r: usize, c: usize) -> Self {
        Self { entries: vec![R::zero(); r * c], rows: r, cols: c }
    }

    /// Returns the `n` by `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Creates a matrix from an iterator in row-major order.
    pub fn from_iter<I: Iterator<Item = R::Element>>(r: usize, c: usize, iter: I) -> Self {
        let entries: Vec<_> = iter.take(r * c).collect();
        assert_eq!(entries.len(), r * c, "The iterator needs to return at least r * c items.");
        Self { entries, rows: r, cols: c }
    }

    /// Creates a matrix from an array of rows.
    pub fn from_array<U: Into<R::Element>, const RS: usize, const CS: usize>(
        a: [[U; CS]; RS],
    ) -> Self {
        let entries = a.into_iter().flatten().map(Into::into).collect();
        Self { entries, rows: RS, cols: CS }
    }

    /// Creates a matrix from slice of rows.
    ///
    /// Panics if the rows have different lengths. An empty slice gives the
    /// 0x0 matrix; use [`Matrix::zero`] for a matrix with no rows but a given
    /// number of columns.
    pub fn from_rows<U, V>(rows: &[U]) -> Self
    where
        U: AsRef<[V]>,
        V: Into<R::Element> + Clone,
    {
        if rows.is_empty() {
            return Self::empty();
        }

        let r = rows.len();
        let c = rows[0].as_ref().len();
        assert!(rows.iter().all(|r| r.as_ref().len() == c), "Rows must have the same length.");

        Self::from_iter(r, c, rows.iter().flat_map(|r| r.as_ref().iter().cloned().map(Into::into)))
    }

    /// Creates an `r` by `c` matrix with the given leading diagonal.
    pub fn diagonal(r: usize, c: usize, diag: &[R::Element]) -> Self {
        assert!(diag.len() <= r.min(c));
        let mut m = Self::zero(r, c);
        for (i, e) in diag.iter().enumerate() {
            m[(i, i)] = e.clone();
        }
        m
    }

    /// The number of rows of the matrix.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// The number of columns of the matrix.
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the smaller of the two dimensions.
    pub fn min_dim(&self) -> usize {
        self.rows.min(self.cols)
    }

    /// Is the matrix empty, i.e. has it zero rows or columns?
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Is the matrix square?
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the row `r`.
    pub fn row(&self, r: usize) -> &[R::Element] {
        assert!(r < self.rows, "Row index out of bounds.");
        &self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns the row `r` mutably.
    pub fn row_mut(&mut self, r: usize) -> &mut [R::Element] {
        assert!(r < self.rows, "Row index out of bounds.");
        &mut self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns an iterator over the column `c`.
    pub fn col(&self, c: usize) -> impl DoubleEndedIterator<Item = &R::Element> {
        assert!(c < self.cols, "Column index out of bounds.");
        (0..self.rows).map(move |r| &self[(r, c)])
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[R::Element]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Returns an iterator over the entries in row-major order.
    pub fn entries_row_major(&self) -> impl Iterator<Item = &R::Element> {
        self.entries.iter()
    }

    /// Returns an iterator over the entries in column-major order.
    pub fn entries_col_major(&self) -> impl Iterator<Item = &R::Element> {
        iproduct!(0..self.cols, 0..self.rows).map(move |(c, r)| &self[(r, c)])
    }

    /// Returns mutable references to two different rows.
    pub fn get_rows_mut(
        &mut self,
        i: usize,
        j: usize,
    ) -> (&mut [R::Element], &mut [R::Element]) {
        assert_ne!(i, j, "Tried to mutably borrow the same row twice.");
        assert!(i < self.rows && j < self.rows, "Row index out of bounds.");
        let c = self.cols;
        if i < j {
            let (top, bottom) = self.entries.split_at_mut(j * c);
            (&mut top[i * c..(i + 1) * c], &mut bottom[..c])
        } else {
            let (top, bottom) = self.entries.split_at_mut(i * c);
            (&mut bottom[..c], &mut top[j * c..(j + 1) * c])
        }
    }

    /// Call a function on each entry and return the resulting matrix.
    pub fn transform<U: Ring, F: FnMut(&R::Element) -> U::Element>(&self, f: F) -> Matrix<U> {
        Matrix { entries: self.entries.iter().map(f).collect(), rows: self.rows, cols: self.cols }
    }

    /// Call a function on each entry.
    pub fn map_mut<F: FnMut(&mut R::Element)>(&mut self, f: F) {
        self.entries.iter_mut().for_each(f)
    }

    /// Creates a matrix that is the transpose of the current matrix.
    pub fn transposed(&self) -> Self {
        Self::from_iter(self.cols, self.rows, self.entries_col_major().cloned())
    }

    /// Copies the block of the given rows and columns.
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(rows.end <= self.rows && cols.end <= self.cols, "Block out of bounds.");
        let (r, c) = (rows.len(), cols.len());
        Self::from_iter(r, c, iproduct!(rows, cols).map(|(i, j)| self[(i, j)].clone()))
    }

    /// Stacks `other` below `self`. Both need the same number of columns.
    pub fn vstack(&self, other: &Self) -> Self {
        assert_eq!(self.cols, other.cols, "Stacked matrices need the same number of columns.");
        let entries = self.entries.iter().chain(&other.entries).cloned().collect();
        Self { entries, rows: self.rows + other.rows, cols: self.cols }
    }

    /// Places `other` to the right of `self`. Both need the same number of
    /// rows.
    pub fn hstack(&self, other: &Self) -> Self {
        assert_eq!(self.rows, other.rows, "Concatenated matrices need the same number of rows.");
        let iter = (0..self.rows).flat_map(|r| self.row(r).iter().chain(other.row(r)).cloned());
        Self::from_iter(self.rows, self.cols + other.cols, iter)
    }

    /// Is every entry zero?
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|e| e.is_zero())
    }

    /// Is every entry off the leading diagonal zero?
    pub fn is_diagonal(&self) -> bool {
        iproduct!(0..self.rows, 0..self.cols).all(|(i, j)| i == j || self[(i, j)].is_zero())
    }

    /// The entries of the leading diagonal.
    pub fn diagonal_entries(&self) -> impl Iterator<Item = &R::Element> {
        (0..self.min_dim()).map(move |i| &self[(i, i)])
    }

    /// Appends `n` zero rows.
    pub fn append_zero_rows(&mut self, n: usize) {
        self.entries.resize(self.entries.len() + n * self.cols, R::zero());
        self.rows += n;
    }

    /// Removes all zero rows, keeping the order of the others.
    pub fn remove_zero_rows(&mut self) {
        let cols = self.cols;
        if cols == 0 {
            self.rows = 0;
            return;
        }
        let keep: Vec<bool> = self.rows().map(|r| r.iter().any(|e| !e.is_zero())).collect();
        let mut i = 0;
        self.entries.retain(|_| {
            let k = keep[i / cols];
            i += 1;
            k
        });
        self.rows = keep.iter().filter(|k| **k).count();
    }

    /// Swap two rows.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (a, b) = self.get_rows_mut(i, j);
        a.swap_with_slice(b);
    }

    /// Swap two columns.
    pub fn swap_columns(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for k in 0..self.rows {
            self.entries.swap(k * self.cols + i, k * self.cols + j);
        }
    }

    /// Negates all elements of a row.
    pub fn negate_row(&mut self, row: usize, r: &R) {
        for e in self.row_mut(row) {
            r.neg_assign(e);
        }
    }

    /// Negates all elements of a column.
    pub fn negate_col(&mut self, col: usize, r: &R) {
        for k in 0..self.rows {
            r.neg_assign(&mut self[(k, col)]);
        }
    }

    /// Add a scaled row to another row. N += M * c.
    /// `m` and `n` can not be equal.
    pub fn row_multiply_add(&mut self, n: usize, m: usize, c: &R::Element, r: &R) {
        let (dst, src) = self.get_rows_mut(n, m);
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            r.mul_add_assign(d, s, c);
        }
    }

    /// Add a scaled column to another column. N += M * c.
    /// `m` and `n` can not be equal.
    pub fn col_multiply_add(&mut self, n: usize, m: usize, c: &R::Element, r: &R) {
        assert_ne!(m, n);
        assert!(n < self.cols && m < self.cols);
        for k in 0..self.rows {
            let s = self[(k, m)].clone();
            r.mul_add_assign(&mut self[(k, n)], &s, c);
        }
    }

    /// Multiplies the rows `i` and `j` from the left by `[a, b; c, d]`:
    /// the new row `i` is `a*i + b*j` and the new row `j` is `c*i + d*j`.
    pub fn left_elementary(&mut self, comps: [&R::Element; 4], i: usize, j: usize, r: &R) {
        let [a, b, c, d] = comps;
        let (ri, rj) = self.get_rows_mut(i, j);
        for (x, y) in ri.iter_mut().zip(rj.iter_mut()) {
            let (x0, y0) = (x.clone(), y.clone());
            *x = r.mul(x0.clone(), a);
            r.mul_add_assign(x, &y0, b);
            *y = r.mul(x0, c);
            r.mul_add_assign(y, &y0, d);
        }
    }

    /// Multiplies the columns `i` and `j` from the right by `[a, c; b, d]`:
    /// the new column `i` is `a*i + b*j` and the new column `j` is
    /// `c*i + d*j`.
    pub fn right_elementary(&mut self, comps: [&R::Element; 4], i: usize, j: usize, r: &R) {
        let [a, b, c, d] = comps;
        assert_ne!(i, j);
        for k in 0..self.rows {
            let (x0, y0) = (self[(k, i)].clone(), self[(k, j)].clone());
            let mut x = r.mul(x0.clone(), a);
            r.mul_add_assign(&mut x, &y0, b);
            let mut y = r.mul(x0, c);
            r.mul_add_assign(&mut y, &y0, d);
            self[(k, i)] = x;
            self[(k, j)] = y;
        }
    }

    /// Multiply two matrices.
    pub fn mul(&self, rhs: &Self, ring: &R) -> Self {
        assert_eq!(self.cols, rhs.rows, "Matrix dimensions do not match for multiplication.");
        let rhs_t = rhs.transposed();
        let iter = iproduct!(0..self.rows, 0..rhs.cols)
            .map(|(r, c)| dot(self.row(r), rhs_t.row(c), ring));
        Self::from_iter(self.rows, rhs.cols, iter)
    }

    /// Post-multiply a matrix with a vector.
    pub fn mul_vec_post(&self, rhs: &Vector<R>, ring: &R) -> Vector<R> {
        assert_eq!(self.cols, rhs.dim(), "Vector must have an entry for each column.");
        Vector::from_iter(self.rows, self.rows().map(|row| dot(row, rhs.as_slice(), ring)))
    }
}

impl<R: Field> Matrix<R> {
    /// Divide every entry by `c`.
    pub fn div_assign(&mut self, c: &R::Element, r: &R) {
        self.map_mut(|e| r.div_assign(e, c));
    }
}

impl Matrix<Z> {
    /// The determinant of a square matrix, computed exactly with fraction-free
    /// (Bareiss) elimination.
    pub fn determinant(&self) -> BigInt {
        assert!(self.is_square(), "Determinant of a non-square matrix.");
        let n = self.rows;
        if n == 0 {
            return Z::one();
        }

        let mut m = self.clone();
        let mut negate = false;
        let mut prev = Z::one();
        for k in 0..n - 1 {
            if m[(k, k)].is_zero() {
                let Some(p) = (k + 1..n).find(|&i| !m[(i, k)].is_zero()) else {
                    return Z::zero();
                };
                m.swap_rows(k, p);
                negate = !negate;
            }

            for i in k + 1..n {
                for j in k + 1..n {
                    // Exact by Sylvester's identity.
                    let v = (&m[(i, j)] * &m[(k, k)] - &m[(i, k)] * &m[(k, j)]) / &prev;
                    m[(i, j)] = v;
                }
            }
            prev = m[(k, k)].clone();
        }

        let d = m[(n - 1, n - 1)].clone();
        if negate { -d } else { d }
    }

    /// Is this a square matrix with determinant `1` or `-1`?
    pub fn is_unimodular(&self) -> bool {
        self.is_square() && Z.is_unit(&self.determinant())
    }
}

impl<R: Ring> Clone for Matrix<R> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone(), rows: self.rows, cols: self.cols }
    }
}

impl<R: Ring> Index<(usize, usize)> for Matrix<R> {
    type Output = R::Element;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        debug_assert!(r < self.rows && c < self.cols, "Index ({r}, {c}) out of bounds.");
        &self.entries[r * self.cols + c]
    }
}

impl<R: Ring> IndexMut<(usize, usize)> for Matrix<R> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Self::Output {
        debug_assert!(r < self.rows && c < self.cols, "Index ({r}, {c}) out of bounds.");
        &mut self.entries[r * self.cols + c]
    }
}

impl<R: Ring> PartialEq for Matrix<R> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.entries == other.entries
    }
}

impl<R: Ring> Eq for Matrix<R> where R::Element: Eq {}

impl<R: Ring, V, const RS: usize, const CS: usize> PartialEq<[[V; CS]; RS]> for Matrix<R>
where
    V: Into<R::Element> + Clone,
{
    fn eq(&self, other: &[[V; CS]; RS]) -> bool {
        self.rows == RS
            && self.cols == CS
            && self
                .entries
                .iter()
                .zip(other.iter().flatten())
                .all(|(a, b)| *a == Into::<R::Element>::into(b.clone()))
    }
}

impl<R: Ring> Debug for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

/// One row per line with right-aligned columns. Used by the trace logs.
impl<R: Ring> Display for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        let width = strs.iter().map(String::len).max().unwrap_or(0);
        for r in 0..self.rows {
            write!(f, "[")?;
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", strs[r * self.cols + c])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transpose_test() {
        let m = IntegerMatrix::from_rows(&[[2, 3], [4, 5], [6, 7]]);
        let t = m.transposed();
        assert_eq!(t.shape(), (2, 3));
        assert_eq!(t, [[2, 4, 6], [3, 5, 7]]);
        assert_eq!(t[(1, 0)], BigInt::from(3));
    }

    #[test]
    fn row_and_col() {
        let m = IntegerMatrix::from_rows(&[[2, 3], [4, 5]]);
        assert_eq!(m.row(1), &[BigInt::from(4), BigInt::from(5)]);
        let c: Vec<_> = m.col(1).cloned().collect();
        assert_eq!(c, vec![BigInt::from(3), BigInt::from(5)]);
        let mut r = m.rows();
        assert_eq!(r.next_back().unwrap()[0], BigInt::from(4));
    }

    #[test]
    fn elementary_operations() {
        let mut m = IntegerMatrix::from_rows(&[[1, 2], [3, 4], [5, 6]]);
        m.swap_rows(0, 2);
        assert_eq!(m, [[5, 6], [3, 4], [1, 2]]);
        m.swap_columns(0, 1);
        assert_eq!(m, [[6, 5], [4, 3], [2, 1]]);
        m.row_multiply_add(0, 2, &BigInt::from(-3), &Z);
        assert_eq!(m, [[0, 2], [4, 3], [2, 1]]);
        m.col_multiply_add(1, 0, &BigInt::from(1), &Z);
        assert_eq!(m, [[0, 2], [4, 7], [2, 3]]);
        m.negate_row(1, &Z);
        m.negate_col(0, &Z);
        assert_eq!(m, [[0, 2], [4, -7], [-2, 3]]);
    }

    #[test]
    fn two_by_two_elementary() {
        let one = BigInt::from(1);
        let two = BigInt::from(2);
        let zero = BigInt::from(0);
        let mut m = IntegerMatrix::from_rows(&[[1, 0], [0, 1]]);
        // [1 2; 0 1] from the left.
        m.left_elementary([&one, &two, &zero, &one], 0, 1, &Z);
        assert_eq!(m, [[1, 2], [0, 1]]);
        // [a, c; b, d] = [1 0; 2 1] from the right: column 0 += 2 * column 1.
        m.right_elementary([&one, &two, &zero, &one], 0, 1, &Z);
        assert_eq!(m, [[5, 2], [2, 1]]);
    }

    #[test]
    fn multiplication() {
        let a = IntegerMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        let b = IntegerMatrix::from_rows(&[[1, 0], [0, 1], [1, 1]]);
        assert_eq!(a.mul(&b, &Z), [[4, 5], [10, 11]]);
        let v = Vector::<Z>::from_entries([1, -1, 2]);
        assert_eq!(a.mul_vec_post(&v, &Z), [5, 11]);
        assert_eq!(IntegerMatrix::identity(2).mul(&a, &Z), a);
    }

    #[test]
    fn stacking_and_blocks() {
        let a = IntegerMatrix::from_rows(&[[1, 2]]);
        let b = IntegerMatrix::from_rows(&[[3, 4]]);
        let v = a.vstack(&b);
        assert_eq!(v, [[1, 2], [3, 4]]);
        assert_eq!(v.hstack(&v), [[1, 2, 1, 2], [3, 4, 3, 4]]);
        assert_eq!(v.submatrix(0..2, 1..2), [[2], [4]]);
        let mut z = v.vstack(&IntegerMatrix::zero(2, 2));
        z.remove_zero_rows();
        assert_eq!(z, v);
        let mut e = IntegerMatrix::zero(0, 3);
        e.append_zero_rows(1);
        assert_eq!(e.shape(), (1, 3));
    }

    #[test]
    fn determinant() {
        assert_eq!(IntegerMatrix::from_rows(&[[3, 1], [2, 2]]).determinant(), BigInt::from(4));
        let m = IntegerMatrix::from_rows(&[[0, 1, 0], [1, 0, 0], [0, 0, 1]]);
        assert_eq!(m.determinant(), BigInt::from(-1));
        assert!(m.is_unimodular());
        let m = IntegerMatrix::from_rows(&[[2, 4, 4], [-6, 6, 12], [10, -4, -16]]);
        assert_eq!(m.determinant(), BigInt::from(-144));
        let m = IntegerMatrix::from_rows(&[[1, 2], [2, 4]]);
        assert_eq!(m.determinant(), BigInt::from(0));
        assert!(IntegerMatrix::empty().is_unimodular());
    }

    #[test]
    fn display() {
        let m = IntegerMatrix::from_rows(&[[1, -10], [100, 0]]);
        assert_eq!(m.to_string(), "[  1 -10]\n[100   0]\n");
    }
}
