//! Vectors.
//!
//! Like [`crate::matrix::Matrix`], a [`Vector`] is generic over the [`Ring`]
//! and not over the element type, so that arithmetic can be implemented
//! without an unconstrained ring parameter. The ring instance is passed to
//! every arithmetic method.

use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use crate::matrix::Matrix;
use crate::rings::{IntDivRing, Ring, RingElement, Z};

/// An owned vector.
pub struct Vector<R: Ring> {
    entries: Vec<R::Element>,
}

/// A vector of arbitrary precision integers.
pub type IntegerVector = Vector<Z>;

impl<R: Ring> Vector<R> {
    /// Returns an empty vector.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Returns a zero vector.
    pub fn zero(dim: usize) -> Self {
        Self { entries: vec![R::zero(); dim] }
    }

    /// Creates a vector from a slice of things convertible to ring elements.
    pub fn from_entries<U, V>(a: U) -> Self
    where
        U: AsRef<[V]>,
        V: Into<R::Element> + Clone,
    {
        Self { entries: a.as_ref().iter().cloned().map(Into::into).collect() }
    }

    /// Creates a vector from an iterator of exactly `dim` elements.
    pub fn from_iter<I: Iterator<Item = R::Element>>(dim: usize, iter: I) -> Self {
        let entries: Vec<_> = iter.take(dim).collect();
        assert_eq!(entries.len(), dim, "The iterator needs to return at least `dim` items.");
        Self { entries }
    }

    /// Takes ownership of the entries.
    pub fn from_raw_entries(entries: Vec<R::Element>) -> Self {
        Self { entries }
    }

    /// The dimension of the vector.
    pub fn dim(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries as a slice.
    pub fn as_slice(&self) -> &[R::Element] {
        &self.entries
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, R::Element> {
        self.entries.iter()
    }

    /// Returns an iterator over the mutable entries.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, R::Element> {
        self.entries.iter_mut()
    }

    /// Call a function on each entry and return the resulting vector.
    pub fn transform<U: Ring, F: FnMut(&R::Element) -> U::Element>(&self, f: F) -> Vector<U> {
        Vector { entries: self.entries.iter().map(f).collect() }
    }

    /// Is this the zero vector?
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|e| e.is_zero())
    }

    /// Add a scaled vector to this vector: `self += c * v`.
    pub fn mul_add_assign(&mut self, c: &R::Element, v: &[R::Element], r: &R) {
        assert_eq!(self.dim(), v.len(), "Vectors must have the same dimension.");
        if c.is_zero() {
            return;
        }
        for (e, x) in self.entries.iter_mut().zip(v) {
            r.mul_add_assign(e, c, x);
        }
    }

    /// The dot product.
    pub fn dot(&self, other: &[R::Element], r: &R) -> R::Element {
        assert_eq!(self.dim(), other.len(), "Vectors must have the same dimension.");
        dot(&self.entries, other, r)
    }
}

impl<R: IntDivRing> Vector<R> {
    /// Reduces the vector by the rows of a matrix in row echelon form (e.g. a
    /// Hermite normal form), so that each coordinate at a pivot position lies
    /// in `[0, pivot)`.
    ///
    /// The result differs from the input by a lattice vector, and two vectors
    /// differ by a lattice vector iff they reduce to the same vector.
    pub fn reduce(&mut self, m: &Matrix<R>, r: &R) {
        assert_eq!(self.dim(), m.num_cols());
        if m.num_rows() == 0 {
            return;
        }

        let mut row = 0;
        for i in 0..self.dim() {
            let e = &m[(row, i)];
            if e.is_zero() {
                continue;
            }
            let c = r.neg(R::euclidean_div(&self[i], e));
            self.mul_add_assign(&c, m.row(row), r);
            row += 1;
            if row == m.num_rows() {
                break;
            }
        }
    }
}

/// The dot product of two slices.
pub(crate) fn dot<R: Ring>(l: &[R::Element], r: &[R::Element], ring: &R) -> R::Element {
    l.iter().zip(r).fold(R::zero(), |mut acc, (a, b)| {
        ring.mul_add_assign(&mut acc, a, b);
        acc
    })
}

impl<R: Ring> Clone for Vector<R> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone() }
    }
}

impl<R: Ring> Index<usize> for Vector<R> {
    type Output = R::Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<R: Ring> IndexMut<usize> for Vector<R> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

impl<R: Ring> PartialEq for Vector<R> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<R: Ring> Eq for Vector<R> where R::Element: Eq {}

impl<R: Ring, V: Into<R::Element> + Clone> PartialEq<[V]> for Vector<R> {
    fn eq(&self, other: &[V]) -> bool {
        self.dim() == other.len()
            && self
                .entries
                .iter()
                .zip(other)
                .all(|(a, b)| *a == Into::<R::Element>::into(b.clone()))
    }
}

impl<R: Ring, V: Into<R::Element> + Clone, const D: usize> PartialEq<[V; D]> for Vector<R> {
    fn eq(&self, other: &[V; D]) -> bool {
        *self == other[..]
    }
}

impl<R: Ring> Debug for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<'a, R: Ring> IntoIterator for &'a Vector<R> {
    type Item = &'a R::Element;
    type IntoIter = std::slice::Iter<'a, R::Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn reduce_by_hnf() {
        let h = Matrix::<Z>::from_rows(&[[2, 1], [0, 3]]);
        let mut v = IntegerVector::from_entries([7, 5]);
        v.reduce(&h, &Z);
        // 7 - 3*2 = 1 in the first coordinate, then 5 - 3 = 2 reduced mod 3.
        assert_eq!(v, [1, 2]);
    }

    #[test]
    fn reduce_skips_non_pivot_columns() {
        let h = Matrix::<Z>::from_rows(&[[0, 4, 1]]);
        let mut v = IntegerVector::from_entries([5, -1, 0]);
        v.reduce(&h, &Z);
        assert_eq!(v, [5, 3, 1]);
    }

    #[test]
    fn dot_and_mul_add() {
        let mut v = IntegerVector::from_entries([1, 2, 3]);
        assert_eq!(v.dot(Vector::<Z>::from_entries([4, 5, 6]).as_slice(), &Z), BigInt::from(32));
        v.mul_add_assign(&(-2).into(), &[1.into(), 1.into(), 1.into()], &Z);
        assert_eq!(v, [-1, 0, 1]);
        assert!(!v.is_zero());
    }
}
