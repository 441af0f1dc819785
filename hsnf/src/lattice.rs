//! Integer lattices and operations on them.
//!
//! The free functions take basis (or generator) matrices whose rows are the
//! lattice vectors. The `*_with_layout` variants accept [`Layout::Columns`]
//! for matrices whose columns are the vectors; results are returned in the
//! same layout.

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::arith::gcd;
use crate::error::{Error, Result, ensure_dim};
use crate::hnf::{HnfStyle, hermite_normal_form};
use crate::matrix::{IntegerMatrix, RationalMatrix};
use crate::rings::{Q, Z};
use crate::snf::smith_form;
use crate::vector::IntegerVector;

/// How lattice vectors are laid out in a matrix.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Layout {
    /// Each row is a vector.
    #[default]
    Rows,
    /// Each column is a vector.
    Columns,
}

/// A lattice, i.e. the integer span of a set of vectors.
///
/// The basis is always kept in row-style Hermite normal form without zero
/// rows, so two lattices compare equal iff they contain the same points.
/// The basis matrix stores the ambient dimension (the number of columns) even
/// if it has zero rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    basis: IntegerMatrix,
}

impl Lattice {
    /// Creates a lattice that contains only the zero vector.
    pub fn zero(ambient_dim: usize) -> Self {
        Self { basis: IntegerMatrix::zero(0, ambient_dim) }
    }

    /// The lattice generated by the rows of the matrix, which may be
    /// linearly dependent.
    pub fn from_generators(generators: &IntegerMatrix) -> Self {
        let mut basis = hermite_normal_form(generators, HnfStyle::Row).h;
        basis.remove_zero_rows();
        Self { basis }
    }

    /// The canonical basis. The basis vectors are the rows.
    pub fn basis(&self) -> &IntegerMatrix {
        &self.basis
    }

    pub fn into_basis(self) -> IntegerMatrix {
        self.basis
    }

    /// Returns the rank of the lattice, i.e. the number of basis vectors.
    pub fn rank(&self) -> usize {
        self.basis.num_rows()
    }

    pub fn ambient_dim(&self) -> usize {
        self.basis.num_cols()
    }

    /// Returns the vector on the lattice that is the linear combination of the
    /// basis vectors with the given coefficients.
    pub fn at(&self, coefficients: &[BigInt]) -> IntegerVector {
        assert_eq!(coefficients.len(), self.rank());
        self.basis.rows().zip(coefficients).fold(
            IntegerVector::zero(self.ambient_dim()),
            |mut acc, (b, c)| {
                acc.mul_add_assign(c, b, &Z);
                acc
            },
        )
    }

    /// Reduces `v` to the canonical representative of `v + L`.
    pub fn reduce(&self, v: &mut IntegerVector) {
        v.reduce(&self.basis, &Z);
    }

    /// Is `v` a point of the lattice?
    pub fn contains(&self, v: &IntegerVector) -> bool {
        assert_eq!(v.dim(), self.ambient_dim(), "Vector must live in the ambient space.");
        let mut v = v.clone();
        self.reduce(&mut v);
        v.is_zero()
    }

    /// Is every point of `other` a point of `self`?
    pub fn contains_lattice(&self, other: &Lattice) -> bool {
        other.basis.rows().all(|r| self.contains(&IntegerVector::from_entries(r)))
    }

    /// The smallest lattice containing both lattices, i.e. their sum.
    pub fn union(&self, other: &Lattice) -> Lattice {
        assert_eq!(self.ambient_dim(), other.ambient_dim());
        Lattice::from_generators(&self.basis.vstack(&other.basis))
    }

    /// The points both lattices have in common.
    pub fn intersection(&self, other: &Lattice) -> Lattice {
        assert_eq!(self.ambient_dim(), other.ambient_dim());
        let n = self.ambient_dim();

        // The rows of [B1 B1; B2 0] whose left half vanishes after the
        // reduction carry a basis of the intersection in their right half.
        let top = self.basis.hstack(&self.basis);
        let bottom = other.basis.hstack(&IntegerMatrix::zero(other.rank(), n));
        let h = hermite_normal_form(&top.vstack(&bottom), HnfStyle::Row).h;

        let rows: Vec<&[BigInt]> = h
            .rows()
            .filter(|r| r[..n].iter().all(|e| e.is_zero()) && r[n..].iter().any(|e| !e.is_zero()))
            .map(|r| &r[n..])
            .collect();

        let generators = IntegerMatrix::from_iter(
            rows.len(),
            n,
            rows.iter().flat_map(|r| r.iter().cloned()),
        );
        Lattice::from_generators(&generators)
    }
}

/// A rational basis stored as an integer numerator and a common positive
/// denominator such that `gcd(denominator, numerator) = 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DualBasis {
    pub numerator: IntegerMatrix,
    pub denominator: BigInt,
}

impl DualBasis {
    /// The basis as a matrix of rationals.
    pub fn to_rational(&self) -> RationalMatrix {
        let mut m: RationalMatrix =
            self.numerator.transform(|e| BigRational::from_integer(e.clone()));
        m.div_assign(&BigRational::from_integer(self.denominator.clone()), &Q);
        m
    }

    /// Are all entries integers?
    pub fn is_integral(&self) -> bool {
        self.denominator.is_one()
    }
}

/// Brings basis vectors into rows and checks the ambient dimension.
fn to_rows(b: &IntegerMatrix, layout: Layout) -> Result<IntegerMatrix> {
    let b = match layout {
        Layout::Rows => b.clone(),
        Layout::Columns => b.transposed(),
    };
    if b.num_cols() == 0 {
        return Err(Error::DegenerateInput("lattice has ambient dimension 0"));
    }
    Ok(b)
}

fn from_rows(b: IntegerMatrix, layout: Layout) -> IntegerMatrix {
    match layout {
        Layout::Rows => b,
        Layout::Columns => b.transposed(),
    }
}

fn lattice_pair(
    b1: &IntegerMatrix,
    b2: &IntegerMatrix,
    layout: Layout,
) -> Result<(Lattice, Lattice)> {
    let (b1, b2) = (to_rows(b1, layout)?, to_rows(b2, layout)?);
    ensure_dim("ambient dimension", b1.num_cols(), b2.num_cols())?;
    Ok((Lattice::from_generators(&b1), Lattice::from_generators(&b2)))
}

/// Do the rows of both matrices span the same lattice?
pub fn equivalent(b1: &IntegerMatrix, b2: &IntegerMatrix) -> Result<bool> {
    equivalent_with_layout(b1, b2, Layout::Rows)
}

pub fn equivalent_with_layout(
    b1: &IntegerMatrix,
    b2: &IntegerMatrix,
    layout: Layout,
) -> Result<bool> {
    let (l1, l2) = lattice_pair(b1, b2, layout)?;
    Ok(l1 == l2)
}

/// A basis of the smallest lattice containing both lattices, in Hermite
/// normal form.
pub fn compute_union(b1: &IntegerMatrix, b2: &IntegerMatrix) -> Result<IntegerMatrix> {
    compute_union_with_layout(b1, b2, Layout::Rows)
}

pub fn compute_union_with_layout(
    b1: &IntegerMatrix,
    b2: &IntegerMatrix,
    layout: Layout,
) -> Result<IntegerMatrix> {
    let (l1, l2) = lattice_pair(b1, b2, layout)?;
    let u = l1.union(&l2);
    debug!("union: rank {} + rank {} => rank {}.", l1.rank(), l2.rank(), u.rank());
    Ok(from_rows(u.into_basis(), layout))
}

/// A basis of the intersection of both lattices, in Hermite normal form.
pub fn compute_intersection(b1: &IntegerMatrix, b2: &IntegerMatrix) -> Result<IntegerMatrix> {
    compute_intersection_with_layout(b1, b2, Layout::Rows)
}

pub fn compute_intersection_with_layout(
    b1: &IntegerMatrix,
    b2: &IntegerMatrix,
    layout: Layout,
) -> Result<IntegerMatrix> {
    let (l1, l2) = lattice_pair(b1, b2, layout)?;
    let i = l1.intersection(&l2);
    debug!("intersection: rank {} and rank {} => rank {}.", l1.rank(), l2.rank(), i.rank());
    Ok(from_rows(i.into_basis(), layout))
}

/// The dual basis `(B·Bᵗ)⁻¹·B` of a basis `B` of full row rank.
///
/// Its rows span the same rational space as `B` and satisfy
/// `dual·Bᵗ = I`.
pub fn compute_dual(b: &IntegerMatrix) -> Result<DualBasis> {
    compute_dual_with_layout(b, Layout::Rows)
}

pub fn compute_dual_with_layout(b: &IntegerMatrix, layout: Layout) -> Result<DualBasis> {
    let b = to_rows(b, layout)?;
    let k = b.num_rows();

    // L·G·R = D, so G⁻¹ = R·D⁻¹·L and d·G⁻¹ = R·diag(d/d_i)·L is integral
    // for the last invariant factor d.
    let g = b.mul(&b.transposed(), &Z);
    let snf = smith_form(&g);
    if snf.rank() != k {
        return Err(Error::DegenerateInput("basis is not of full row rank"));
    }

    let factors = snf.invariant_factors();
    let denominator = factors.last().map_or_else(BigInt::one, |d| (*d).clone());
    let scale: Vec<BigInt> = factors.iter().map(|d| &denominator / *d).collect();
    let scale = IntegerMatrix::diagonal(k, k, &scale);

    let mut numerator = snf.r.mul(&scale, &Z).mul(&snf.l, &Z).mul(&b, &Z);

    let content = numerator.entries_row_major().fold(denominator.clone(), |acc, e| gcd(&acc, e));
    let mut denominator = denominator;
    if !content.is_one() && !content.is_zero() {
        numerator.map_mut(|e| *e /= &content);
        denominator /= &content;
    }

    debug!("dual of rank {k} basis, denominator {denominator}.");
    Ok(DualBasis { numerator: from_rows(numerator, layout), denominator })
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng as _, distr::{Distribution as _, Uniform}, rngs::StdRng};

    use super::*;

    fn m<const R: usize, const C: usize>(a: [[i64; C]; R]) -> IntegerMatrix {
        IntegerMatrix::from_array(a)
    }

    #[test]
    fn equivalence() {
        let l1 = m([[1, 0, 0], [0, 1, 0]]);
        assert!(equivalent(&l1, &m([[1, 5, 0], [1, 6, 0]])).unwrap());
        assert!(!equivalent(&l1, &m([[1, 5, 0], [1, 1, 0]])).unwrap());
        let columns = m([[1, 1], [5, 6], [0, 0]]);
        assert!(equivalent_with_layout(&l1.transposed(), &columns, Layout::Columns).unwrap());
    }

    #[test]
    fn equivalence_laws() {
        let rng = &mut StdRng::seed_from_u64(0);
        let dist = Uniform::new_inclusive(-9i64, 9).unwrap();
        for _ in 0..50 {
            let b = IntegerMatrix::from_iter(3, 3, (0..9).map(|_| dist.sample(rng).into()));
            assert!(equivalent(&b, &b).unwrap());

            // Unimodular changes of basis do not change the lattice.
            let a = IntegerMatrix::from_iter(3, 3, (0..9).map(|_| dist.sample(rng).into()));
            let nf = hermite_normal_form(&a, HnfStyle::Row);
            let c = nf.u.mul(&b, &Z);
            assert!(equivalent(&b, &c).unwrap());
            assert!(equivalent(&c, &b).unwrap());
            let h = Lattice::from_generators(&b).into_basis();
            assert!(equivalent(&c, &h).unwrap());
        }
    }

    #[test]
    fn union() {
        let l1 = m([[1, 0, 0], [1, 1, 0]]);
        let l2 = m([[1, 0, 2], [1, 2, 1]]);
        assert_eq!(compute_union(&l1, &l2).unwrap(), IntegerMatrix::identity(3));

        let u =
            compute_union_with_layout(&l1.transposed(), &l2.transposed(), Layout::Columns).unwrap();
        assert_eq!(u, IntegerMatrix::identity(3));

        let l = m([[2, 4], [0, 6]]);
        assert!(equivalent(&compute_union(&l, &l).unwrap(), &l).unwrap());
    }

    #[test]
    fn intersection() {
        let l1 = IntegerMatrix::identity(3);
        let l2 = m([[-3, 4, 0], [-4, -3, 0], [0, 0, 5]]);
        let i = compute_intersection(&l1, &l2).unwrap();
        assert!(equivalent(&i, &m([[25, 0, 0], [-7, 1, 0], [0, 0, 5]])).unwrap());
        assert!(equivalent(&i, &m([[1, 7, 0], [0, 25, 0], [0, 0, 5]])).unwrap());
        assert!(equivalent(&i, &l2).unwrap());

        assert!(equivalent(&compute_intersection(&l2, &l2).unwrap(), &l2).unwrap());
    }

    #[test]
    fn intersection_of_sublattices() {
        // 2Z x Z and Z x 3Z meet in 2Z x 3Z.
        let i = compute_intersection(&m([[2, 0], [0, 1]]), &m([[1, 0], [0, 3]])).unwrap();
        assert_eq!(i, [[2, 0], [0, 3]]);

        // Lines that only meet at the origin.
        let i = compute_intersection(&m([[1, 0]]), &m([[0, 1]])).unwrap();
        assert_eq!(i.shape(), (0, 2));

        // 4Z and 6Z meet in 12Z.
        let i = compute_intersection(&m([[4]]), &m([[6]])).unwrap();
        assert_eq!(i, [[12]]);
    }

    #[test]
    fn contains() {
        let l = Lattice::from_generators(&m([[2, 1], [0, 3]]));
        assert!(l.contains(&IntegerVector::from_entries([4, 5])));
        assert!(!l.contains(&IntegerVector::from_entries([1, 0])));
        assert!(l.contains(&l.at(&[BigInt::from(-2), BigInt::from(7)])));
        assert!(l.contains_lattice(&Lattice::from_generators(&m([[6, 0]]))));
        assert!(Lattice::zero(2).contains(&IntegerVector::zero(2)));
    }

    #[test]
    fn dual() {
        let b = m([[6, 4, 10], [-1, 1, -5]]);
        let dual = compute_dual(&b).unwrap();
        let d = &dual.denominator;
        let scaled = IntegerMatrix::diagonal(2, 2, &[d.clone(), d.clone()]);
        assert_eq!(dual.numerator.mul(&b.transposed(), &Z), scaled);
        assert!(dual.denominator > BigInt::zero());

        let content = dual
            .numerator
            .entries_row_major()
            .fold(dual.denominator.clone(), |a, e| gcd(&a, e));
        assert!(content.is_one());

        let q = dual.to_rational();
        let bt = b.transposed().transform::<Q, _>(|e| BigRational::from_integer(e.clone()));
        assert_eq!(q.mul(&bt, &Q), RationalMatrix::identity(2));
    }

    #[test]
    fn dual_of_unimodular_is_integral() {
        let b = m([[1, 1], [0, 1]]);
        let dual = compute_dual(&b).unwrap();
        assert!(dual.is_integral());
        assert_eq!(dual.numerator.mul(&b.transposed(), &Z), IntegerMatrix::identity(2));

        let cols = compute_dual_with_layout(&b.transposed(), Layout::Columns).unwrap();
        assert_eq!(cols.numerator, dual.numerator.transposed());
    }

    #[test]
    fn dual_needs_full_rank() {
        let b = m([[1, 2], [2, 4]]);
        assert!(matches!(compute_dual(&b), Err(Error::DegenerateInput(_))));
    }

    #[test]
    fn shape_errors() {
        assert!(matches!(
            compute_union(&m([[1, 0]]), &m([[1, 0, 0]])),
            Err(Error::ShapeMismatch { expected: 2, found: 3, .. })
        ));
        assert!(matches!(
            equivalent(&IntegerMatrix::zero(2, 0), &IntegerMatrix::zero(2, 0)),
            Err(Error::DegenerateInput(_))
        ));
    }
}
