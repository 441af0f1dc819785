//! Solves systems of linear equations over the integers, modulo a number, or
//! with a separate modulus per equation.
//!
//! All solvers diagonalize the system with the Smith normal form
//! `L·A·R = D`, solve the scalar equations `d_i·y_i = (L·b)_i` and map the
//! solutions back with `x = R·y`.

use log::debug;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::arith::{chinese_remainder, divides, floor_mod, lcm, solve_scalar_congruence};
use crate::error::{Error, Result, ensure_dim, ensure_non_empty};
use crate::lattice::Lattice;
use crate::matrix::IntegerMatrix;
use crate::rings::Z;
use crate::snf::smith_form;
use crate::vector::IntegerVector;

/// The solutions of a linear system: `offset + span(basis)`, and for the
/// modular variants additionally `+ modulus·Zⁿ`.
///
/// The basis is in Hermite normal form and the offset is reduced against the
/// solution lattice, so equal solution sets have equal representations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSystemSolution {
    /// A particular solution.
    pub offset: IntegerVector,
    /// The rows generate the solutions of the homogeneous system.
    pub basis: IntegerMatrix,
    pub modulus: Option<BigInt>,
}

impl LinearSystemSolution {
    /// The number of unknowns.
    pub fn dim(&self) -> usize {
        self.offset.dim()
    }

    /// The solution `offset + Σ c_i·basis_i`, reduced modulo the modulus if
    /// there is one.
    pub fn at(&self, coefficients: &[BigInt]) -> IntegerVector {
        assert_eq!(coefficients.len(), self.basis.num_rows());
        let mut x = self.offset.clone();
        for (c, b) in coefficients.iter().zip(self.basis.rows()) {
            x.mul_add_assign(c, b, &Z);
        }
        if let Some(n) = &self.modulus {
            x.iter_mut().for_each(|e| *e = floor_mod(e, n));
        }
        x
    }

    /// The lattice of differences between solutions.
    pub fn solution_lattice(&self) -> Lattice {
        match &self.modulus {
            None => Lattice::from_generators(&self.basis),
            Some(n) => {
                let d = self.dim();
                let diag = vec![n.clone(); d];
                Lattice::from_generators(&self.basis.vstack(&IntegerMatrix::diagonal(d, d, &diag)))
            }
        }
    }

    /// Is `x` a solution?
    pub fn contains(&self, x: &IntegerVector) -> bool {
        assert_eq!(x.dim(), self.dim());
        let mut diff = x.clone();
        diff.mul_add_assign(&BigInt::from(-1), self.offset.as_slice(), &Z);
        self.solution_lattice().contains(&diff)
    }
}

fn validate_system(a: &IntegerMatrix, b: &IntegerVector) -> Result<()> {
    ensure_non_empty(a.num_rows(), a.num_cols())?;
    ensure_dim("right-hand side", a.num_rows(), b.dim())
}

fn ensure_modulus(n: &BigInt) -> Result<()> {
    if !n.is_positive() {
        return Err(Error::InvalidModulus(n.clone()));
    }
    Ok(())
}

/// Solves `A·x = b` over the integers.
///
/// Returns `None` if there is no integer solution.
pub fn solve_integer_linear_system(
    a: &IntegerMatrix,
    b: &IntegerVector,
) -> Result<Option<LinearSystemSolution>> {
    validate_system(a, b)?;
    debug!("solve integer system: {:?}.", a.shape());

    let snf = smith_form(a);
    let rank = snf.rank();
    let b = snf.l.mul_vec_post(b, &Z);

    // Rows beyond the rank of D are zero, so they read 0 = b_i.
    if b.iter().skip(rank).any(|e| !e.is_zero()) {
        return Ok(None);
    }

    let mut y = IntegerVector::zero(a.num_cols());
    for i in 0..rank {
        let d = &snf.d[(i, i)];
        if !divides(d, &b[i]) {
            return Ok(None);
        }
        y[i] = &b[i] / d;
    }

    // The columns of R beyond the rank span the kernel.
    let n = a.num_cols();
    let kernel = snf.r.submatrix(0..n, rank..n).transposed();
    let lattice = Lattice::from_generators(&kernel);

    let mut offset = snf.r.mul_vec_post(&y, &Z);
    lattice.reduce(&mut offset);

    debug!("solved, kernel rank: {}.", lattice.rank());
    Ok(Some(LinearSystemSolution { offset, basis: lattice.into_basis(), modulus: None }))
}

/// Solves `A·x = b (mod n)` for `n > 0`.
///
/// The offset has entries in `[0, n)` and the basis omits the rows `n·e_i`
/// that are implied by the modulus.
pub fn solve_modular_integer_linear_system(
    a: &IntegerMatrix,
    b: &IntegerVector,
    n: &BigInt,
) -> Result<Option<LinearSystemSolution>> {
    ensure_modulus(n)?;
    validate_system(a, b)?;
    debug!("solve system mod {n}: {:?}.", a.shape());
    Ok(solve_modular(a, b, n))
}

fn solve_modular(a: &IntegerMatrix, b: &IntegerVector, n: &BigInt) -> Option<LinearSystemSolution> {
    let (rows, cols) = a.shape();

    let a = a.transform::<Z, _>(|e| floor_mod(e, n));
    let b = b.transform::<Z, _>(|e| floor_mod(e, n));

    let snf = smith_form(&a);
    let b = snf.l.mul_vec_post(&b, &Z).transform::<Z, _>(|e| floor_mod(e, n));
    let k = a.min_dim();

    // Rows beyond the diagonal are zero.
    if b.iter().skip(k).any(|e| !e.is_zero()) {
        return None;
    }

    // Some solution to the diagonal system.
    let mut y = IntegerVector::zero(cols);

    // Generators of the solutions of the homogeneous diagonal system.
    let mut gens = IntegerMatrix::zero(0, cols);

    // Solve the scalar linear congruences.
    for i in 0..k {
        let (x, step) = solve_scalar_congruence(&snf.d[(i, i)], &b[i], n)?;
        y[i] = x;

        if &step != n {
            let r = gens.num_rows();
            gens.append_zero_rows(1);
            gens[(r, i)] = step;
        }
    }

    // If there are more variables than equations then the remaining
    // variables are free.
    for i in rows..cols {
        let r = gens.num_rows();
        gens.append_zero_rows(1);
        gens[(r, i)] = BigInt::one();
    }

    let mut offset = snf.r.mul_vec_post(&y, &Z);
    let gens = gens.mul(&snf.r.transposed(), &Z);

    let modulus = vec![n.clone(); cols];
    let full =
        Lattice::from_generators(&gens.vstack(&IntegerMatrix::diagonal(cols, cols, &modulus)));
    full.reduce(&mut offset);

    // Drop the rows that are implied by the modulus.
    let kept: Vec<&[BigInt]> = full.basis().rows().filter(|r| !is_scaled_unit(r, n)).collect();
    let basis = IntegerMatrix::from_iter(
        kept.len(),
        cols,
        kept.iter().flat_map(|r| r.iter().cloned()),
    );

    debug!("solved, {} generators besides the modulus.", basis.num_rows());
    Some(LinearSystemSolution { offset, basis, modulus: Some(n.clone()) })
}

/// Is `r` equal to `n·e_c` for some `c`?
fn is_scaled_unit(r: &[BigInt], n: &BigInt) -> bool {
    let mut nonzero = r.iter().filter(|e| !e.is_zero());
    nonzero.next() == Some(n) && nonzero.next().is_none()
}

/// Solves the system of congruences `a_i·x = b_i (mod m_i)`, one modulus per
/// equation.
///
/// The solutions are returned modulo `M = lcm(m_i)`.
pub fn solve_frobenius_congruent(
    a: &IntegerMatrix,
    b: &IntegerVector,
    moduli: &[BigInt],
) -> Result<Option<LinearSystemSolution>> {
    validate_system(a, b)?;
    ensure_dim("moduli", a.num_rows(), moduli.len())?;
    moduli.iter().try_for_each(ensure_modulus)?;

    let m = moduli.iter().fold(BigInt::one(), |acc, e| lcm(&acc, e));
    debug!("solve frobenius system: {:?}, lcm of moduli {m}.", a.shape());

    if a.num_cols() == 1 {
        return Ok(solve_single_unknown(a, b, moduli, &m));
    }

    // a_i·x = b_i (mod m_i)  <=>  (M/m_i)·a_i·x = (M/m_i)·b_i (mod M)
    let mut scaled = a.clone();
    let mut rhs = b.clone();
    for (i, mi) in moduli.iter().enumerate() {
        let f = &m / mi;
        scaled.row_mut(i).iter_mut().for_each(|e| *e *= &f);
        rhs[i] *= &f;
    }

    Ok(solve_modular(&scaled, &rhs, &m))
}

/// One unknown: solve each congruence and combine them by chinese
/// remaindering.
fn solve_single_unknown(
    a: &IntegerMatrix,
    b: &IntegerVector,
    moduli: &[BigInt],
    m: &BigInt,
) -> Option<LinearSystemSolution> {
    let congruences = moduli
        .iter()
        .enumerate()
        .map(|(i, mi)| solve_scalar_congruence(&a[(i, 0)], &b[i], mi))
        .collect::<Option<Vec<_>>>()?;

    let (r, step) = chinese_remainder(&congruences)?;

    let basis = if &step == m {
        IntegerMatrix::zero(0, 1)
    } else {
        IntegerMatrix::from_iter(1, 1, std::iter::once(step))
    };

    Some(LinearSystemSolution {
        offset: IntegerVector::from_raw_entries(vec![r]),
        basis,
        modulus: Some(m.clone()),
    })
}
