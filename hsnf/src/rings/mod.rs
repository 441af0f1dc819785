//! The kinds of numbers
//! ([rings](https://en.wikipedia.org/wiki/Ring_(mathematics))) the matrices
//! are built from.
//!
//! All reductions happen over [`Z`]. [`Q`] only exists so that a dual lattice
//! basis, which generally has rational entries, can be expressed exactly as a
//! [`crate::matrix::RationalMatrix`].
//!
//! An instance of [`Ring`] is passed to any function that does arithmetic on
//! ring elements, e.g. `m.row_multiply_add(i, j, &c, &Z)`.

mod integers;
mod rationals;
mod traits;

pub use integers::*;
pub use rationals::*;
pub use traits::*;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

impl_ring_element!(BigInt);
impl_ring_element!(BigRational);

/// Negates an element without allocating. There should really be a `NegAssign`
/// trait for this in `num_traits`.
pub(crate) fn neg_assign<T: std::ops::Neg<Output = T> + Default>(e: &mut T) {
    *e = -std::mem::take(e);
}
