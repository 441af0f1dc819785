//! Exact Hermite and Smith normal forms of integer matrices, and what they
//! are good for: solving linear systems over the integers or modulo a number
//! and computing with integer lattices.
//!
//! All arithmetic is done with arbitrary precision integers, so results are
//! exact.
//!
//! ```
//! use hsnf::{IntegerMatrix, smith_normal_form};
//!
//! let a = IntegerMatrix::from_rows(&[[2, 4, 4], [-6, 6, 12], [10, -4, -16]]);
//! let (d, l, r) = smith_normal_form(&a).unwrap();
//! assert_eq!(d, [[2, 0, 0], [0, 6, 0], [0, 0, 12]]);
//! assert_eq!(l.mul(&a, &hsnf::rings::Z).mul(&r, &hsnf::rings::Z), d);
//! ```

pub mod arith;
pub mod error;
pub mod hnf;
pub mod lattice;
pub mod matrix;
pub mod rings;
pub mod snf;
pub mod solver;
pub mod vector;

pub use error::{Error, Result};
pub use hnf::{
    HnfStyle, NormalForm, column_style_hermite_normal_form, hermite_normal_form,
    row_style_hermite_normal_form,
};
pub use lattice::{
    DualBasis, Lattice, Layout, compute_dual, compute_dual_with_layout, compute_intersection,
    compute_intersection_with_layout, compute_union, compute_union_with_layout, equivalent,
    equivalent_with_layout,
};
pub use matrix::{IntegerMatrix, Matrix, RationalMatrix};
pub use snf::{SmithResult, smith_form, smith_normal_form};
pub use solver::{
    LinearSystemSolution, solve_frobenius_congruent, solve_integer_linear_system,
    solve_modular_integer_linear_system,
};
pub use vector::{IntegerVector, Vector};
