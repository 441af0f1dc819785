//! Errors returned by the public entry points.
//!
//! Infeasible systems are not errors; the solvers return `Ok(None)` for them.

use num_bigint::BigInt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operand dimensions are incompatible.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A modulus that is zero or negative.
    #[error("invalid modulus {0}: moduli must be positive")]
    InvalidModulus(BigInt),

    /// The input does not have the structure the operation needs.
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rejects matrices with no rows or no columns.
pub(crate) fn ensure_non_empty(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 {
        return Err(Error::DegenerateInput("matrix has no rows"));
    }
    if cols == 0 {
        return Err(Error::DegenerateInput("matrix has no columns"));
    }
    Ok(())
}

/// Checks that a dimension has the expected value.
pub(crate) fn ensure_dim(context: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::ShapeMismatch { context, expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::ShapeMismatch { context: "right-hand side", expected: 3, found: 2 };
        assert_eq!(e.to_string(), "shape mismatch in right-hand side: expected 3, found 2");
        assert_eq!(
            Error::InvalidModulus(BigInt::from(-4)).to_string(),
            "invalid modulus -4: moduli must be positive"
        );
    }

    #[test]
    fn validation() {
        assert!(ensure_non_empty(1, 1).is_ok());
        assert!(matches!(ensure_non_empty(0, 3), Err(Error::DegenerateInput(_))));
        assert!(matches!(ensure_non_empty(3, 0), Err(Error::DegenerateInput(_))));
        assert!(ensure_dim("x", 2, 2).is_ok());
        assert_eq!(
            ensure_dim("x", 2, 1),
            Err(Error::ShapeMismatch { context: "x", expected: 2, found: 1 })
        );
    }
}
