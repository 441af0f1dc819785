use super::*;

/// The rationals. Only used to express dual lattice bases, never reduced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Q;

impl Ring for Q {
    type Element = BigRational;

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign(e)
    }

    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l += r;
    }

    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l -= r;
    }

    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l *= r;
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        !RingElement::is_zero(e.numer())
    }
}

impl Field for Q {
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element) {
        *l /= r;
    }
}
