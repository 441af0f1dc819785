use std::cmp::Ordering;

/// An element of a ring.
/// This exists mostly for convenience, so we can call `e.is_zero` on ring
/// elements without having a reference to the ring around.
pub trait RingElement: 'static + Clone + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Returns the "zero" element of the ring.
    fn zero() -> Self;

    /// Is the given element "zero"?
    fn is_zero(&self) -> bool;

    /// Returns the "one" element of the ring.
    fn one() -> Self;

    /// Is the given element "one"?
    fn is_one(&self) -> bool;
}

macro_rules! impl_ring_element {
    ($t:ident) => {
        impl RingElement for $t {
            fn zero() -> Self {
                Zero::zero()
            }

            fn is_zero(&self) -> bool {
                Zero::is_zero(self)
            }

            fn one() -> Self {
                One::one()
            }

            fn is_one(&self) -> bool {
                One::is_one(self)
            }
        }
    };
}

pub(crate) use impl_ring_element;

/// A ring.
///
/// An instance of the ring is passed to every function doing arithmetic on
/// its elements. For [`super::Z`] and [`super::Q`] the instance is a unit
/// struct, but it keeps the matrix and vector code independent of the
/// element type.
pub trait Ring: 'static + Clone + PartialEq + Eq + std::fmt::Debug {
    /// The type of the elements of the ring.
    type Element: RingElement;

    /// Returns the "zero" element of the ring.
    fn zero() -> Self::Element {
        Self::Element::zero()
    }

    /// Returns the "one" element of the ring.
    fn one() -> Self::Element {
        Self::Element::one()
    }

    /// Negates the element in place.
    fn neg_assign(&self, e: &mut Self::Element);

    /// Negates the element, i.e. computes `0 - e`.
    fn neg(&self, mut e: Self::Element) -> Self::Element {
        self.neg_assign(&mut e);
        e
    }

    /// Add an element to another element.
    fn add_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Add two elements.
    fn add(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.add_assign(&mut l, r);
        l
    }

    /// Subtract one element from another.
    fn sub_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Subtract one element from another.
    fn sub(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.sub_assign(&mut l, r);
        l
    }

    /// Multiply two elements.
    fn mul_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Multiply two elements.
    fn mul(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.mul_assign(&mut l, r);
        l
    }

    /// Multiply two elements and add the result to another element.
    fn mul_add_assign(
        &self,
        acc: &mut Self::Element,
        a: &Self::Element,
        b: &Self::Element,
    ) {
        self.add_assign(acc, &self.mul(a.clone(), b))
    }

    /// Check if an element is a unit.
    fn is_unit(&self, e: &Self::Element) -> bool;
}

/// A field.
pub trait Field: Ring {
    /// Divide an element by another element.
    fn div_assign(&self, l: &mut Self::Element, r: &Self::Element);

    /// Divide an element by another element.
    fn div(&self, mut l: Self::Element, r: &Self::Element) -> Self::Element {
        self.div_assign(&mut l, r);
        l
    }
}

/// A ring where you can compare two elements.
///
/// The reductions in [`crate::hnf`] and [`crate::snf`] pick pivots by
/// [`OrderedRing::cmp_abs`] and normalize signs with
/// [`OrderedRing::is_negative`].
pub trait OrderedRing: Ring {
    /// Compare two elements.
    fn cmp(&self, l: &Self::Element, r: &Self::Element) -> Ordering;

    /// Is the given element less than 0?
    fn is_negative(&self, e: &Self::Element) -> bool {
        self.cmp(e, &Self::zero()).is_lt()
    }

    /// Compute the absolute value of the element in place.
    fn abs_assign(&self, e: &mut Self::Element) {
        if self.is_negative(e) {
            self.neg_assign(e);
        }
    }

    /// Compute the absolute value of the element.
    fn abs(&self, mut e: Self::Element) -> Self::Element {
        self.abs_assign(&mut e);
        e
    }

    /// Compare the absolute value of two elements.
    fn cmp_abs(&self, l: &Self::Element, r: &Self::Element) -> Ordering {
        self.cmp(&self.abs(l.clone()), &self.abs(r.clone()))
    }
}

/// A ring where you can do integer division.
///
/// This is needed by the reduction algorithms, which rely on the remainder
/// of [`IntDivRing::euclidean_div`] being non-negative.
pub trait IntDivRing: OrderedRing {
    /// Divide two elements such that the remainder is non-negative.
    fn euclidean_div(l: &Self::Element, r: &Self::Element) -> Self::Element;

    /// Compute the remainder of the euclidean division.
    fn euclidean_rem(l: &Self::Element, r: &Self::Element) -> Self::Element;
}
