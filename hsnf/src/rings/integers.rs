use super::*;
use num_traits::{Euclid, Signed};

/// The integers, with arbitrary precision [`BigInt`] elements.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Z;

impl Ring for Z {
    type Element = BigInt;

    fn neg_assign(&self, e: &mut Self::Element) {
        neg_assign(e);
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

    fn mul_add_assign(
        &self,
        acc: &mut Self::Element,
        a: &Self::Element,
        b: &Self::Element,
    ) {
        if RingElement::is_zero(a) || RingElement::is_zero(b) {
            return;
        }
        *acc += a * b;
    }

    fn is_unit(&self, e: &Self::Element) -> bool {
        e.magnitude().is_one()
    }
}

impl IntDivRing for Z {
    fn euclidean_div(l: &Self::Element, r: &Self::Element) -> Self::Element {
        l.div_euclid(r)
    }

    fn euclidean_rem(l: &Self::Element, r: &Self::Element) -> Self::Element {
        l.rem_euclid(r)
    }
}

impl OrderedRing for Z {
    fn cmp(&self, l: &Self::Element, r: &Self::Element) -> std::cmp::Ordering {
        l.cmp(r)
    }

    fn is_negative(&self, e: &Self::Element) -> bool {
        e.is_negative()
    }

    fn abs_assign(&self, e: &mut Self::Element) {
        if e.is_negative() {
            self.neg_assign(e);
        }
    }

    fn cmp_abs(&self, l: &Self::Element, r: &Self::Element) -> std::cmp::Ordering {
        l.magnitude().cmp(r.magnitude())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng as _;
    use rand::distr::{Distribution as _, Uniform};

    #[test]
    fn euclidean_rem_is_non_negative() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let dividend_dist = Uniform::new_inclusive(-1000, 1000).unwrap();
        let divisor_dist = Uniform::new_inclusive(-100, 100).unwrap();

        for _ in 0..1000 {
            let dividend: i64 = dividend_dist.sample(&mut rng);
            let divisor: i64 = loop {
                let d = divisor_dist.sample(&mut rng);
                if d != 0 {
                    break d;
                }
            };

            let (l, r) = (BigInt::from(dividend), BigInt::from(divisor));
            let q = Z::euclidean_div(&l, &r);
            let rem = Z::euclidean_rem(&l, &r);
            assert!(!rem.is_negative(), "rem({dividend}, {divisor}) = {rem}");
            assert!(rem.magnitude() < r.magnitude());
            assert_eq!(q * &r + rem, l);
        }
    }

    #[test]
    fn cmp_abs_ignores_sign() {
        assert!(Z.cmp_abs(&BigInt::from(-3), &BigInt::from(2)).is_gt());
        assert!(Z.cmp_abs(&BigInt::from(-2), &BigInt::from(2)).is_eq());
        assert!(Z.is_unit(&BigInt::from(-1)));
        assert!(!Z.is_unit(&BigInt::from(2)));
    }
}
