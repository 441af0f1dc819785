//! Exact integer arithmetic the reductions are built on.
//!
//! Everything here works on arbitrary precision [`BigInt`]s, so nothing can
//! overflow. The division helpers are floor based: remainders lie in
//! `[0, |d|)`, which the sign normalization of the normal forms relies on.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

/// Extended euclidean algorithm.
///
/// Returns `(g, x, y)` with `g = gcd(|a|, |b|) >= 0` and `a*x + b*y = g`.
/// `g` is zero iff both `a` and `b` are zero, in which case `x = y = 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = old_r.div_floor(&r);
        let new_r = &old_r - &q * &r;
        let new_s = &old_s - &q * &s;
        let new_t = &old_t - &q * &t;
        (old_r, r) = (r, new_r);
        (old_s, s) = (s, new_s);
        (old_t, t) = (t, new_t);
    }

    if old_r.is_zero() {
        return (BigInt::zero(), BigInt::zero(), BigInt::zero());
    }

    // The remainder sequence can end on a negative gcd when the inputs have
    // mixed signs.
    if old_r.is_negative() {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// Bezout coefficients tuned for row/column combination.
///
/// Same contract as [`extended_gcd`], but when `x` divides `y` this returns
/// `(|x|, sign(x), 0)`, so that combining two rows where the pivot already
/// divides the other entry is a plain elementary operation and does not mix
/// in multiples of the other row.
pub fn bezout_pair(x: &BigInt, y: &BigInt) -> (BigInt, BigInt, BigInt) {
    if !x.is_zero() && y.is_multiple_of(x) {
        return (x.abs(), x.signum(), BigInt::zero());
    }
    extended_gcd(x, y)
}

/// Greatest common divisor, always non-negative.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

/// Least common multiple, always non-negative. `lcm(0, x) = 0`.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    a.lcm(b)
}

/// Floor division. Panics if `d` is zero.
pub fn floor_div(a: &BigInt, d: &BigInt) -> BigInt {
    a.div_floor(d)
}

/// The non-negative remainder of `a` modulo `|d|`. Panics if `d` is zero.
pub fn floor_mod(a: &BigInt, d: &BigInt) -> BigInt {
    let r = a.mod_floor(d);
    if r.is_negative() { r + d.abs() } else { r }
}

/// Does `d` divide `a`? Zero only divides zero.
pub fn divides(d: &BigInt, a: &BigInt) -> bool {
    if d.is_zero() {
        a.is_zero()
    } else {
        a.is_multiple_of(d)
    }
}

/// The inverse of `a` modulo `n` in `[0, n)`, if `gcd(a, n) = 1`.
///
/// Modulo 1 every element is its own (zero) inverse.
///
/// # Panics
///
/// Panics if `n` is not positive.
pub fn mod_inverse(a: &BigInt, n: &BigInt) -> Option<BigInt> {
    assert!(n.is_positive(), "modulus must be positive");
    let (g, x, _) = extended_gcd(&floor_mod(a, n), n);
    if n.is_one() {
        return Some(BigInt::zero());
    }
    g.is_one().then(|| floor_mod(&x, n))
}

/// Solves `a*x = b (mod n)` for `n > 0`.
///
/// Returns `(x, step)` such that the solutions are exactly `x + k*step`,
/// with `0 <= x < step` and `step = n / gcd(a, n)`, or `None` if there is no
/// solution.
///
/// # Panics
///
/// Panics if `n` is not positive.
pub fn solve_scalar_congruence(
    a: &BigInt,
    b: &BigInt,
    n: &BigInt,
) -> Option<(BigInt, BigInt)> {
    assert!(n.is_positive(), "modulus must be positive");
    let a = floor_mod(a, n);
    let b = floor_mod(b, n);

    // gcd(0, n) = n, so a zero coefficient leaves `x` free iff `b = 0`.
    let g = gcd(&a, n);
    if !divides(&g, &b) {
        return None;
    }

    let step = n / &g;
    let inv = mod_inverse(&(&a / &g), &step)?;
    let x = floor_mod(&((&b / &g) * inv), &step);
    Some((x, step))
}

/// Chinese remaindering of `x = r_i (mod m_i)` for positive, not necessarily
/// coprime `m_i`.
///
/// Returns `(r, m)` with `m = lcm(m_i)` and `0 <= r < m` or `None` if the
/// congruences are inconsistent. The empty system is `0 (mod 1)`.
///
/// # Panics
///
/// Panics if some `m_i` is not positive.
pub fn chinese_remainder(congruences: &[(BigInt, BigInt)]) -> Option<(BigInt, BigInt)> {
    let mut acc = (BigInt::zero(), BigInt::one());
    for (r, m) in congruences {
        assert!(m.is_positive(), "modulus must be positive");
        let (r1, m1) = acc;
        let g = gcd(&m1, m);
        let diff = r - &r1;
        if !divides(&g, &diff) {
            return None;
        }

        // r1 + m1*k = r (mod m)  <=>  (m1/g)*k = diff/g (mod m/g).
        let m_g = m / &g;
        let inv = mod_inverse(&(&m1 / &g), &m_g)?;
        let k = floor_mod(&((&diff / &g) * inv), &m_g);
        let l = &m1 * &m_g;
        acc = (floor_mod(&(r1 + &m1 * k), &l), l);
    }
    Some(acc)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng as _;
    use rand::distr::{Distribution as _, Uniform};
    use rand::rngs::StdRng;

    fn int(i: i64) -> BigInt {
        BigInt::from(i)
    }

    #[test]
    fn extended_gcd_random() {
        let mut rng = StdRng::seed_from_u64(0);
        let dist = Uniform::new_inclusive(-500i64, 500).unwrap();
        for _ in 0..2000 {
            let (a, b) = (int(dist.sample(&mut rng)), int(dist.sample(&mut rng)));
            let (g, x, y) = extended_gcd(&a, &b);
            assert!(!g.is_negative());
            assert_eq!(&a * &x + &b * &y, g, "a: {a}, b: {b}");
            assert_eq!(g, gcd(&a, &b));
        }
    }

    #[test]
    fn extended_gcd_zero() {
        assert_eq!(extended_gcd(&int(0), &int(0)).0, int(0));
        let (g, x, y) = extended_gcd(&int(0), &int(-7));
        assert_eq!(g, int(7));
        assert_eq!(int(-7) * y + int(0) * x, int(7));
    }

    #[test]
    fn bezout_pair_prefers_divisor() {
        assert_eq!(bezout_pair(&int(-3), &int(12)), (int(3), int(-1), int(0)));
        let (g, s, t) = bezout_pair(&int(4), &int(6));
        assert_eq!(g, int(2));
        assert_eq!(int(4) * s + int(6) * t, int(2));
    }

    #[test]
    fn floor_helpers() {
        assert_eq!(floor_mod(&int(-7), &int(3)), int(2));
        assert_eq!(floor_mod(&int(-7), &int(-3)), int(2));
        assert_eq!(floor_div(&int(-7), &int(3)), int(-3));
        assert!(divides(&int(0), &int(0)));
        assert!(!divides(&int(0), &int(5)));
        assert!(divides(&int(-4), &int(12)));
    }

    #[test]
    fn inverses() {
        assert_eq!(mod_inverse(&int(3), &int(7)), Some(int(5)));
        assert_eq!(mod_inverse(&int(-3), &int(7)), Some(int(2)));
        assert_eq!(mod_inverse(&int(2), &int(4)), None);
        assert_eq!(mod_inverse(&int(0), &int(1)), Some(int(0)));
    }

    #[test]
    fn scalar_congruence() {
        let (x, step) = solve_scalar_congruence(&int(2), &int(8), &int(10)).unwrap();
        assert_eq!((x.clone(), step.clone()), (int(4), int(5)));
        assert_eq!(floor_mod(&(int(2) * (x + step)), &int(10)), int(8));
        assert!(solve_scalar_congruence(&int(2), &int(1), &int(4)).is_none());
        assert_eq!(solve_scalar_congruence(&int(0), &int(4), &int(4)), Some((int(0), int(1))));
    }

    #[test]
    fn crt() {
        let congruences = [(int(0), int(3)), (int(3), int(4)), (int(4), int(5))];
        assert_eq!(chinese_remainder(&congruences), Some((int(39), int(60))));

        // Non-coprime but consistent.
        let congruences = [(int(2), int(4)), (int(4), int(6))];
        assert_eq!(chinese_remainder(&congruences), Some((int(10), int(12))));

        let congruences = [(int(0), int(2)), (int(1), int(4))];
        assert_eq!(chinese_remainder(&congruences), None);
    }

    #[test]
    #[should_panic(expected = "modulus must be positive")]
    fn mod_inverse_zero_modulus() {
        mod_inverse(&int(3), &int(0));
    }

    #[test]
    #[should_panic(expected = "modulus must be positive")]
    fn scalar_congruence_zero_modulus() {
        solve_scalar_congruence(&int(1), &int(1), &int(0));
    }

    #[test]
    #[should_panic(expected = "modulus must be positive")]
    fn crt_negative_modulus() {
        chinese_remainder(&[(int(1), int(3)), (int(0), int(-2))]);
    }
}
