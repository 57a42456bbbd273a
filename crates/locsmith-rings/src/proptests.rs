//! Property-based tests for prime-power residue arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::PowerRing;

    // Strategy for small odd primes plus 2
    fn small_prime() -> impl Strategy<Value = i64> {
        prop_oneof![Just(2), Just(3), Just(5), Just(7), Just(11), Just(101)]
    }

    fn ring() -> impl Strategy<Value = PowerRing> {
        (small_prime(), 1u32..6).prop_map(|(p, e)| PowerRing::new(p, e).unwrap())
    }

    proptest! {
        #[test]
        fn reduce_is_canonical(ring in ring(), v in any::<i64>()) {
            let r = ring.reduce(v);
            prop_assert!((0..ring.modulus()).contains(&r));
            // Reducing again is a no-op
            prop_assert_eq!(ring.reduce(r), r);
        }

        #[test]
        fn add_commutative(ring in ring(), a in any::<i64>(), b in any::<i64>()) {
            let a = ring.reduce(a);
            let b = ring.reduce(b);
            prop_assert_eq!(ring.add(a, b), ring.add(b, a));
        }

        #[test]
        fn mul_distributes(ring in ring(), a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
            let a = ring.reduce(a);
            let b = ring.reduce(b);
            let c = ring.reduce(c);
            prop_assert_eq!(
                ring.mul(a, ring.add(b, c)),
                ring.add(ring.mul(a, b), ring.mul(a, c))
            );
        }

        #[test]
        fn neg_is_additive_inverse(ring in ring(), a in any::<i64>()) {
            let a = ring.reduce(a);
            prop_assert_eq!(ring.add(a, ring.neg(a)), 0);
        }

        #[test]
        fn units_invert(ring in ring(), v in any::<i64>()) {
            let a = ring.reduce(v);
            match ring.inverse(a) {
                Some(inv) => {
                    prop_assert!(ring.is_unit(a));
                    prop_assert!((0..ring.modulus()).contains(&inv));
                    prop_assert_eq!(ring.mul(a, inv), 1);
                }
                None => prop_assert!(a == 0 || !ring.is_unit(a)),
            }
        }

        #[test]
        fn descend_divides_modulus(ring in ring()) {
            let mut r = ring;
            let mut steps = 0u32;
            while !r.is_trivial() {
                let next = r.descend();
                prop_assert_eq!(next.modulus() * r.prime(), r.modulus());
                r = next;
                steps += 1;
            }
            prop_assert_eq!(steps, ring.exponent());
        }
    }
}
