use choropleth::ThresholdScale;
use proptest::prelude::*;

fn values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6f64..1e6, 1..64)
}

proptest! {
    #[test]
    fn k_minus_one_boundaries(v in values(), k in 1usize..20) {
        let s = ThresholdScale::build(v, k).unwrap();
        prop_assert_eq!(s.boundaries().len(), k - 1);
        prop_assert_eq!(s.classes(), k);
        prop_assert_eq!(s.tick_values().len(), k + 1);
    }

    #[test]
    fn boundaries_ascend(v in values(), k in 1usize..20) {
        let s = ThresholdScale::build(v, k).unwrap();
        if s.max() - s.min() > 1e-3 {
            for w in s.boundaries().windows(2) {
                prop_assert!(w[0] < w[1], "{:?}", s.boundaries());
            }
            for &b in s.boundaries() {
                prop_assert!(s.min() < b && b < s.max());
            }
        }
    }

    #[test]
    fn extremes_land_in_end_classes(v in values(), k in 1usize..20) {
        let s = ThresholdScale::build(v, k).unwrap();
        if s.is_degenerate() {
            prop_assert_eq!(s.lookup(s.max()), 0);
        } else {
            prop_assert_eq!(s.lookup(s.min()), 0);
            prop_assert_eq!(s.lookup(s.max()), k - 1);
        }
    }

    #[test]
    fn lookup_is_monotone(v in values(), k in 1usize..20,
                          a in -2e6f64..2e6, b in -2e6f64..2e6) {
        let s = ThresholdScale::build(v, k).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(s.lookup(lo) <= s.lookup(hi));
        prop_assert!(s.lookup(hi) < k);
    }

    #[test]
    fn equal_values_are_degenerate(x in -1e6f64..1e6, n in 1usize..10,
                                   k in 1usize..20, q in -2e6f64..2e6) {
        let s = ThresholdScale::build(vec![x; n], k).unwrap();
        prop_assert!(s.boundaries().iter().all(|&b| b == x));
        prop_assert_eq!(s.lookup(q), 0);
        prop_assert_eq!(s.lookup(x), 0);
    }
}
