use memalias_core::analysis::{compute_aliasing, Binding};
use proptest::collection;
use proptest::prelude::*;

/// Bindings with unique ids in a small address window, so overlaps are common.
fn arb_bindings() -> impl Strategy<Value = Vec<Binding>> {
    collection::vec((0u64..64, 0u64..24), 0..32).prop_map(|ranges| {
        ranges
            .into_iter()
            .enumerate()
            .map(|(i, (offset, size))| Binding::new(i as u64 + 100, offset, size))
            .collect()
    })
}

/// A binding set paired with a shuffled copy of itself.
fn arb_bindings_and_shuffle() -> impl Strategy<Value = (Vec<Binding>, Vec<Binding>)> {
    arb_bindings().prop_flat_map(|bindings| (Just(bindings.clone()), Just(bindings).prop_shuffle()))
}

proptest! {
    #[test]
    fn prop_permuting_input_does_not_change_output((bindings, shuffled) in arb_bindings_and_shuffle()) {
        let expected = compute_aliasing(&bindings).unwrap();
        prop_assert_eq!(compute_aliasing(&shuffled).unwrap(), expected.clone());
        prop_assert_eq!(compute_aliasing(&bindings).unwrap(), expected);
    }

    #[test]
    fn prop_regions_are_disjoint_ordered_and_shared(bindings in arb_bindings()) {
        let regions = compute_aliasing(&bindings).unwrap();

        for r in &regions {
            prop_assert!(r.size > 0);
            prop_assert!(r.sharers.len() >= 2);
            prop_assert!(r.sharers.windows(2).all(|w| w[0] < w[1]));
        }
        for pair in regions.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].offset);
        }
    }

    #[test]
    fn prop_regions_match_point_coverage(bindings in arb_bindings()) {
        let regions = compute_aliasing(&bindings).unwrap();

        for point in 0..96u64 {
            let mut covering: Vec<u64> = bindings
                .iter()
                .filter(|b| b.offset <= point && point < b.offset + b.size)
                .map(|b| b.id)
                .collect();
            covering.sort_unstable();

            let found = regions.iter().find(|r| r.offset <= point && point < r.end());
            if covering.len() > 1 {
                prop_assert!(found.is_some(), "point {} is covered but not reported", point);
                prop_assert_eq!(&found.unwrap().sharers, &covering);
            } else {
                prop_assert!(found.is_none(), "point {} is not aliased", point);
            }
        }
    }
}
