// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

#[cfg(test)]
mod property_tests {
    use std::collections::BTreeSet;

    use proptest::{
        collection::vec,
        prelude::*,
        proptest,
    };

    use crate::skiplist::SkipList;

    proptest! {
        #[test]
        fn test_level_zero_is_sorted_and_unique(
            keys in vec(any::<i32>(), 0..512),
            seed in any::<u64>(),
        ) {
            let mut list = SkipList::with_seed(256, 0.5, seed).unwrap();
            list.extend(keys.iter().copied());

            let expected: BTreeSet<i32> = keys.iter().copied().collect();
            let actual: Vec<i32> = list.iter().copied().collect();

            prop_assert!(actual.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
            prop_assert!(list.check_links());
        }

        #[test]
        fn test_membership(
            inserted in vec(-1_000i32..1_000, 0..256),
            probes in vec(-1_100i32..1_100, 0..256),
            seed in any::<u64>(),
        ) {
            let mut list = SkipList::with_seed(128, 0.6, seed).unwrap();
            for key in &inserted {
                list.insert(*key);
            }

            let model: BTreeSet<i32> = inserted.iter().copied().collect();
            for key in &inserted {
                prop_assert_eq!(list.search(key), Some(key));
            }
            for key in &probes {
                prop_assert_eq!(list.contains(key), model.contains(key));
            }
        }

        #[test]
        fn test_every_level_is_a_subset_of_the_one_below(
            keys in vec(any::<u16>(), 1..512),
            p in 0.05f64..0.95,
            seed in any::<u64>(),
        ) {
            let mut list = SkipList::with_seed(keys.len(), p, seed).unwrap();
            list.extend(keys);

            for level in 1..list.max_level() {
                let lower: BTreeSet<&u16> = list.iter_level(level - 1).collect();
                let upper: Vec<&u16> = list.iter_level(level).collect();
                prop_assert!(upper.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(upper.iter().all(|key| lower.contains(key)));
            }

            // rebuild level 0 from the towers and compare
            let rebuilt: Vec<u16> = list.towers().into_iter().map(|(key, _)| *key).collect();
            prop_assert_eq!(rebuilt, list.iter().copied().collect::<Vec<_>>());
            for (_, height) in list.towers() {
                prop_assert!(height >= 1 && height <= list.max_level());
            }
        }

        #[test]
        fn test_duplicates_are_ignored(
            keys in vec(0u8..64, 0..128),
            seed in any::<u64>(),
        ) {
            let mut once = SkipList::with_seed(64, 0.5, seed).unwrap();
            let mut twice = SkipList::with_seed(64, 0.5, seed).unwrap();
            once.extend(keys.iter().copied());
            twice.extend(keys.iter().copied());
            twice.extend(keys.iter().copied());

            prop_assert_eq!(once.len(), twice.len());
            prop_assert_eq!(
                once.iter().collect::<Vec<_>>(),
                twice.iter().collect::<Vec<_>>()
            );
            // duplicates never draw a height, so the towers match exactly
            prop_assert_eq!(once.towers(), twice.towers());
        }

        #[test]
        fn test_first_and_last(
            keys in vec(any::<i64>(), 1..256),
            seed in any::<u64>(),
        ) {
            let mut list = SkipList::with_seed(256, 0.5, seed).unwrap();
            list.extend(keys.iter().copied());
            prop_assert_eq!(list.first(), keys.iter().min());
            prop_assert_eq!(list.last(), keys.iter().max());
        }
    }
}
