//! Property checks for the admission rules on the synchronous ledger state.

use ledger_framework::{LedgerEntity, LedgerState, ListOrder, UnkeyedPolicy};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    seq: u64,
    key: Option<u8>,
}

#[derive(Debug, thiserror::Error)]
#[error("unreachable")]
struct Never;

impl LedgerEntity for Entry {
    type Key = u8;
    type Candidate = Option<u8>;
    type Context = ();
    type Error = Never;

    fn admission_key(candidate: &Option<u8>) -> Option<u8> {
        *candidate
    }

    fn from_candidate(seq: u64, key: Option<u8>, _: &()) -> Result<Self, Never> {
        Ok(Self { seq, key })
    }
}

fn policy() -> impl Strategy<Value = UnkeyedPolicy> {
    prop_oneof![
        Just(UnkeyedPolicy::SingleSlot),
        Just(UnkeyedPolicy::AlwaysAdmit)
    ]
}

proptest! {
    #[test]
    fn keys_stay_unique_and_numbers_stay_dense(
        keys in proptest::collection::vec(proptest::option::of(0u8..16), 0..64),
        policy in policy(),
    ) {
        let mut ledger = LedgerState::<Entry>::new(policy);
        let mut successes = 0u64;
        for key in keys {
            if ledger.admit(key, &()).unwrap().is_admitted() {
                successes += 1;
            }
        }

        prop_assert_eq!(ledger.counter(), successes);
        prop_assert_eq!(ledger.len() as u64, successes);

        let mut seen = HashSet::new();
        for (pos, entry) in ledger.entries().iter().enumerate() {
            prop_assert_eq!(entry.seq, pos as u64 + 1);
            if let Some(key) = entry.key {
                prop_assert!(seen.insert(key), "key {} admitted twice", key);
            }
        }
    }

    #[test]
    fn repeating_a_key_changes_nothing(
        keys in proptest::collection::vec(0u8..32, 1..32),
        repeats in 1usize..5,
    ) {
        let mut once = LedgerState::<Entry>::default();
        let mut many = LedgerState::<Entry>::default();
        for &key in &keys {
            once.admit(Some(key), &()).unwrap();
            for _ in 0..repeats {
                many.admit(Some(key), &()).unwrap();
            }
        }

        prop_assert_eq!(once.counter(), many.counter());
        prop_assert_eq!(once.entries(), many.entries());
    }

    #[test]
    fn reverse_listing_mirrors_insertion(
        keys in proptest::collection::vec(proptest::option::of(any::<u8>()), 0..48),
    ) {
        let mut ledger = LedgerState::<Entry>::new(UnkeyedPolicy::AlwaysAdmit);
        for key in keys {
            ledger.admit(key, &()).unwrap();
        }

        let forward = ledger.list(ListOrder::Insertion);
        let mut backward = ledger.list(ListOrder::Reverse);
        backward.reverse();
        prop_assert_eq!(forward.as_slice(), ledger.entries());
        prop_assert_eq!(forward, backward);
    }
}
