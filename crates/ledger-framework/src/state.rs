//! # Ledger State
//!
//! [`LedgerState`] is the synchronous, single-owner core of the framework: an append-only
//! sequence of records, a duplicate index over their admission keys, and the sequence
//! counter. It has no channels and no tasks. A single-threaded caller can own one directly;
//! concurrent callers go through a [`LedgerActor`](crate::LedgerActor), which owns one and
//! serializes every request against it.
//!
//! ## Admission
//!
//! 1. Compute the candidate's admission key.
//! 2. If the key is already present, reject. Nothing changes except the rejection tally.
//! 3. Otherwise build the record for sequence `counter + 1`. If building fails, nothing
//!    changes at all.
//! 4. Append the record, index its key and advance the counter, in one step.

use crate::entity::LedgerEntity;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How candidates without an admission key are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnkeyedPolicy {
    /// A missing key is a key like any other: once one unkeyed record is admitted,
    /// every later unkeyed candidate is rejected as its duplicate.
    #[default]
    SingleSlot,
    /// Unkeyed candidates never collide with anything and are always admitted.
    AlwaysAdmit,
}

impl fmt::Display for UnkeyedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnkeyedPolicy::SingleSlot => write!(f, "single-slot"),
            UnkeyedPolicy::AlwaysAdmit => write!(f, "always-admit"),
        }
    }
}

/// Error returned when parsing an unknown [`UnkeyedPolicy`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unkeyed policy `{0}` (expected `single-slot` or `always-admit`)")]
pub struct ParseUnkeyedPolicyError(pub String);

impl FromStr for UnkeyedPolicy {
    type Err = ParseUnkeyedPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-slot" => Ok(UnkeyedPolicy::SingleSlot),
            "always-admit" => Ok(UnkeyedPolicy::AlwaysAdmit),
            other => Err(ParseUnkeyedPolicyError(other.to_string())),
        }
    }
}

/// Order in which a listing is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Oldest first, exactly as admitted.
    #[default]
    Insertion,
    /// Newest first.
    Reverse,
}

/// Error returned when parsing an unknown [`ListOrder`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list order `{0}` (expected `insertion` or `reverse`)")]
pub struct ParseListOrderError(pub String);

impl FromStr for ListOrder {
    type Err = ParseListOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" => Ok(ListOrder::Insertion),
            "reverse" => Ok(ListOrder::Reverse),
            other => Err(ParseListOrderError(other.to_string())),
        }
    }
}

/// Outcome of a single admission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission<T: LedgerEntity> {
    /// The candidate was accepted; this is the record now stored in the ledger.
    Admitted(T),
    /// A record with the same key already exists. The ledger is unchanged.
    Rejected { key: Option<T::Key> },
}

impl<T: LedgerEntity> Admission<T> {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }

    /// The admitted record, if any.
    pub fn admitted(&self) -> Option<&T> {
        match self {
            Admission::Admitted(entry) => Some(entry),
            Admission::Rejected { .. } => None,
        }
    }
}

/// Point-in-time counters for a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerStats {
    /// The sequence counter: number of successful admissions.
    pub admitted: u64,
    /// Number of stored records.
    pub entries: usize,
    /// Number of candidates rejected as duplicates.
    pub rejected: u64,
}

/// Append-only record store with duplicate detection and sequential numbering.
pub struct LedgerState<T: LedgerEntity> {
    entries: Vec<T>,
    index: HashMap<T::Key, usize>,
    unkeyed: usize,
    counter: u64,
    rejected: u64,
    policy: UnkeyedPolicy,
}

impl<T: LedgerEntity> Default for LedgerState<T> {
    fn default() -> Self {
        Self::new(UnkeyedPolicy::default())
    }
}

impl<T: LedgerEntity> LedgerState<T> {
    /// Creates an empty ledger. The counter starts at 0.
    pub fn new(policy: UnkeyedPolicy) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            unkeyed: 0,
            counter: 0,
            rejected: 0,
            policy,
        }
    }

    /// Attempts to admit a candidate.
    ///
    /// Returns `Ok(Admission::Rejected)` for duplicates and `Err` only when the entity
    /// refuses to build a record. In both cases the entries and the counter are untouched.
    pub fn admit(
        &mut self,
        candidate: T::Candidate,
        ctx: &T::Context,
    ) -> Result<Admission<T>, T::Error> {
        let key = T::admission_key(&candidate);
        if self.is_duplicate(key.as_ref()) {
            self.rejected += 1;
            return Ok(Admission::Rejected { key });
        }

        let sequence = self.counter + 1;
        let entry = T::from_candidate(sequence, candidate, ctx)?;

        match key {
            Some(key) => {
                self.index.insert(key, self.entries.len());
            }
            None => self.unkeyed += 1,
        }
        self.entries.push(entry.clone());
        self.counter = sequence;

        Ok(Admission::Admitted(entry))
    }

    fn is_duplicate(&self, key: Option<&T::Key>) -> bool {
        match key {
            Some(key) => self.index.contains_key(key),
            None => self.policy == UnkeyedPolicy::SingleSlot && self.unkeyed > 0,
        }
    }

    /// Returns a copy of every record in the requested order.
    pub fn list(&self, order: ListOrder) -> Vec<T> {
        match order {
            ListOrder::Insertion => self.entries.clone(),
            ListOrder::Reverse => self.entries.iter().rev().cloned().collect(),
        }
    }

    /// Borrowed view of the records in admission order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Looks up the record admitted under `key`.
    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> UnkeyedPolicy {
        self.policy
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            admitted: self.counter,
            entries: self.entries.len(),
            rejected: self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        seq: u64,
        key: Option<String>,
        body: String,
    }

    #[derive(Debug)]
    struct NoteCandidate {
        key: Option<String>,
        body: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("empty body")]
    struct NoteError;

    impl LedgerEntity for Note {
        type Key = String;
        type Candidate = NoteCandidate;
        type Context = ();
        type Error = NoteError;

        fn admission_key(candidate: &NoteCandidate) -> Option<String> {
            candidate.key.clone()
        }

        fn from_candidate(seq: u64, c: NoteCandidate, _: &()) -> Result<Self, NoteError> {
            if c.body.is_empty() {
                return Err(NoteError);
            }
            Ok(Self {
                seq,
                key: c.key,
                body: c.body,
            })
        }
    }

    fn note(key: Option<&str>, body: &str) -> NoteCandidate {
        NoteCandidate {
            key: key.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_admit_assigns_sequential_numbers() {
        let mut ledger = LedgerState::<Note>::default();
        let a = ledger.admit(note(Some("a"), "first"), &()).unwrap();
        let b = ledger.admit(note(Some("b"), "second"), &()).unwrap();

        assert_eq!(a.admitted().unwrap().seq, 1);
        assert_eq!(b.admitted().unwrap().seq, 2);
        assert_eq!(ledger.counter(), 2);
    }

    #[test]
    fn test_duplicate_key_is_rejected_without_side_effects() {
        let mut ledger = LedgerState::<Note>::default();
        ledger.admit(note(Some("a"), "first"), &()).unwrap();

        let outcome = ledger.admit(note(Some("a"), "again"), &()).unwrap();
        assert_eq!(
            outcome,
            Admission::Rejected {
                key: Some("a".to_string())
            }
        );
        assert_eq!(ledger.counter(), 1);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].body, "first");
        assert_eq!(ledger.stats().rejected, 1);
    }

    #[test]
    fn test_failed_build_does_not_advance_counter() {
        let mut ledger = LedgerState::<Note>::default();
        assert!(ledger.admit(note(Some("a"), ""), &()).is_err());
        assert_eq!(ledger.counter(), 0);
        assert!(ledger.is_empty());

        // The key was never indexed, so it is still free.
        let outcome = ledger.admit(note(Some("a"), "ok"), &()).unwrap();
        assert_eq!(outcome.admitted().unwrap().seq, 1);
    }

    #[test]
    fn test_single_slot_policy_rejects_second_unkeyed() {
        let mut ledger = LedgerState::<Note>::new(UnkeyedPolicy::SingleSlot);
        assert!(ledger.admit(note(None, "one"), &()).unwrap().is_admitted());
        assert_eq!(
            ledger.admit(note(None, "two"), &()).unwrap(),
            Admission::Rejected { key: None }
        );
        assert_eq!(ledger.counter(), 1);
    }

    #[test]
    fn test_always_admit_policy_accepts_every_unkeyed() {
        let mut ledger = LedgerState::<Note>::new(UnkeyedPolicy::AlwaysAdmit);
        for body in ["one", "two", "three"] {
            assert!(ledger.admit(note(None, body), &()).unwrap().is_admitted());
        }
        assert_eq!(ledger.counter(), 3);
        // Keyed candidates are still deduplicated.
        ledger.admit(note(Some("k"), "keyed"), &()).unwrap();
        assert!(!ledger.admit(note(Some("k"), "keyed"), &()).unwrap().is_admitted());
    }

    #[test]
    fn test_list_orders() {
        let mut ledger = LedgerState::<Note>::default();
        for key in ["a", "b", "c"] {
            ledger.admit(note(Some(key), key), &()).unwrap();
        }
        let forward: Vec<_> = ledger
            .list(ListOrder::Insertion)
            .into_iter()
            .map(|n| n.seq)
            .collect();
        let backward: Vec<_> = ledger
            .list(ListOrder::Reverse)
            .into_iter()
            .map(|n| n.seq)
            .collect();
        assert_eq!(forward, vec![1, 2, 3]);
        assert_eq!(backward, vec![3, 2, 1]);
    }

    #[test]
    fn test_find_by_key() {
        let mut ledger = LedgerState::<Note>::default();
        ledger.admit(note(Some("a"), "first"), &()).unwrap();
        ledger.admit(note(Some("b"), "second"), &()).unwrap();
        assert_eq!(ledger.find(&"b".to_string()).unwrap().seq, 2);
        assert!(ledger.find(&"zzz".to_string()).is_none());
    }

    #[test]
    fn test_parse_list_order() {
        assert_eq!("insertion".parse::<ListOrder>(), Ok(ListOrder::Insertion));
        assert_eq!(" Reverse ".parse::<ListOrder>(), Ok(ListOrder::Reverse));
        assert!("sideways".parse::<ListOrder>().is_err());
    }

    #[test]
    fn test_parse_unkeyed_policy_matches_display() {
        for policy in [UnkeyedPolicy::SingleSlot, UnkeyedPolicy::AlwaysAdmit] {
            assert_eq!(policy.to_string().parse::<UnkeyedPolicy>(), Ok(policy));
        }
        assert_eq!(
            "never".parse::<UnkeyedPolicy>(),
            Err(ParseUnkeyedPolicyError("never".to_string()))
        );
    }
}
