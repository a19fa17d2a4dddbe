//! # Mock Ledger & Testing Guide
//!
//! `MockClient<T>` hands out a real [`LedgerClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running ledger. Use it to test code that
//! *drives* a ledger (admission outcome handling, error mapping, rendering) without
//! building real records or spawning a [`LedgerActor`](crate::LedgerActor).
//!
//! | | MockClient | Real LedgerActor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real dedup and numbering |
//! | **Error injection** | `return_err` | Hard (needs a failing entity) |
//! | **Use case** | Logic *around* the client | The ledger rules themselves |
//!
//! ```rust
//! use ledger_framework::mock::MockClient;
//! use ledger_framework::{Admission, FrameworkError, LedgerEntity};
//!
//! #[derive(Clone, Debug, PartialEq)] struct Slip { seq: u64 }
//! #[derive(Debug, thiserror::Error)] #[error("slip")] struct SlipError;
//! impl LedgerEntity for Slip {
//!     type Key = String; type Candidate = String; type Context = (); type Error = SlipError;
//!     fn admission_key(c: &String) -> Option<String> { Some(c.clone()) }
//!     fn from_candidate(seq: u64, _: String, _: &()) -> Result<Self, SlipError> { Ok(Self { seq }) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Slip>::new();
//!     mock.expect_admit().return_rejected(Some("S-1".to_string()));
//!     mock.expect_admit().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let outcome = client.admit("S-1".to_string()).await.unwrap();
//!     assert!(matches!(outcome, Admission::Rejected { .. }));
//!     assert!(client.admit("S-2".to_string()).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! For assertions on the *requests* themselves, use [`create_mock_client`] with
//! [`expect_admit`] / [`expect_list`] and answer through the returned responder.

use crate::client::LedgerClient;
use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::message::LedgerRequest;
use crate::state::{Admission, LedgerStats, ListOrder};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: LedgerEntity> {
    Admit {
        response: Result<Admission<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Find {
        response: Result<Option<T>, FrameworkError>,
    },
    Stats {
        response: Result<LedgerStats, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock ledger with expectation tracking for fluent testing.
pub struct MockClient<T: LedgerEntity> {
    client: LedgerClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: LedgerEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<LedgerRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        LedgerRequest::Admit { respond_to, .. },
                        Some(Expectation::Admit { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        LedgerRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        LedgerRequest::Find { respond_to, .. },
                        Some(Expectation::Find { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (LedgerRequest::Stats { respond_to }, Some(Expectation::Stats { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: LedgerClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> LedgerClient<T> {
        self.client.clone()
    }

    pub fn expect_admit(&mut self) -> AdmitExpectationBuilder<T> {
        AdmitExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_list(&mut self) -> ResponseBuilder<T, Vec<T>> {
        ResponseBuilder {
            expectations: self.expectations.clone(),
            wrap: |response| Expectation::List { response },
        }
    }

    pub fn expect_find(&mut self) -> ResponseBuilder<T, Option<T>> {
        ResponseBuilder {
            expectations: self.expectations.clone(),
            wrap: |response| Expectation::Find { response },
        }
    }

    pub fn expect_stats(&mut self) -> ResponseBuilder<T, LedgerStats> {
        ResponseBuilder {
            expectations: self.expectations.clone(),
            wrap: |response| Expectation::Stats { response },
        }
    }

    /// Panics if any scripted expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `admit` expectations.
pub struct AdmitExpectationBuilder<T: LedgerEntity> {
    expectations: Queue<T>,
}

impl<T: LedgerEntity> AdmitExpectationBuilder<T> {
    /// Answers the next admission with an accepted record.
    pub fn return_admitted(self, entry: T) {
        self.push(Ok(Admission::Admitted(entry)));
    }

    /// Answers the next admission with a duplicate rejection.
    pub fn return_rejected(self, key: Option<T::Key>) {
        self.push(Ok(Admission::Rejected { key }));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Admission<T>, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Admit { response });
    }
}

/// Builder for read expectations (`list`, `find`, `stats`).
pub struct ResponseBuilder<T: LedgerEntity, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: LedgerEntity, R> ResponseBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests off the receiver, asserts on them and
/// answers through the responder.
pub fn create_mock_client<T: LedgerEntity>(
    buffer_size: usize,
) -> (LedgerClient<T>, mpsc::Receiver<LedgerRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an `Admit`.
pub async fn expect_admit<T: LedgerEntity>(
    receiver: &mut mpsc::Receiver<LedgerRequest<T>>,
) -> Option<(
    T::Candidate,
    oneshot::Sender<Result<Admission<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(LedgerRequest::Admit {
            candidate,
            respond_to,
        }) => Some((candidate, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `List`.
pub async fn expect_list<T: LedgerEntity>(
    receiver: &mut mpsc::Receiver<LedgerRequest<T>>,
) -> Option<(ListOrder, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(LedgerRequest::List { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}
