use crate::clients::OrderLedgerClient;
use crate::clock::{SharedClock, SystemClock};
use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::extraction::{Extractor, GeminiTransport};
use crate::ledger::OrderError;
use crate::model::{OrderCandidate, OrderEntry};
use ledger_framework::{LedgerReader, LedgerStats, ListOrder, UnkeyedPolicy};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// The running intake pipeline: one extractor and one order ledger for the session.
///
/// `IntakeSystem` is responsible for:
/// - **Lifecycle Management**: spawning the ledger actor and stopping it on [`shutdown`](Self::shutdown)
/// - **Dependency Wiring**: handing the clock to the ledger as its run context
/// - **The submit path**: email text to candidate to admitted entry
///
/// # Example
///
/// ```ignore
/// let system = IntakeSystem::from_config(&IntakeConfig::from_env()?)?;
///
/// let entry = system.process_email(&body).await?;
/// println!("{}", entry.internal_tracking_number);
///
/// system.shutdown().await?;
/// ```
pub struct IntakeSystem {
    /// Client for the order ledger actor
    pub ledger: OrderLedgerClient,

    extractor: Extractor,

    /// Ledger task handle (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl IntakeSystem {
    /// Starts a ledger stamped by the system clock.
    pub fn new(extractor: Extractor, buffer_size: usize, policy: UnkeyedPolicy) -> Self {
        Self::with_clock(extractor, buffer_size, policy, Arc::new(SystemClock))
    }

    /// Starts a ledger whose entries are stamped by `clock`.
    pub fn with_clock(
        extractor: Extractor,
        buffer_size: usize,
        policy: UnkeyedPolicy,
        clock: SharedClock,
    ) -> Self {
        let (actor, client) = crate::ledger::new(buffer_size, policy);
        let handle = tokio::spawn(actor.run(clock));
        info!(model = extractor.model(), %policy, "Intake system started");

        Self {
            ledger: OrderLedgerClient::new(client),
            extractor,
            handle,
        }
    }

    /// Validates `config`, builds the Gemini transport and starts the system.
    pub fn from_config(config: &IntakeConfig) -> Result<Self, IntakeError> {
        config.validate()?;
        let transport = GeminiTransport::new(
            &config.api_base_url,
            config.api_key.clone(),
            config.request_timeout,
        )?;
        let extractor = Extractor::new(config.model.clone(), Arc::new(transport));
        Ok(Self::new(
            extractor,
            config.ledger_buffer,
            config.unkeyed_policy,
        ))
    }

    /// Extracts an order candidate from an email body without touching the ledger.
    ///
    /// Blank input is refused before any model call.
    #[instrument(skip_all)]
    pub async fn submit_email(&self, email_body: &str) -> Result<OrderCandidate, IntakeError> {
        if email_body.trim().is_empty() {
            warn!("Empty email body submitted");
            return Err(IntakeError::EmptyEmail);
        }
        Ok(self.extractor.extract(email_body).await?)
    }

    /// Admits a candidate into the session ledger.
    pub async fn admit(&self, candidate: OrderCandidate) -> Result<OrderEntry, OrderError> {
        self.ledger.admit(candidate).await
    }

    /// Runs the whole submit path: extract, then admit.
    ///
    /// An extraction failure leaves the ledger untouched. A duplicate surfaces as
    /// [`OrderError::DuplicateOrderId`].
    pub async fn process_email(&self, email_body: &str) -> Result<OrderEntry, IntakeError> {
        let candidate = self.submit_email(email_body).await?;
        Ok(self.admit(candidate).await?)
    }

    /// Every admitted entry in the requested order.
    pub async fn list_entries(&self, order: ListOrder) -> Result<Vec<OrderEntry>, OrderError> {
        self.ledger.list_entries(order).await
    }

    pub async fn find(&self, order_id: &str) -> Result<Option<OrderEntry>, OrderError> {
        self.ledger.find(order_id.to_string()).await
    }

    pub async fn stats(&self) -> Result<LedgerStats, OrderError> {
        self.ledger.stats().await
    }

    /// Gracefully shuts down the ledger.
    ///
    /// Dropping the client closes the request channel; the actor drains what is queued,
    /// logs its final counters and exits. Clients cloned from [`ledger`](Self::ledger)
    /// keep the actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), IntakeError> {
        info!("Shutting down intake system...");
        drop(self.ledger);

        if let Err(e) = self.handle.await {
            error!("Ledger task failed: {:?}", e);
            return Err(IntakeError::Shutdown(format!("ledger task failed: {e}")));
        }

        info!("Intake system shutdown complete.");
        Ok(())
    }
}
