//! # Extraction Adapter
//!
//! Turns raw email text into an [`OrderCandidate`] by asking a text-generation service for a
//! fixed JSON shape.
//!
//! The adapter is deliberately thin:
//! - [`render_prompt`] embeds the email verbatim into the fixed instruction and schema.
//! - A [`ModelTransport`] performs the call and returns the response text.
//! - [`parse_candidate`] reads that text as a JSON object.
//!
//! Every failure along the way (transport, service status, non-JSON text, wrong shape)
//! collapses into [`ExtractionError::ExtractionFailed`] with a readable cause. Nothing is
//! retried and no partial record is salvaged.

pub mod gemini;

pub use gemini::GeminiTransport;

use crate::model::OrderCandidate;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// MIME type requested from the service so it answers with bare JSON.
pub const JSON_MIME_TYPE: &str = "application/json";

const PROMPT_TEMPLATE: &str = r#"
Extract the order information from the email body provided below and strictly follow the specified JSON schema for output.
Use null for any item that does not exist.

# Email Body
---
{email_body}
---

# JSON Schema
{
  "order_id": "string (e.g.: PO-20250901)",
  "order_date": "string (e.g.: 2025-09-01)",
  "customer_name": "string",
  "total_amount": "integer (amount as number only)",
  "delivery_address": "string",
  "items": [
    {
      "product_name": "string",
      "quantity": "integer",
      "unit_price": "integer"
    }
  ]
}
"#;

/// Builds the extraction prompt with `email_body` embedded between the delimiter lines.
pub fn render_prompt(email_body: &str) -> String {
    PROMPT_TEMPLATE.replacen("{email_body}", email_body, 1)
}

/// The single failure signal of the adapter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("Extraction failed: {cause}")]
    ExtractionFailed { cause: String },
}

impl ExtractionError {
    pub fn failed(cause: impl Into<String>) -> Self {
        ExtractionError::ExtractionFailed {
            cause: cause.into(),
        }
    }

    /// The human-readable cause.
    pub fn cause(&self) -> &str {
        match self {
            ExtractionError::ExtractionFailed { cause } => cause,
        }
    }
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub prompt: String,
    pub response_mime_type: String,
}

impl ModelRequest {
    /// A request for a bare-JSON answer.
    pub fn json(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_mime_type: JSON_MIME_TYPE.to_string(),
        }
    }
}

/// The seam to the generation service.
///
/// Implementations return the model's response text; they do not interpret it.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn complete(&self, request: &ModelRequest) -> Result<String, ExtractionError>;
}

/// Stateless extraction front end holding the transport handle and model name.
#[derive(Clone)]
pub struct Extractor {
    model: String,
    transport: Arc<dyn ModelTransport>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("model", &self.model)
            .finish()
    }
}

impl Extractor {
    pub fn new(model: impl Into<String>, transport: Arc<dyn ModelTransport>) -> Self {
        Self {
            model: model.into(),
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extracts an order candidate from `email_body`.
    ///
    /// The body is not validated here; callers decide what to do with empty input.
    #[instrument(skip_all, fields(model = %self.model, chars = email_body.chars().count()))]
    pub async fn extract(&self, email_body: &str) -> Result<OrderCandidate, ExtractionError> {
        let request = ModelRequest::json(&self.model, render_prompt(email_body));
        let text = match self.transport.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(cause = e.cause(), "Model call failed");
                return Err(e);
            }
        };
        debug!(response = %text, "Model responded");

        let candidate = parse_candidate(&text).inspect_err(|e| {
            warn!(cause = e.cause(), "Unparseable model response");
        })?;
        info!(order_id = ?candidate.order_id, items = candidate.items.len(), "Extracted");
        Ok(candidate)
    }
}

/// Parses a model response as an order candidate.
///
/// A single surrounding Markdown code fence is tolerated; any other non-JSON content is not.
pub fn parse_candidate(text: &str) -> Result<OrderCandidate, ExtractionError> {
    let body = strip_code_fence(text.trim());
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ExtractionError::failed(format!("model response is not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(ExtractionError::failed(format!(
            "model response is not a JSON object: {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| {
        ExtractionError::failed(format!("model response does not match the order schema: {e}"))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening line.
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
