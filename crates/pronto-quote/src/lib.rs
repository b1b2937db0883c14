//! # pronto-quote: Quote Orchestration for Pronto
//!
//! The request-facing layer around [`pronto_core`]: accepts a JSON quote
//! request, assembles an immutable snapshot from the catalog/zone/config
//! collaborators, runs the pure engine, and returns either a priced
//! response or a structured `{error, code}` object.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Client JSON ──► QuoteRequest ──► QuoteService                         │
//! │                                        │                                │
//! │                       ┌────────────────┤                                │
//! │                       ▼                ▼                                │
//! │                 CatalogSource    DeliverySource   (async, batch)        │
//! │                       │                │                                │
//! │                       └───► QuoteSnapshot ◄────┘  (frozen)              │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                          pronto_core::quote_order()                     │
//! │                                        │                                │
//! │                 ┌──────────────────────┴───────────────┐                │
//! │                 ▼                                      ▼                │
//! │          QuoteResponse                          ApiError                │
//! │   {subtotal, deliveryFee, total,          {code, message}               │
//! │    minorUnitAmount, currency}                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`request`] - Wire DTOs for the quote request
//! - [`lookup`] - Collaborator traits for the external store
//! - [`snapshot`] - Batch fetching and raw-config parsing
//! - [`service`] - The end-to-end flow
//! - [`error`] - `{error, code}` responses
//! - [`memory`] - Vector-backed store for fixtures and tests
//!
//! All I/O lives behind the lookup traits and completes before the engine
//! runs; the engine itself is synchronous and deterministic.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lookup;
pub mod memory;
pub mod request;
pub mod service;
pub mod snapshot;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ApiError, ErrorCode};
pub use request::{QuoteLine, QuoteRequest};
pub use service::{QuoteResponse, QuoteService};
pub use snapshot::{QuoteSnapshot, RawDeliveryConfig, SnapshotLoader};
