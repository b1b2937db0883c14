//! # Fixture Quote Runner
//!
//! Prices a quote request against a JSON fixture store, for manual smoke
//! runs and support investigations.
//!
//! ## Usage
//! ```bash
//! # Price a request against a fixture backend
//! cargo run -p pronto-quote --bin quote -- fixtures/store.json request.json
//!
//! # With debug logging
//! RUST_LOG=debug cargo run -p pronto-quote --bin quote -- store.json request.json
//! ```
//!
//! ## Fixture Format
//! The store file deserializes straight into the in-memory backend:
//! ```json
//! {
//!   "items": [ { "id": 1, "organization_id": "…", "name": "Margherita",
//!                "base_price_cents": 700, "discounted_price_cents": null,
//!                "is_available": true } ],
//!   "sizes": [], "ingredients": [], "zones": [],
//!   "config": { "calculation_mode": "flat", "origin_lat": 45.46,
//!               "origin_lon": 9.19, "base_fee_cents": 300 },
//!   "policy": { "minimum_order_cents": 1000 }
//! }
//! ```
//! The request file is the same JSON shape clients submit.

use std::env;
use std::fs;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pronto_quote::memory::InMemoryBackend;
use pronto_quote::{QuoteRequest, QuoteService};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let (store_path, request_path) = match (args.get(1), args.get(2)) {
        (Some(s), Some(r)) => (s.clone(), r.clone()),
        _ => {
            eprintln!("usage: quote <store.json> <request.json>");
            return ExitCode::FAILURE;
        }
    };

    let backend: InMemoryBackend = match read_json(&store_path) {
        Ok(b) => b,
        Err(err) => {
            eprintln!("failed to load store fixture {store_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let request: QuoteRequest = match read_json(&request_path) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("failed to load request {request_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = QuoteService::new(backend.clone(), backend);
    match service.quote(&request).await {
        Ok(response) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&response).expect("response serializes")
            );
            ExitCode::SUCCESS
        }
        Err(api_error) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&api_error).expect("error serializes")
            );
            ExitCode::FAILURE
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}
