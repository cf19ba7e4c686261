//! # Client News Digest
//!
//! Queries an AI search API for recent news about a list of clients and
//! aggregates the per-client answers into a single JSON response.
//!
//! ## Features
//!
//! - Validates and normalizes the incoming client list
//! - Builds one category-scoped news query per client
//! - Calls the Perplexity `chat/completions` API with a bounded number of
//!   requests in flight (10 by default)
//! - Keeps failures per client: one bad call never sinks the batch
//! - Substitutes a well-formed empty payload when the model answers with
//!   something other than a JSON object
//! - Serves a static fixture when a request asks for mock mode
//!
//! ## Architecture
//!
//! The crate follows a pipeline architecture:
//! 1. **Validation** ([`validate`]): Filter client records, resolve categories
//! 2. **Query building** ([`query`]): One instruction per client
//! 3. **Fan-out** ([`orchestrator`]): Bounded concurrent calls through [`api`]
//! 4. **Assembly** ([`response`]): Status, headers and JSON body
//!
//! [`handler::Handler`] ties the steps together for one request event.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod handler;
pub mod mock;
pub mod models;
pub mod orchestrator;
pub mod query;
pub mod response;
pub mod utils;
pub mod validate;

pub use api::{PerplexityClient, SearchApi};
pub use config::Config;
pub use errors::{ConfigError, GatewayError, HandlerError};
pub use handler::Handler;
pub use response::ResponseEnvelope;
