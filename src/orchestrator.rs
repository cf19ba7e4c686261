//! Fan-out/fan-in of per-client search calls.
//!
//! One task per validated client runs on a bounded pool of
//! `min(max_workers, clients)` slots. Each task builds its query, calls the
//! [`SearchApi`], and turns the outcome into a [`ClientResult`]. The pool is
//! created per run and drained completely before the run returns, so every
//! dispatched client yields exactly one result.

use crate::api::SearchApi;
use crate::models::{ClientResult, ClientSpec};
use crate::query::build_request;
use futures::stream::{self, Stream, StreamExt};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Runs one batch of client queries against a [`SearchApi`].
#[derive(Debug)]
pub struct FanOut<'a, A> {
    api: &'a A,
    model: &'a str,
    max_workers: usize,
}

impl<'a, A: SearchApi> FanOut<'a, A> {
    pub fn new(api: &'a A, model: &'a str, max_workers: usize) -> Self {
        Self {
            api,
            model,
            max_workers,
        }
    }

    /// Number of concurrent slots used for `clients` clients.
    pub fn pool_size(&self, clients: usize) -> usize {
        self.max_workers.min(clients).max(1)
    }

    /// Query every client and collect all results in completion order.
    ///
    /// Failures stay with their own client; nothing is cancelled and the
    /// call returns only once every task has finished.
    ///
    /// # Arguments
    ///
    /// * `clients` - Validated clients, one outbound call each
    /// * `categories` - Category labels shared by every query
    ///
    /// # Returns
    ///
    /// One [`ClientResult`] per client, in the order the calls completed.
    #[instrument(level = "info", skip_all, fields(clients = clients.len()))]
    pub async fn run(&self, clients: Vec<ClientSpec>, categories: &[String]) -> Vec<ClientResult> {
        let t0 = Instant::now();
        let total = clients.len();
        let workers = self.pool_size(total);
        info!(workers, "Dispatching client queries");

        let tasks = clients
            .into_iter()
            .map(|client| self.query_client(client, categories));
        let results = join_all_bounded(tasks, workers).await;

        let failed = results.iter().filter(|r| r.is_error()).count();
        info!(
            total,
            succeeded = total - failed,
            failed,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Completed client queries"
        );
        results
    }

    async fn query_client(&self, client: ClientSpec, categories: &[String]) -> ClientResult {
        let request = build_request(&client, categories, self.model);
        debug!(client = %client.name, "Querying search API");
        match self.api.search(&request).await {
            Ok(data) => ClientResult::data(client, data),
            Err(e) => {
                warn!(client = %client.name, error = %e, "Search failed for client");
                ClientResult::error(client, e.to_string())
            }
        }
    }
}

/// Drive `tasks` with at most `limit` in flight and wait for all of them.
///
/// # Arguments
///
/// * `tasks` - Futures to drive; none start before a slot is free
/// * `limit` - Maximum futures polled concurrently (clamped to at least 1)
///
/// # Returns
///
/// Every output, in completion order.
pub async fn join_all_bounded<I, F>(tasks: I, limit: usize) -> Vec<F::Output>
where
    I: IntoIterator<Item = F>,
    F: Future,
{
    bounded(tasks, limit).collect().await
}

fn bounded<I, F>(tasks: I, limit: usize) -> impl Stream<Item = F::Output>
where
    I: IntoIterator<Item = F>,
    F: Future,
{
    stream::iter(tasks).buffer_unordered(limit.max(1))
}
