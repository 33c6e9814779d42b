use crate::utils::error::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// Runs `fetch` over `items` with at most `limit` calls in flight.
///
/// Results come back in the order of `items`, whatever order the calls finish in.
/// The first error ends the fan-out and drops every call still in flight.
pub async fn ordered_fan_out<I, F, Fut, T>(items: I, limit: usize, fetch: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    stream::iter(items)
        .map(fetch)
        .buffered(limit.max(1))
        .try_collect()
        .await
}
