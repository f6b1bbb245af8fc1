//! Fan-out helpers: run one unit of work per input, wait for all of them,
//! then hand back whatever succeeded. A unit that is skipped or fails never
//! cancels the others.

use crate::error::Error;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::future::Future;
use tokio::task::JoinSet;

/// Result of one unit of fan-out work
#[derive(Debug)]
pub enum UnitOutcome<T> {
    Done(T),
    /// Nothing to contribute (bad row, no match). Not an error.
    Skipped(String),
    Failed(Error),
}

impl<T> UnitOutcome<T> {
    pub fn from_option(value: Option<T>, reason: impl Into<String>) -> Self {
        match value {
            Some(v) => UnitOutcome::Done(v),
            None => UnitOutcome::Skipped(reason.into()),
        }
    }
}

impl<T> From<crate::error::Result<T>> for UnitOutcome<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(v) => UnitOutcome::Done(v),
            Err(e) => UnitOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    skipped: usize,
    failed: usize,
}

impl Tally {
    fn record<T>(&mut self, label: &str, index: usize, outcome: UnitOutcome<T>) -> Option<T> {
        match outcome {
            UnitOutcome::Done(v) => Some(v),
            UnitOutcome::Skipped(reason) => {
                tracing::debug!("{}: unit {} skipped: {}", label, index, reason);
                self.skipped += 1;
                None
            }
            UnitOutcome::Failed(e) => {
                tracing::warn!("{}: unit {} failed: {}", label, index, e);
                self.failed += 1;
                None
            }
        }
    }

    fn report(&self, label: &str, total: usize) {
        if self.skipped + self.failed > 0 {
            tracing::info!(
                "{}: {} of {} units skipped, {} failed",
                label,
                self.skipped,
                total,
                self.failed
            );
        }
    }
}

/// Run `work` on the rayon pool and merge the `(key, value)` results into a map.
///
/// When two units produce the same key the one later in the input wins,
/// whatever order the pool finishes them in.
pub fn fan_out_into_map<U, K, V, F>(label: &str, units: Vec<U>, work: F) -> BTreeMap<K, V>
where
    U: Send,
    K: Ord + Send,
    V: Send,
    F: Fn(U) -> UnitOutcome<(K, V)> + Sync,
{
    let total = units.len();
    let outcomes: Vec<UnitOutcome<(K, V)>> = units.into_par_iter().map(&work).collect();

    let mut tally = Tally::default();
    let mut merged = BTreeMap::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        if let Some((key, value)) = tally.record(label, index, outcome) {
            merged.insert(key, value);
        }
    }
    tally.report(label, total);
    merged
}

/// Run `work` on the rayon pool and collect the results, in input order.
pub fn fan_out_collect<U, T, F>(label: &str, units: Vec<U>, work: F) -> Vec<T>
where
    U: Send,
    T: Send,
    F: Fn(U) -> UnitOutcome<T> + Sync,
{
    let total = units.len();
    let outcomes: Vec<UnitOutcome<T>> = units.into_par_iter().map(&work).collect();

    let mut tally = Tally::default();
    let items = outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(index, outcome)| tally.record(label, index, outcome))
        .collect();
    tally.report(label, total);
    items
}

/// Async fan-out: one tokio task per unit (I/O bound work such as per-event fetches).
/// Returns the successful results in input order once every task has finished.
pub async fn fan_out_tasks<U, T, F, Fut>(label: &str, units: Vec<U>, work: F) -> Vec<T>
where
    U: Send + 'static,
    T: Send + 'static,
    F: Fn(U) -> Fut,
    Fut: Future<Output = UnitOutcome<T>> + Send + 'static,
{
    let total = units.len();
    let mut set = JoinSet::new();
    for (index, unit) in units.into_iter().enumerate() {
        let task = work(unit);
        set.spawn(async move { (index, task.await) });
    }

    let mut tally = Tally::default();
    let mut items = Vec::with_capacity(total);
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                if let Some(item) = tally.record(label, index, outcome) {
                    items.push((index, item));
                }
            }
            Err(e) => {
                tracing::warn!("{}: task did not complete: {}", label, e);
                tally.failed += 1;
            }
        }
    }
    tally.report(label, total);

    items.sort_by_key(|(index, _)| *index);
    items.into_iter().map(|(_, item)| item).collect()
}
