//! Concurrent fan-out of price queries under one deadline.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{self, JoinSet};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{Quote, QuoteFailure, QuoteSet, ResolvedIdentifiers};
use crate::error::{AdapterError, Error, Result};
use crate::port::{SourceAdapter, SourcePrice};

type SlotResult = (usize, std::result::Result<SourcePrice, AdapterError>);

/// Run one round: query every adapter concurrently and collect one quote each.
///
/// All queries share a single deadline measured from the call. Adapters
/// still outstanding when it elapses are aborted and recorded as
/// [`QuoteFailure::Timeout`]; a late answer is never observed. A query task
/// that panics is recorded as [`QuoteFailure::Aborted`]. Adapter failures
/// never fail the round. The returned set follows the order of
/// `adapters`, independent of completion order.
///
/// # Errors
///
/// [`Error::InvalidConfiguration`] when `adapters` is empty, `deadline` is
/// zero, or two adapters share a name.
pub async fn run(
    adapters: &[Arc<dyn SourceAdapter>],
    identifiers: &ResolvedIdentifiers,
    deadline: Duration,
) -> Result<QuoteSet> {
    if adapters.is_empty() {
        return Err(Error::InvalidConfiguration("no price sources enabled".into()));
    }
    if deadline.is_zero() {
        return Err(Error::InvalidConfiguration("round deadline must be positive".into()));
    }

    let mut names = HashSet::with_capacity(adapters.len());
    if let Some(duplicate) = adapters.iter().find(|a| !names.insert(a.name())) {
        return Err(Error::InvalidConfiguration(format!(
            "duplicate price source '{}'",
            duplicate.name()
        )));
    }

    let started = Instant::now();
    let deadline_at = started + deadline;
    let symbol = identifiers.symbol();

    let mut slots: Vec<Option<Quote>> = vec![None; adapters.len()];
    let mut tasks: JoinSet<SlotResult> = JoinSet::new();
    let mut task_slots: HashMap<task::Id, usize> = HashMap::with_capacity(adapters.len());

    for (index, adapter) in adapters.iter().enumerate() {
        let Some(identifier) = identifiers.get(adapter.name()) else {
            debug!(source = adapter.name(), symbol = %symbol, "No identifier for source");
            slots[index] = Some(invalid(adapter.as_ref(), symbol.as_str(), QuoteFailure::NotListed));
            continue;
        };

        let adapter = Arc::clone(adapter);
        let identifier = identifier.clone();
        let handle = tasks.spawn(async move { (index, adapter.query_price(&identifier).await) });
        task_slots.insert(handle.id(), index);
    }

    let sleep = tokio::time::sleep_until(deadline_at);
    tokio::pin!(sleep);

    let mut timed_out = false;
    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(Ok((index, result))) => {
                    let adapter = adapters[index].as_ref();
                    slots[index] = Some(to_quote(adapter, symbol.as_str(), result));
                }
                Some(Err(e)) => {
                    warn!(error = %e, symbol = %symbol, "Price query task failed");
                    if let Some(&index) = task_slots.get(&e.id()) {
                        let adapter = adapters[index].as_ref();
                        slots[index] = Some(invalid(adapter, symbol.as_str(), QuoteFailure::Aborted));
                    }
                }
                None => break,
            },
            () = &mut sleep => {
                timed_out = true;
                tasks.abort_all();
                break;
            }
        }
    }

    // Every task that finished, normally or by panicking, has filled its slot.
    let quotes: Vec<Quote> = slots
        .into_iter()
        .zip(adapters)
        .map(|(slot, adapter)| {
            slot.unwrap_or_else(|| {
                warn!(source = adapter.name(), symbol = %symbol, "No answer from source before deadline");
                invalid(adapter.as_ref(), symbol.as_str(), QuoteFailure::Timeout)
            })
        })
        .collect();

    let set = QuoteSet::try_new(quotes)?;

    debug!(
        symbol = %symbol,
        sources = set.len(),
        valid = set.valid().count(),
        elapsed_ms = super::millis(started.elapsed()),
        timed_out,
        "Fan-out round complete"
    );

    Ok(set)
}

fn to_quote(
    adapter: &dyn SourceAdapter,
    symbol: &str,
    result: std::result::Result<SourcePrice, AdapterError>,
) -> Quote {
    match result {
        Ok(SourcePrice { price, pair }) => {
            let quote = Quote::priced(
                adapter.name(),
                adapter.kind(),
                adapter.network().map(str::to_string),
                pair,
                price,
            );
            debug!(source = adapter.name(), %price, valid = quote.is_valid(), "Source answered");
            quote
        }
        Err(AdapterError::NotListed) => invalid(adapter, symbol, QuoteFailure::NotListed),
        Err(e) => {
            debug!(source = adapter.name(), error = %e, "Source failed");
            invalid(adapter, symbol, QuoteFailure::Adapter(e.to_string()))
        }
    }
}

fn invalid(adapter: &dyn SourceAdapter, symbol: &str, reason: QuoteFailure) -> Quote {
    Quote::invalid(
        adapter.name(),
        adapter.kind(),
        adapter.network().map(str::to_string),
        symbol,
        reason,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceKind;
    use crate::testkit::domain::{adapters, identifiers};
    use crate::testkit::source::ScriptedSource;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_rejects_empty_adapter_set() {
        let result = run(&[], &identifiers("SOL", &[]), Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_rejects_zero_deadline() {
        let sources = adapters(vec![ScriptedSource::priced("A", dec!(1))]);
        let result = run(&sources, &identifiers("SOL", &["A"]), Duration::ZERO).await;
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_rejects_duplicate_adapter_names() {
        let sources = adapters(vec![
            ScriptedSource::priced("A", dec!(1)),
            ScriptedSource::priced("A", dec!(2)),
        ]);
        let result = run(&sources, &identifiers("SOL", &["A"]), Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_preserves_registration_order() {
        let sources = adapters(vec![
            ScriptedSource::priced("Slow", dec!(1)).with_delay(Duration::from_millis(60)),
            ScriptedSource::priced("Fast", dec!(2)),
            ScriptedSource::priced("Medium", dec!(3)).with_delay(Duration::from_millis(20)),
        ]);

        let set = run(&sources, &identifiers("SOL", &["Slow", "Fast", "Medium"]), Duration::from_secs(2))
            .await
            .unwrap();

        let names: Vec<_> = set.quotes().iter().map(|q| q.source().as_str()).collect();
        assert_eq!(names, vec!["Slow", "Fast", "Medium"]);
        assert_eq!(set.valid().count(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_local() {
        let sources = adapters(vec![
            ScriptedSource::priced("Good", dec!(10)),
            ScriptedSource::failing("Broken", AdapterError::Transport("connection reset".into())),
            ScriptedSource::failing("Unlisted", AdapterError::NotListed),
            ScriptedSource::priced("Zero", dec!(0)),
        ]);

        let set = run(
            &sources,
            &identifiers("SOL", &["Good", "Broken", "Unlisted", "Zero"]),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.get("Good").unwrap().price(), Some(dec!(10)));
        assert_eq!(
            set.get("Broken").unwrap().failure(),
            Some(&QuoteFailure::Adapter("transport error: connection reset".into()))
        );
        assert_eq!(set.get("Unlisted").unwrap().failure(), Some(&QuoteFailure::NotListed));
        assert_eq!(set.get("Zero").unwrap().failure(), Some(&QuoteFailure::NonPositivePrice));
    }

    #[tokio::test]
    async fn test_missing_identifier_is_not_listed_and_not_queried() {
        let unresolved = ScriptedSource::priced("Unresolved", dec!(5));
        let calls = unresolved.call_counter();
        let sources = adapters(vec![ScriptedSource::priced("A", dec!(1)), unresolved]);

        let set = run(&sources, &identifiers("SOL", &["A"]), Duration::from_secs(1))
            .await
            .unwrap();

        let quote = set.get("Unresolved").unwrap();
        assert_eq!(quote.failure(), Some(&QuoteFailure::NotListed));
        assert_eq!(quote.pair(), "SOL");
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_hanging_source_times_out_within_deadline() {
        let sources = adapters(vec![
            ScriptedSource::priced("A", dec!(1)),
            ScriptedSource::hanging("Stuck"),
            ScriptedSource::hanging("AlsoStuck"),
        ]);

        let started = std::time::Instant::now();
        let set = run(
            &sources,
            &identifiers("SOL", &["A", "Stuck", "AlsoStuck"]),
            Duration::from_millis(100),
        )
        .await
        .unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(600), "round took {elapsed:?}");
        assert_eq!(set.get("A").unwrap().price(), Some(dec!(1)));
        assert_eq!(set.get("Stuck").unwrap().failure(), Some(&QuoteFailure::Timeout));
        assert_eq!(set.get("AlsoStuck").unwrap().failure(), Some(&QuoteFailure::Timeout));
    }

    #[tokio::test]
    async fn test_network_is_carried_on_quotes() {
        let sources = adapters(vec![ScriptedSource::priced("Raydium", dec!(142.89))
            .with_kind(SourceKind::OnChain)
            .with_network("solana")]);

        let set = run(&sources, &identifiers("SOL", &["Raydium"]), Duration::from_secs(1))
            .await
            .unwrap();

        let quote = set.get("Raydium").unwrap();
        assert_eq!(quote.kind(), SourceKind::OnChain);
        assert_eq!(quote.network(), Some("solana"));
    }

    #[tokio::test]
    async fn test_panicking_source_is_aborted() {
        let sources = adapters(vec![
            ScriptedSource::priced("A", dec!(1)),
            ScriptedSource::panicking("Panicky"),
        ]);

        let set = run(&sources, &identifiers("SOL", &["A", "Panicky"]), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(set.get("A").unwrap().price(), Some(dec!(1)));
        assert_eq!(set.get("Panicky").unwrap().failure(), Some(&QuoteFailure::Aborted));
    }

    #[tokio::test]
    async fn test_panic_and_timeout_in_same_round_are_told_apart() {
        let sources = adapters(vec![
            ScriptedSource::hanging("Stuck"),
            ScriptedSource::panicking("Panicky"),
        ]);

        let set = run(&sources, &identifiers("SOL", &["Stuck", "Panicky"]), Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(set.get("Stuck").unwrap().failure(), Some(&QuoteFailure::Timeout));
        assert_eq!(set.get("Panicky").unwrap().failure(), Some(&QuoteFailure::Aborted));
    }
}
