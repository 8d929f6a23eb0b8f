//! Concurrent fan-out over all configured sources.
//!
//! The aggregator starts one [`SourceTask`] per source, waits for every
//! one of them, and writes each task's results into that source's slot of
//! the [`ResultBundle`]. Sources are reported independently: no ranking,
//! reordering or deduplication across them.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fetcher::Fetcher;
use crate::http::SourceClient;
use crate::rule::SourceRule;
use crate::source::SourceTask;
use crate::types::ResultBundle;
use std::collections::HashSet;
use std::sync::Arc;

/// Runs a query against every configured source and assembles the bundle.
///
/// Built once at startup and shared across requests; holds no mutable state.
#[derive(Debug)]
pub struct Aggregator<F = SourceClient> {
    tasks: Vec<SourceTask<F>>,
}

impl Aggregator<SourceClient> {
    /// Builds an aggregator that fetches over HTTP with a shared client.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration or any source
    /// rule is invalid. This is a startup failure, not a per-request one.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = SourceClient::new(config)?;
        Self::with_fetcher(&config.sources, client)
    }
}

impl<F: Fetcher> Aggregator<F> {
    /// Builds an aggregator over `rules` using a custom fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `rules` is empty, two rules share
    /// a name, or any rule fails to compile.
    pub fn with_fetcher(rules: &[SourceRule], fetcher: F) -> Result<Self, SearchError> {
        if rules.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be configured".into(),
            ));
        }

        let fetcher = Arc::new(fetcher);
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(rules.len());
        for rule in rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(SearchError::Config(format!(
                    "duplicate source name: {}",
                    rule.name
                )));
            }
            tasks.push(SourceTask::new(rule.compile()?, Arc::clone(&fetcher)));
        }

        Ok(Self { tasks })
    }

    /// Configured source names, in bundle order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(SourceTask::name)
    }

    /// Queries every source concurrently and returns one slot per source.
    ///
    /// Waits for all sources; a slow source delays the whole bundle up to
    /// the client's request deadline.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if `query` is the empty
    /// string. No requests are made in that case. Source failures are
    /// never returned; they show up as empty slots.
    pub async fn aggregate(&self, query: &str) -> Result<ResultBundle, SearchError> {
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        tracing::trace!(query, sources = self.tasks.len(), "fan-out search");

        let runs = self
            .tasks
            .iter()
            .enumerate()
            .map(|(slot, task)| async move { (slot, task.run(query).await) });
        let outcomes = futures::future::join_all(runs).await;

        let mut bundle = ResultBundle::with_sources(self.sources());
        for (slot, items) in outcomes {
            bundle.fill(slot, items);
        }

        tracing::debug!(
            sources = bundle.len(),
            results = bundle.total_results(),
            "fan-out search complete"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Provider;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves bodies by endpoint and records every call.
    #[derive(Debug, Default)]
    struct StubFetcher {
        bodies: HashMap<&'static str, &'static str>,
        delays: HashMap<&'static str, u64>,
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    impl Fetcher for StubFetcher {
        async fn fetch(&self, query: &str, endpoint: &str) -> Result<String, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut queries) = self.queries.lock() {
                queries.push(query.to_owned());
            }
            if let Some(ms) = self.delays.get(endpoint) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.bodies
                .get(endpoint)
                .map(|b| (*b).to_owned())
                .ok_or(SearchError::Upstream(500))
        }
    }

    const GOOGLE_BODY: &str = r#"<a href="/url?q=http://g.com&amp;sa=U"><h3>GTitle</h3></a>"#;
    const BING_BODY: &str = r#"<li class="b_algo"><h2><a href="http://b.com">BTitle</a></h2></li>"#;
    const BAIDU_BODY: &str = r#"<h3 class="t"><a href="http://baidu.com">BaTitle</a></h3>"#;

    fn builtin_bodies() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (Provider::Google.endpoint(), GOOGLE_BODY),
            (Provider::Bing.endpoint(), BING_BODY),
            (Provider::Baidu.endpoint(), BAIDU_BODY),
        ])
    }

    fn aggregator(fetcher: StubFetcher) -> Aggregator<StubFetcher> {
        Aggregator::with_fetcher(&SourceRule::builtins(), fetcher).expect("builtins are valid")
    }

    #[tokio::test]
    async fn every_source_gets_its_own_results() {
        let agg = aggregator(StubFetcher {
            bodies: builtin_bodies(),
            ..Default::default()
        });
        let bundle = agg.aggregate("test").await.expect("non-empty query");

        let names: Vec<&str> = bundle.sources().collect();
        assert_eq!(names, vec!["google", "bing", "baidu"]);
        assert_eq!(bundle.get("google").map(|r| r[0].title.as_str()), Some("GTitle"));
        assert_eq!(bundle.get("google").map(|r| r[0].url.as_str()), Some("http://g.com"));
        assert_eq!(bundle.get("bing").map(|r| r[0].title.as_str()), Some("BTitle"));
        assert_eq!(bundle.get("baidu").map(|r| r[0].url.as_str()), Some("http://baidu.com"));
    }

    #[tokio::test]
    async fn empty_query_rejected_without_fetching() {
        let agg = aggregator(StubFetcher {
            bodies: builtin_bodies(),
            ..Default::default()
        });
        let err = agg.aggregate("").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery));
        assert_eq!(agg.tasks[0].fetcher().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn whitespace_query_is_searched_verbatim() {
        let agg = aggregator(StubFetcher {
            bodies: builtin_bodies(),
            ..Default::default()
        });
        let bundle = agg.aggregate("   ").await.expect("whitespace is not empty");

        assert_eq!(bundle.len(), 3);
        assert_eq!(agg.tasks[0].fetcher().calls.load(Ordering::SeqCst), 3);
        let queries = agg.tasks[0].fetcher().queries.lock().expect("lock").clone();
        assert_eq!(queries, vec!["   "; 3]);
    }

    #[tokio::test]
    async fn failed_source_is_empty_and_others_unaffected() {
        let mut bodies = builtin_bodies();
        bodies.remove(Provider::Bing.endpoint());
        let agg = aggregator(StubFetcher {
            bodies,
            ..Default::default()
        });
        let bundle = agg.aggregate("test").await.expect("non-empty query");

        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.get("bing"), Some(&[][..]));
        assert_eq!(bundle.get("google").map(<[_]>::len), Some(1));
        assert_eq!(bundle.get("baidu").map(<[_]>::len), Some(1));
    }

    #[tokio::test]
    async fn all_sources_failing_still_yields_full_bundle() {
        let agg = aggregator(StubFetcher::default());
        let bundle = agg.aggregate("test").await.expect("non-empty query");
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.total_results(), 0);
        assert_eq!(agg.tasks[0].fetcher().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn sources_run_concurrently() {
        let delays = HashMap::from([
            (Provider::Google.endpoint(), 300),
            (Provider::Bing.endpoint(), 300),
            (Provider::Baidu.endpoint(), 300),
        ]);
        let agg = aggregator(StubFetcher {
            bodies: builtin_bodies(),
            delays,
            ..Default::default()
        });

        let started = std::time::Instant::now();
        let bundle = agg.aggregate("test").await.expect("non-empty query");
        let elapsed = started.elapsed();

        assert_eq!(bundle.total_results(), 3);
        assert!(elapsed < Duration::from_millis(800), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn slots_follow_configuration_not_completion_order() {
        let delays = HashMap::from([(Provider::Google.endpoint(), 150)]);
        let agg = aggregator(StubFetcher {
            bodies: builtin_bodies(),
            delays,
            ..Default::default()
        });
        let bundle = agg.aggregate("test").await.expect("non-empty query");
        let names: Vec<&str> = bundle.sources().collect();
        assert_eq!(names, vec!["google", "bing", "baidu"]);
        assert_eq!(bundle.get("google").map(|r| r[0].title.as_str()), Some("GTitle"));
    }

    #[tokio::test]
    async fn query_passed_through_to_every_source() {
        let agg = aggregator(StubFetcher {
            bodies: builtin_bodies(),
            ..Default::default()
        });
        agg.aggregate("rust lang").await.expect("non-empty query");
        let queries = agg.tasks[0].fetcher().queries.lock().expect("lock").clone();
        assert_eq!(queries, vec!["rust lang"; 3]);
    }

    #[test]
    fn duplicate_source_names_rejected() {
        let rules = vec![
            SourceRule::builtin(Provider::Bing),
            SourceRule::builtin(Provider::Bing),
        ];
        let err = Aggregator::with_fetcher(&rules, StubFetcher::default()).unwrap_err();
        assert!(err.to_string().contains("duplicate source name: bing"));
    }

    #[test]
    fn empty_rules_rejected() {
        let err = Aggregator::with_fetcher(&[], StubFetcher::default()).unwrap_err();
        assert!(err.to_string().contains("at least one source"));
    }

    #[test]
    fn invalid_rule_is_fatal() {
        let rules = vec![SourceRule::new("bad", "http://x.com/?q={query}", "no groups")];
        let err = Aggregator::with_fetcher(&rules, StubFetcher::default()).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn new_builds_from_default_config() {
        let agg = Aggregator::new(&SearchConfig::default()).expect("default config is valid");
        assert_eq!(agg.sources().count(), 3);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(Aggregator::new(&config).is_err());
    }
}
