//! Remote data caches.
//!
//! Each external source (weather, news, finance) owns one [`QueryCache`]
//! inside the root state. A cache maps a parameter record to a tri-state
//! [`QueryResult`]; reads never block. [`QueryClient::query`] is the only
//! entry point that starts fetches:
//!
//! 1. With `skip` set, nothing happens and the caller sees
//!    [`QueryResult::Skipped`].
//! 2. If the params have no entry, or the entry is stale and no fetch is in
//!    flight, the client dispatches [`CacheAction::Started`] and spawns a
//!    tokio task that calls the namespace's [`DataSource`].
//! 3. The task sends the outcome back through the channel as
//!    [`CacheAction::Resolved`]; the UI loop dispatches it. Completions
//!    overwrite whatever is cached, so the last one to arrive wins.
//!
//! Repeated queries for the same params while a fetch is in flight return
//! the cached state without starting another fetch.

mod finance;
mod news;
mod weather;

pub use finance::{
    point_limit, FinanceData, FinanceRequest, MockFinanceSource, PricePoint, PriceSeries, Quote,
};
pub use news::{Article, MockNewsSource, NewsPage, NewsRequest};
pub use weather::{ForecastDay, MockWeatherSource, WeatherReport, WeatherRequest};

use crate::store::{Action, RootState, Store};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors reported by data sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The source failed to produce a response.
    #[error("data source failed: {0}")]
    Source(String),

    /// The finance source does not know the requested symbol.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
}

/// Observable state of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    /// The query was skipped by the caller; no fetch was issued.
    Skipped,
    /// No data yet; a fetch is in flight.
    Loading,
    /// The most recent fetch failed.
    Error(QueryError),
    /// The most recent fetch succeeded.
    Data(T),
}

impl<T> QueryResult<T> {
    /// Returns the data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryResult::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Returns `true` while the first fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryResult::Loading)
    }
}

/// Per-call query options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Suppress execution entirely.
    pub skip: bool,
}

impl QueryOptions {
    /// Options that skip the query when `skip` is true.
    pub fn skip_if(skip: bool) -> Self {
        Self { skip }
    }
}

/// One cached parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// Latest known result. A refetch keeps the previous data visible.
    pub result: QueryResult<T>,
    /// A fetch for these params is outstanding.
    pub in_flight: bool,
    /// The entry was invalidated and should be refetched on next read.
    pub stale: bool,
}

/// Transitions of a [`QueryCache`].
#[derive(Debug, Clone, PartialEq)]
pub enum CacheAction<P, T> {
    /// A fetch for `P` was issued.
    Started(P),
    /// A fetch for `params` completed.
    Resolved {
        /// Params the fetch was issued for.
        params: P,
        /// Outcome of the fetch.
        result: Result<T, QueryError>,
    },
    /// Mark every entry stale (focus regained, connection restored, manual
    /// refresh).
    InvalidateAll,
}

/// Cache of query results keyed by parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCache<P: Eq + Hash, T> {
    entries: HashMap<P, CacheEntry<T>>,
}

impl<P: Eq + Hash, T> Default for QueryCache<P, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<P, T> QueryCache<P, T>
where
    P: Clone + Eq + Hash,
    T: Clone,
{
    /// Entry for `params`, if one exists.
    pub fn entry(&self, params: &P) -> Option<&CacheEntry<T>> {
        self.entries.get(params)
    }

    /// Current result for `params`. Unknown params read as `Loading`.
    pub fn read(&self, params: &P) -> QueryResult<T> {
        self.entries
            .get(params)
            .map_or(QueryResult::Loading, |entry| entry.result.clone())
    }

    /// Returns `true` if a read of `params` should start a fetch.
    pub fn needs_fetch(&self, params: &P) -> bool {
        match self.entries.get(params) {
            None => true,
            Some(entry) => entry.stale && !entry.in_flight,
        }
    }

    /// Number of cached parameter records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been queried yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `action`, returning the next cache.
    pub fn apply(&self, action: CacheAction<P, T>) -> Self {
        let mut next = self.clone();
        match action {
            CacheAction::Started(params) => {
                next.entries
                    .entry(params)
                    .and_modify(|entry| entry.in_flight = true)
                    .or_insert(CacheEntry {
                        result: QueryResult::Loading,
                        in_flight: true,
                        stale: false,
                    });
            }
            CacheAction::Resolved { params, result } => {
                let result = match result {
                    Ok(data) => QueryResult::Data(data),
                    Err(e) => QueryResult::Error(e),
                };
                next.entries.insert(
                    params,
                    CacheEntry {
                        result,
                        in_flight: false,
                        stale: false,
                    },
                );
            }
            CacheAction::InvalidateAll => {
                for entry in next.entries.values_mut() {
                    entry.stale = true;
                }
            }
        }
        next
    }
}

/// Asynchronous producer of query data.
#[async_trait]
pub trait DataSource<P, T>: Send + Sync
where
    P: Send + 'static,
    T: Send + 'static,
{
    /// Fetches data for `params`.
    async fn fetch(&self, params: P) -> Result<T, QueryError>;
}

/// Shared source handle for one namespace.
pub type SharedSource<P, T> = Arc<dyn DataSource<P, T>>;

/// The data sources behind the three cache namespaces.
#[derive(Clone)]
pub struct Sources {
    /// Weather forecasts.
    pub weather: SharedSource<WeatherRequest, WeatherReport>,
    /// Headlines and article search.
    pub news: SharedSource<NewsRequest, NewsPage>,
    /// Quotes and price series.
    pub finance: SharedSource<FinanceRequest, FinanceData>,
}

impl Sources {
    /// Demo sources with the latencies of a real network round trip.
    pub fn demo() -> Self {
        Self {
            weather: Arc::new(MockWeatherSource::default()),
            news: Arc::new(MockNewsSource::default()),
            finance: Arc::new(MockFinanceSource::default()),
        }
    }

    /// Demo sources that answer immediately.
    pub fn instant() -> Self {
        Self {
            weather: Arc::new(MockWeatherSource::with_latency(Duration::ZERO)),
            news: Arc::new(MockNewsSource::with_latency(Duration::ZERO)),
            finance: Arc::new(MockFinanceSource::with_latency(Duration::ZERO)),
        }
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}

/// Binds a cache namespace in [`RootState`] to its source and action.
pub trait Namespace: 'static {
    /// Parameter record; the cache key.
    type Params: Clone + Eq + Hash + Debug + Send + 'static;
    /// Response type.
    type Data: Clone + Debug + Send + 'static;

    /// Name used in log messages.
    const NAME: &'static str;

    /// The namespace's cache inside `state`.
    fn cache(state: &RootState) -> &QueryCache<Self::Params, Self::Data>;

    /// Wraps a cache transition into a store action.
    fn action(action: CacheAction<Self::Params, Self::Data>) -> Action;

    /// The namespace's data source.
    fn source(sources: &Sources) -> SharedSource<Self::Params, Self::Data>;
}

/// Weather cache namespace.
#[derive(Debug, Clone, Copy)]
pub struct WeatherApi;

/// News cache namespace.
#[derive(Debug, Clone, Copy)]
pub struct NewsApi;

/// Finance cache namespace.
#[derive(Debug, Clone, Copy)]
pub struct FinanceApi;

impl Namespace for WeatherApi {
    type Params = WeatherRequest;
    type Data = WeatherReport;
    const NAME: &'static str = "weather";

    fn cache(state: &RootState) -> &QueryCache<Self::Params, Self::Data> {
        &state.weather_api
    }

    fn action(action: CacheAction<Self::Params, Self::Data>) -> Action {
        Action::WeatherApi(action)
    }

    fn source(sources: &Sources) -> SharedSource<Self::Params, Self::Data> {
        Arc::clone(&sources.weather)
    }
}

impl Namespace for NewsApi {
    type Params = NewsRequest;
    type Data = NewsPage;
    const NAME: &'static str = "news";

    fn cache(state: &RootState) -> &QueryCache<Self::Params, Self::Data> {
        &state.news_api
    }

    fn action(action: CacheAction<Self::Params, Self::Data>) -> Action {
        Action::NewsApi(action)
    }

    fn source(sources: &Sources) -> SharedSource<Self::Params, Self::Data> {
        Arc::clone(&sources.news)
    }
}

impl Namespace for FinanceApi {
    type Params = FinanceRequest;
    type Data = FinanceData;
    const NAME: &'static str = "finance";

    fn cache(state: &RootState) -> &QueryCache<Self::Params, Self::Data> {
        &state.finance_api
    }

    fn action(action: CacheAction<Self::Params, Self::Data>) -> Action {
        Action::FinanceApi(action)
    }

    fn source(sources: &Sources) -> SharedSource<Self::Params, Self::Data> {
        Arc::clone(&sources.finance)
    }
}

/// Issues fetches and tracks their tasks.
///
/// Fetch tasks only send actions through the channel; they never touch the
/// store. Dropping the client aborts every outstanding task.
pub struct QueryClient {
    sources: Sources,
    tx: mpsc::Sender<Action>,
    tasks: RefCell<Vec<JoinHandle<()>>>,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl QueryClient {
    /// Creates a client delivering results through `tx`.
    pub fn new(sources: Sources, tx: mpsc::Sender<Action>) -> Self {
        Self {
            sources,
            tx,
            tasks: RefCell::new(Vec::new()),
        }
    }

    /// Reads `params` from namespace `N`, starting a fetch if needed.
    ///
    /// Must be called from within a tokio runtime unless `options.skip` is
    /// set or the entry is already fresh.
    pub fn query<N: Namespace>(
        &self,
        store: &Store,
        params: N::Params,
        options: QueryOptions,
    ) -> QueryResult<N::Data> {
        if options.skip {
            return QueryResult::Skipped;
        }

        if N::cache(&store.get_state()).needs_fetch(&params) {
            tracing::debug!(namespace = N::NAME, ?params, "starting fetch");
            store.dispatch(N::action(CacheAction::Started(params.clone())));
            self.spawn_fetch::<N>(params.clone());
        }

        N::cache(&store.get_state()).read(&params)
    }

    /// Number of fetch tasks that have not finished.
    pub fn in_flight(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Aborts every outstanding fetch.
    pub fn shutdown(&self) {
        for task in self.tasks.borrow_mut().drain(..) {
            task.abort();
        }
    }

    fn spawn_fetch<N: Namespace>(&self, params: N::Params) {
        let source = N::source(&self.sources);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let result = source.fetch(params.clone()).await;
            if let Err(e) = &result {
                tracing::warn!(namespace = N::NAME, ?params, "fetch failed: {}", e);
            }
            let action = N::action(CacheAction::Resolved { params, result });
            if tx.send(action).await.is_err() {
                tracing::debug!(namespace = N::NAME, "result dropped, UI loop gone");
            }
        });

        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }
}

impl Drop for QueryClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}
