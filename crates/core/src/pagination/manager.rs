//! Cursor pagination manager.
//!
//! Drives an injected [`PageFetcher`] over a cursor-paginated connection,
//! accumulating pages and exposing load-more / refetch controls.
//!
//! State transitions:
//!
//! ```text
//! Idle -> InitialLoading -> Ready <-> LoadingMore
//!            any state   -> Error   (fetch failure)
//!                  Error -> InitialLoading (refetch)
//! ```
//!
//! Every first-page fetch bumps a generation counter. Responses are applied
//! only if their generation is still current and the manager is still
//! mounted, so a load-more that resolves after a refetch never appends
//! stale nodes.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use super::path::extract_connection;
use super::traits::{PageFetcher, Variables};
use super::types::{node_id, PageInfo};
use super::PaginationError;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Construction options for a [`CursorPaginationManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOptions {
    /// Dot-separated location of the connection in the query data.
    pub data_path: String,
    /// Value sent as the `first` variable.
    pub page_size: u32,
    /// Extra variables merged into every request.
    pub query_variables: Variables,
    /// Drop nodes whose `id` was already loaded.
    pub dedupe: bool,
    /// Initial refetch trigger value.
    pub refetch_trigger: u64,
}

impl PaginationOptions {
    /// Creates options for the connection at `data_path`.
    pub fn new(data_path: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            page_size: DEFAULT_PAGE_SIZE,
            query_variables: Variables::new(),
            dedupe: false,
            refetch_trigger: 0,
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Adds a query variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_variables.insert(name.into(), value.into());
        self
    }

    /// Replaces all query variables.
    pub fn with_query_variables(mut self, variables: Variables) -> Self {
        self.query_variables = variables;
        self
    }

    /// Enables or disables deduplication by node id.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Sets the initial refetch trigger value.
    pub fn with_refetch_trigger(mut self, trigger: u64) -> Self {
        self.refetch_trigger = trigger;
        self
    }

    /// Builds request variables; pagination variables win over caller ones.
    pub fn variables(&self, after: Option<&str>) -> Variables {
        let mut variables = self.query_variables.clone();
        variables.insert("first".to_string(), Value::from(self.page_size));
        variables.insert(
            "after".to_string(),
            after.map_or(Value::Null, |cursor| Value::String(cursor.to_string())),
        );
        variables
    }
}

/// Lifecycle phase of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPhase {
    Idle,
    InitialLoading,
    Ready,
    LoadingMore,
    Error,
}

/// Accumulated connection state.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState<N> {
    /// Nodes in fetch order.
    pub items: Vec<N>,
    pub page_info: Option<PageInfo>,
    pub phase: PaginationPhase,
    pub error: Option<PaginationError>,
    /// Raw data of the most recent successful response.
    pub query_data: Option<Value>,
}

impl<N> PaginationState<N> {
    fn idle() -> Self {
        Self {
            items: Vec::new(),
            page_info: None,
            phase: PaginationPhase::Idle,
            error: None,
            query_data: None,
        }
    }

    /// True while the first page is being fetched.
    pub fn loading(&self) -> bool {
        self.phase == PaginationPhase::InitialLoading
    }

    /// True while a subsequent page is being fetched.
    pub fn loading_more(&self) -> bool {
        self.phase == PaginationPhase::LoadingMore
    }

    /// True when the server reported another page.
    pub fn has_next_page(&self) -> bool {
        self.page_info.as_ref().is_some_and(|info| info.has_next_page)
    }

    /// True once loading settled with nothing to show.
    pub fn is_empty(&self) -> bool {
        self.phase == PaginationPhase::Ready && self.items.is_empty()
    }
}

/// Borrowed view handed to an external renderer.
#[derive(Debug)]
pub struct PaginationProps<'a, N> {
    pub items: &'a [N],
    pub loading: bool,
    pub loading_more: bool,
    pub has_next_page: bool,
    pub page_info: Option<&'a PageInfo>,
    pub error: Option<&'a PaginationError>,
    pub query_data: Option<&'a Value>,
}

type DataChangeCallback<N> = Box<dyn Fn(&[N]) + Send + Sync>;

/// Controller for one cursor-paginated list.
pub struct CursorPaginationManager<N> {
    fetcher: Arc<dyn PageFetcher>,
    options: PaginationOptions,
    state: watch::Sender<PaginationState<N>>,
    seen_ids: Mutex<HashSet<String>>,
    generation: AtomicU64,
    refetch_trigger: AtomicU64,
    mounted: AtomicBool,
    on_data_change: Option<DataChangeCallback<N>>,
}

impl<N> fmt::Debug for CursorPaginationManager<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorPaginationManager")
            .field("options", &self.options)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("mounted", &self.mounted.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Whether a page replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageMode {
    Replace,
    Append,
}

impl<N> CursorPaginationManager<N>
where
    N: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates an idle manager. Call [`load`](Self::load) to fetch the first page.
    pub fn new(fetcher: impl PageFetcher + 'static, options: PaginationOptions) -> Self {
        let (state, _) = watch::channel(PaginationState::idle());
        Self {
            fetcher: Arc::new(fetcher),
            refetch_trigger: AtomicU64::new(options.refetch_trigger),
            options,
            state,
            seen_ids: Mutex::new(HashSet::new()),
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
            on_data_change: None,
        }
    }

    /// Creates a manager and fetches the first page.
    pub async fn mount(fetcher: impl PageFetcher + 'static, options: PaginationOptions) -> Self {
        let manager = Self::new(fetcher, options);
        manager.load().await;
        manager
    }

    /// Registers a callback invoked with all items after every applied page.
    pub fn on_data_change(mut self, callback: impl Fn(&[N]) + Send + Sync + 'static) -> Self {
        self.on_data_change = Some(Box::new(callback));
        self
    }

    /// Options the manager was built with.
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Fetches the first page, replacing any accumulated items.
    pub async fn load(&self) {
        if !self.is_mounted() {
            return;
        }

        // The bump and the reset happen under the state lock so an in-flight
        // load more can never pair an old cursor with the new generation.
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.seen().clear();
            state.items.clear();
            state.page_info = None;
            state.error = None;
            state.query_data = None;
            state.phase = PaginationPhase::InitialLoading;
        });
        tracing::debug!(
            data_path = %self.options.data_path,
            generation,
            "fetching first page"
        );

        let result = self.fetcher.fetch_page(self.options.variables(None)).await;
        self.settle(generation, result, PageMode::Replace);
    }

    /// Fetches the next page and appends it.
    ///
    /// Does nothing unless the last page reported `has_next_page` with an end
    /// cursor and no fetch is currently in flight.
    pub async fn handle_load_more(&self) {
        if !self.is_mounted() {
            return;
        }

        let mut cursor = None;
        let mut generation = 0;
        let started = self.state.send_if_modified(|state| {
            if matches!(
                state.phase,
                PaginationPhase::Idle | PaginationPhase::InitialLoading | PaginationPhase::LoadingMore
            ) {
                return false;
            }
            match &state.page_info {
                Some(PageInfo {
                    has_next_page: true,
                    end_cursor: Some(end_cursor),
                    ..
                }) => {
                    cursor = Some(end_cursor.clone());
                    generation = self.generation.load(Ordering::SeqCst);
                    state.phase = PaginationPhase::LoadingMore;
                    true
                }
                _ => false,
            }
        });
        if !started {
            tracing::debug!(data_path = %self.options.data_path, "load more skipped");
            return;
        }

        tracing::debug!(
            data_path = %self.options.data_path,
            generation,
            after = cursor.as_deref().unwrap_or_default(),
            "fetching next page"
        );

        let result = self
            .fetcher
            .fetch_page(self.options.variables(cursor.as_deref()))
            .await;
        self.settle(generation, result, PageMode::Append);
    }

    /// Discards all items and fetches the first page again.
    pub async fn handle_refetch(&self) {
        self.load().await;
    }

    /// Refetches when `trigger` differs from the last value seen.
    pub async fn set_refetch_trigger(&self, trigger: u64) {
        let previous = self.refetch_trigger.swap(trigger, Ordering::SeqCst);
        if previous != trigger {
            self.handle_refetch().await;
        }
    }

    /// Tears the manager down; responses still in flight are dropped.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    /// False after [`unmount`](Self::unmount).
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Receives a fresh snapshot every time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<PaginationState<N>> {
        self.state.subscribe()
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> PaginationState<N> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<N> {
        self.state.borrow().items.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    pub fn loading_more(&self) -> bool {
        self.state.borrow().loading_more()
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        self.state.borrow().page_info.clone()
    }

    pub fn error(&self) -> Option<PaginationError> {
        self.state.borrow().error.clone()
    }

    pub fn phase(&self) -> PaginationPhase {
        self.state.borrow().phase
    }

    /// Hands the current state to a caller-supplied renderer.
    ///
    /// The state is read-locked while `render` runs, so the closure must not
    /// drive the manager itself.
    pub fn render<R>(&self, render: impl FnOnce(PaginationProps<'_, N>) -> R) -> R {
        let state = self.state.borrow();
        render(PaginationProps {
            items: &state.items,
            loading: state.loading(),
            loading_more: state.loading_more(),
            has_next_page: state.has_next_page(),
            page_info: state.page_info.as_ref(),
            error: state.error.as_ref(),
            query_data: state.query_data.as_ref(),
        })
    }

    fn seen(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.seen_ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.is_mounted() && self.generation.load(Ordering::SeqCst) == generation
    }

    /// Applies a fetch result if it still belongs to the current generation.
    fn settle(&self, generation: u64, result: super::Result<Value>, mode: PageMode) {
        let outcome = result.and_then(|data| decode_page::<N>(&self.options.data_path, data));

        let applied = self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            match outcome {
                Ok(page) => self.apply_page(state, page, mode),
                Err(error) => {
                    tracing::debug!(
                        data_path = %self.options.data_path,
                        %error,
                        "page fetch failed"
                    );
                    state.error = Some(error);
                    state.phase = PaginationPhase::Error;
                }
            }
            true
        });

        if !applied {
            tracing::debug!(
                data_path = %self.options.data_path,
                generation,
                "discarding stale page"
            );
            return;
        }

        if let Some(callback) = &self.on_data_change {
            let state = self.state.borrow();
            if state.error.is_none() {
                callback(&state.items);
            }
        }
    }

    fn apply_page(&self, state: &mut PaginationState<N>, page: DecodedPage<N>, mode: PageMode) {
        state.error = None;
        state.phase = PaginationPhase::Ready;

        let Some((nodes, page_info)) = page.connection else {
            // No connection at the data path: an empty list on first load,
            // nothing to add on load more.
            if mode == PageMode::Replace {
                state.items.clear();
                state.page_info = None;
                state.query_data = page.query_data;
            }
            return;
        };

        let mut seen = self.seen();
        if mode == PageMode::Replace {
            seen.clear();
            state.items.clear();
        }
        for (id, node) in nodes {
            if self.options.dedupe {
                if let Some(id) = id {
                    if !seen.insert(id) {
                        continue;
                    }
                }
            }
            state.items.push(node);
        }
        state.page_info = page_info;
        state.query_data = page.query_data;

        tracing::debug!(
            data_path = %self.options.data_path,
            items = state.items.len(),
            has_next_page = state.has_next_page(),
            "page applied"
        );
    }
}

/// A response decoded outside the state lock.
struct DecodedPage<N> {
    connection: Option<(Vec<(Option<String>, N)>, Option<PageInfo>)>,
    query_data: Option<Value>,
}

fn decode_page<N: DeserializeOwned>(
    data_path: &str,
    data: Value,
) -> super::Result<DecodedPage<N>> {
    let Some(connection) = extract_connection(&data, data_path) else {
        return Ok(DecodedPage {
            connection: None,
            query_data: (!data.is_null()).then_some(data),
        });
    };

    let page_info = connection.page_info;
    let nodes = connection
        .edges
        .into_iter()
        .enumerate()
        .map(|(index, edge)| {
            let id = node_id(&edge.node);
            serde_json::from_value::<N>(edge.node)
                .map(|node| (id, node))
                .map_err(|e| PaginationError::MalformedNode {
                    index,
                    message: e.to_string(),
                })
        })
        .collect::<super::Result<Vec<_>>>()?;

    Ok(DecodedPage {
        connection: Some((nodes, page_info)),
        query_data: Some(data),
    })
}
