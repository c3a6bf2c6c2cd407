//! Fetch coordination for list screens.
//!
//! At most one fetch runs per coordinator. Each fetch is tagged with a
//! sequence number. A query change observed while a fetch is in flight marks
//! a follow-up as pending instead of starting a second request. When the
//! in-flight fetch settles, its response is applied only if it is still the
//! latest and nothing newer is pending; stale responses are dropped.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::{HotelDeskError, Result};
use crate::list::query::ListParams;

/// Records and pagination metadata for one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<R> {
    pub records: Vec<R>,
    pub total: u64,
    pub total_pages: usize,
}

impl<R> Default for PageResult<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }
}

/// A server collection that can be fetched one page at a time.
pub trait ListEndpoint<R>: Send + Sync + 'static {
    fn fetch_page(
        &self,
        params: &ListParams,
    ) -> impl Future<Output = Result<PageResult<R>>> + Send;
}

/// Sequence bookkeeping behind the coordinator.
#[derive(Debug, Default)]
pub struct FetchGuard {
    latest_issued: u64,
    in_flight: Option<u64>,
    pending: bool,
}

impl FetchGuard {
    /// Claim the guard for a new fetch. Returns its sequence number, or
    /// `None` (and marks a follow-up pending) when a fetch is already out.
    pub fn begin(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            self.pending = true;
            return None;
        }
        self.latest_issued += 1;
        self.in_flight = Some(self.latest_issued);
        Some(self.latest_issued)
    }

    /// Release the guard for `seq`. Returns whether its response is current.
    pub fn settle(&mut self, seq: u64) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
        }
        seq == self.latest_issued && !self.pending
    }

    /// Take the pending follow-up flag.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drop all bookkeeping for in-flight work.
    fn reset(&mut self) {
        self.in_flight = None;
        self.pending = false;
    }
}

/// What happened to a settled fetch.
#[derive(Debug)]
pub enum FetchOutcome<R> {
    /// Current response; apply it.
    Succeeded { seq: u64, page: PageResult<R> },
    /// Current request failed.
    Failed { seq: u64, error: HotelDeskError },
    /// Superseded by a newer query; nothing to apply.
    Discarded { seq: u64 },
}

struct InFlight<R> {
    seq: u64,
    handle: JoinHandle<Result<PageResult<R>>>,
}

/// Issues list fetches and settles them in order.
pub struct FetchCoordinator<R> {
    guard: FetchGuard,
    in_flight: Option<InFlight<R>>,
    mounted: bool,
}

impl<R> Default for FetchCoordinator<R> {
    fn default() -> Self {
        Self {
            guard: FetchGuard::default(),
            in_flight: None,
            mounted: true,
        }
    }
}

impl<R: Send + 'static> FetchCoordinator<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `params`, or mark a follow-up pending if one is
    /// already running. Returns whether a request was actually issued.
    pub fn request<E>(&mut self, endpoint: &Arc<E>, params: ListParams) -> bool
    where
        E: ListEndpoint<R>,
    {
        if !self.mounted {
            return false;
        }
        let Some(seq) = self.guard.begin() else {
            tracing::debug!(
                in_flight = ?self.in_flight.as_ref().map(|f| f.seq),
                "fetch in flight, coalescing query change"
            );
            return false;
        };

        tracing::debug!(seq, page = params.page, limit = params.limit, "issuing list fetch");
        let endpoint = Arc::clone(endpoint);
        let handle = tokio::spawn(async move { endpoint.fetch_page(&params).await });
        self.in_flight = Some(InFlight { seq, handle });
        true
    }

    pub fn is_fetching(&self) -> bool {
        self.guard.is_in_flight()
    }

    pub fn take_pending(&mut self) -> bool {
        self.guard.take_pending()
    }

    /// Wait for the in-flight fetch to settle. Returns `None` immediately
    /// when nothing is in flight.
    ///
    /// Cancel-safe: the fetch keeps running if this future is dropped.
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome<R>> {
        let flight = self.in_flight.as_mut()?;
        let joined = (&mut flight.handle).await;
        let seq = flight.seq;
        self.in_flight = None;

        let result = joined.unwrap_or_else(|e| Err(HotelDeskError::TaskFailed(e.to_string())));
        let current = self.guard.settle(seq);

        if !self.mounted || !current {
            tracing::debug!(seq, "discarding stale list response");
            return Some(FetchOutcome::Discarded { seq });
        }

        Some(match result {
            Ok(page) => FetchOutcome::Succeeded { seq, page },
            Err(error) => FetchOutcome::Failed { seq, error },
        })
    }

    /// Abort in-flight work; nothing issued before this is ever applied.
    pub fn unmount(&mut self) {
        self.mounted = false;
        if let Some(flight) = self.in_flight.take() {
            flight.handle.abort();
        }
        self.guard.reset();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl<R> Drop for FetchCoordinator<R> {
    fn drop(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            flight.handle.abort();
        }
    }
}
